//! Session lock: one lock surface per output, shown together.
//!
//! A lock is confirmed once every tracked output has a lock surface whose
//! latest committed state acknowledged the latest configure. Only then is
//! the lock container shown and the client told it is `locked`.


use wlmaker_common::{NodeId, OutputId, ProtocolError, SurfaceId, ToolkitError, WlmakerError};

use crate::output::{Output, OutputLayout};
use crate::scene::SceneGraph;
use crate::seat::Seat;
use crate::serial::Serials;

/// The client side of a session lock.
pub trait LockClient {
    fn configure(&mut self, surface: SurfaceId, serial: u32, width: u32, height: u32);

    fn locked(&mut self);

    /// The lock request was refused or the lock ended.
    fn finished(&mut self);

    fn post_error(&mut self, error: &ProtocolError);

    /// False once the client disconnected.
    fn is_alive(&self) -> bool;
}

#[derive(Debug)]
struct LockSurface {
    surface: SurfaceId,
    node: NodeId,
    configure_serial: u32,
    acked_serial: Option<u32>,
    committed: bool,
}

impl LockSurface {
    fn is_ready(&self) -> bool {
        self.committed
            && self
                .acked_serial
                .is_some_and(|acked| acked >= self.configure_serial)
    }
}

#[derive(Debug)]
struct LockOutput {
    output: OutputId,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    surface: Option<LockSurface>,
}

impl LockOutput {
    fn from_output(output: &Output) -> Self {
        let (width, height) = output.effective_size();
        Self {
            output: output.id,
            x: output.x,
            y: output.y,
            width,
            height,
            surface: None,
        }
    }
}

pub struct SessionLock {
    client: Box<dyn LockClient>,
    container: NodeId,
    /// Insertion order.
    outputs: Vec<LockOutput>,
    /// Surfaces whose output went away. The client still owns them until
    /// it destroys them; their acks and commits are ignored.
    inert: Vec<SurfaceId>,
    locked: bool,
}

impl SessionLock {
    /// Create the (hidden) container under `parent` and track every output
    /// of `layout`.
    pub fn new(
        scene: &mut dyn SceneGraph,
        parent: NodeId,
        client: Box<dyn LockClient>,
        layout: &OutputLayout,
    ) -> Result<Self, ToolkitError> {
        let container = scene.create_tree(parent)?;
        scene.set_enabled(container, false);
        Ok(Self {
            client,
            container,
            outputs: layout.iter().map(LockOutput::from_output).collect(),
            inert: Vec::new(),
            locked: false,
        })
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    /// `locked` was sent.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn client_alive(&self) -> bool {
        self.client.is_alive()
    }

    pub fn client_mut(&mut self) -> &mut dyn LockClient {
        self.client.as_mut()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    /// Every tracked output has a committed surface acknowledging its
    /// latest configure, and there is at least one output.
    pub fn is_confirmed(&self) -> bool {
        !self.outputs.is_empty()
            && self
                .outputs
                .iter()
                .all(|o| o.surface.as_ref().is_some_and(LockSurface::is_ready))
    }

    /// Lock surface shown at scene `node`.
    pub fn surface_for_node(&self, node: NodeId) -> Option<SurfaceId> {
        self.outputs
            .iter()
            .filter_map(|o| o.surface.as_ref())
            .find(|s| s.node == node)
            .map(|s| s.surface)
    }

    /// First committed surface in output insertion order.
    pub fn focus_candidate(&self) -> Option<SurfaceId> {
        self.outputs
            .iter()
            .filter_map(|o| o.surface.as_ref())
            .find(|s| s.committed)
            .map(|s| s.surface)
    }

    /// Log `error` and post it to the client.
    fn violation(&mut self, error: ProtocolError) -> ProtocolError {
        tracing::warn!(%error, "session lock protocol violation");
        self.client.post_error(&error);
        error
    }

    fn entry_for_surface(&mut self, surface: SurfaceId) -> Option<&mut LockOutput> {
        self.outputs
            .iter_mut()
            .find(|o| o.surface.as_ref().is_some_and(|s| s.surface == surface))
    }

    fn configure(client: &mut dyn LockClient, serials: &mut Serials, entry: &mut LockOutput) {
        let Some(lock_surface) = entry.surface.as_mut() else {
            return;
        };
        let serial = serials.next();
        lock_surface.configure_serial = serial;
        lock_surface.committed = false;
        client.configure(lock_surface.surface, serial, entry.width, entry.height);
    }

    /// The client created a lock surface for `output`. Protocol
    /// violations are also posted to the client.
    pub fn new_surface(
        &mut self,
        scene: &mut dyn SceneGraph,
        serials: &mut Serials,
        surface: SurfaceId,
        output: Option<OutputId>,
    ) -> Result<(), WlmakerError> {
        let Some(output) = output else {
            return Err(self.violation(ProtocolError::LockSurfaceWithoutOutput(surface)).into());
        };
        let Some(idx) = self.outputs.iter().position(|o| o.output == output) else {
            return Err(self.violation(ProtocolError::UnknownOutput { surface, output }).into());
        };
        if self.outputs[idx].surface.is_some() {
            return Err(self.violation(ProtocolError::DuplicateLockSurface(output)).into());
        }

        let node = scene.create_buffer(self.container, None)?;
        let entry = &mut self.outputs[idx];
        scene.set_position(node, entry.x, entry.y);
        entry.surface = Some(LockSurface {
            surface,
            node,
            configure_serial: 0,
            acked_serial: None,
            committed: false,
        });
        Self::configure(self.client.as_mut(), serials, entry);
        tracing::debug!(%surface, %output, "lock surface created");
        Ok(())
    }

    fn is_inert(&self, surface: SurfaceId) -> bool {
        self.inert.contains(&surface)
    }

    /// The client acked `serial` for `surface`. Acking a serial that was
    /// never sent to the surface is a protocol error.
    pub fn ack_configure(&mut self, surface: SurfaceId, serial: u32) -> Result<(), ProtocolError> {
        if self.is_inert(surface) {
            tracing::debug!(%surface, serial, "ack on a surface without output ignored");
            return Ok(());
        }
        let latest = match self
            .entry_for_surface(surface)
            .and_then(|e| e.surface.as_mut())
        {
            Some(s) if serial <= s.configure_serial => {
                s.acked_serial = Some(serial);
                return Ok(());
            }
            Some(s) => s.configure_serial,
            None => return Err(self.violation(ProtocolError::UnknownLockSurface(surface))),
        };
        tracing::debug!(%surface, serial, latest, "ack of an unsent serial");
        Err(self.violation(ProtocolError::InvalidSerial { surface, serial }))
    }

    /// The client committed `surface`. Returns true when this commit
    /// confirmed the lock.
    pub fn commit(
        &mut self,
        scene: &mut dyn SceneGraph,
        seat: &mut dyn Seat,
        surface: SurfaceId,
    ) -> Result<bool, ProtocolError> {
        if self.is_inert(surface) {
            tracing::debug!(%surface, "commit on a surface without output ignored");
            return Ok(false);
        }
        let Some(entry) = self.entry_for_surface(surface) else {
            return Err(self.violation(ProtocolError::UnknownLockSurface(surface)));
        };
        let (width, height) = (entry.width, entry.height);
        if let Some(s) = entry.surface.as_mut() {
            let acked = s.acked_serial.is_some_and(|a| a >= s.configure_serial);
            if acked {
                s.committed = true;
                scene.set_dest_size(s.node, width, height);
            } else {
                tracing::debug!(%surface, serial = s.configure_serial, "commit without ack of latest configure");
            }
        }
        Ok(self.evaluate(scene, seat))
    }

    /// Lock once confirmed. Returns true on the transition.
    pub fn evaluate(&mut self, scene: &mut dyn SceneGraph, seat: &mut dyn Seat) -> bool {
        if self.locked || !self.is_confirmed() {
            return false;
        }
        scene.set_enabled(self.container, true);
        self.focus_keyboard(seat);
        self.client.locked();
        self.locked = true;
        tracing::info!(outputs = self.outputs.len(), "session locked");
        true
    }

    /// Give the keyboard to the first committed surface, or take it away.
    pub fn focus_keyboard(&self, seat: &mut dyn Seat) {
        match self.focus_candidate() {
            Some(surface) if seat.keyboard_focus() != Some(surface) => {
                let state = seat.keyboard_state();
                seat.keyboard_enter(surface, &state);
            }
            Some(_) => {}
            None => seat.keyboard_clear_focus(),
        }
    }

    pub fn output_added(&mut self, output: &Output) {
        if self.outputs.iter().any(|o| o.output == output.id) {
            return;
        }
        self.outputs.push(LockOutput::from_output(output));
        tracing::debug!(output = %output.id, "lock tracks new output");
    }

    /// Drop the entry for `output`, destroying its surface node. The
    /// surface turns inert until the client destroys it. The remaining
    /// outputs may now confirm the lock; returns true if so.
    pub fn output_removed(
        &mut self,
        scene: &mut dyn SceneGraph,
        seat: &mut dyn Seat,
        output: OutputId,
    ) -> bool {
        let Some(idx) = self.outputs.iter().position(|o| o.output == output) else {
            return false;
        };
        let entry = self.outputs.remove(idx);
        if let Some(lock_surface) = entry.surface {
            scene.destroy(lock_surface.node);
            self.inert.push(lock_surface.surface);
            if self.locked && seat.keyboard_focus() == Some(lock_surface.surface) {
                self.focus_keyboard(seat);
            }
        }
        self.evaluate(scene, seat)
    }

    /// Position, mode or scale of `output` changed. Its surface is
    /// reconfigured and has to commit again.
    pub fn output_changed(&mut self, scene: &mut dyn SceneGraph, serials: &mut Serials, output: &Output) {
        let Some(entry) = self.outputs.iter_mut().find(|o| o.output == output.id) else {
            return;
        };
        let (width, height) = output.effective_size();
        let resized = (width, height) != (entry.width, entry.height);
        entry.x = output.x;
        entry.y = output.y;
        entry.width = width;
        entry.height = height;
        if let Some(s) = &entry.surface {
            scene.set_position(s.node, entry.x, entry.y);
        }
        if resized {
            Self::configure(self.client.as_mut(), serials, entry);
        }
    }

    /// The client destroyed a lock surface.
    pub fn surface_destroyed(&mut self, scene: &mut dyn SceneGraph, seat: &mut dyn Seat, surface: SurfaceId) {
        if let Some(idx) = self.inert.iter().position(|s| *s == surface) {
            self.inert.swap_remove(idx);
            return;
        }
        let Some(entry) = self.entry_for_surface(surface) else {
            return;
        };
        if let Some(s) = entry.surface.take() {
            scene.destroy(s.node);
        }
        if seat.keyboard_focus() == Some(surface) {
            self.focus_keyboard(seat);
        }
    }

    /// Unlock requested by the client. Hides the container.
    pub fn unlock(&mut self, scene: &mut dyn SceneGraph) -> Result<(), ProtocolError> {
        if !self.locked {
            return Err(self.violation(ProtocolError::UnlockBeforeLocked));
        }
        scene.set_enabled(self.container, false);
        self.locked = false;
        tracing::info!("session unlocked");
        Ok(())
    }

    pub fn destroy(self, scene: &mut dyn SceneGraph) {
        scene.destroy(self.container);
    }
}

impl std::fmt::Debug for SessionLock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionLock")
            .field("container", &self.container)
            .field("outputs", &self.outputs)
            .field("inert", &self.inert)
            .field("locked", &self.locked)
            .finish()
    }
}
