//! Session lock requests from clients.

use wlmaker_common::{OutputId, ProtocolError, SurfaceId, WlmakerError};

use super::{Server, ServerEvent};
use crate::lock::{LockClient, SessionLock};

impl Server {
    /// A client asks to lock the session. Refused while another live
    /// client holds a lock; a lock left behind by a dead client is taken
    /// over. Returns whether the request was accepted.
    pub fn lock_request(&mut self, mut client: Box<dyn LockClient>) -> Result<bool, WlmakerError> {
        if let Some(existing) = &self.session_lock {
            if existing.client_alive() {
                tracing::warn!(error = %ProtocolError::AlreadyLocked, "lock request refused");
                client.finished();
                return Ok(false);
            }
        }
        if let Some(stale) = self.session_lock.take() {
            tracing::info!("taking over lock of a disconnected client");
            stale.destroy(self.scene.as_mut());
        }

        self.release_pointer_grabs();
        let lock = SessionLock::new(self.scene.as_mut(), self.lock_layer, client, &self.outputs)?;
        self.session_lock = Some(lock);
        tracing::info!(outputs = self.outputs.len(), "lock requested");
        Ok(true)
    }

    fn active_lock(&mut self) -> Result<&mut SessionLock, WlmakerError> {
        self.session_lock
            .as_mut()
            .ok_or_else(|| WlmakerError::Other("no session lock in progress".into()))
    }

    /// The lock client created a surface for `output`.
    pub fn lock_new_surface(
        &mut self,
        surface: SurfaceId,
        output: Option<OutputId>,
    ) -> Result<(), WlmakerError> {
        let lock = self
            .session_lock
            .as_mut()
            .ok_or_else(|| WlmakerError::Other("no session lock in progress".into()))?;
        lock.new_surface(self.scene.as_mut(), &mut self.serials, surface, output)
    }

    /// The lock client acked a configure of `surface`.
    pub fn lock_ack_configure(&mut self, surface: SurfaceId, serial: u32) -> Result<(), WlmakerError> {
        self.active_lock()?.ack_configure(surface, serial)?;
        Ok(())
    }

    /// A lock surface committed. The commit that confirms the lock hides
    /// the workspaces.
    pub fn lock_commit(&mut self, surface: SurfaceId) -> Result<(), WlmakerError> {
        let lock = self
            .session_lock
            .as_mut()
            .ok_or_else(|| WlmakerError::Other("no session lock in progress".into()))?;
        if lock.commit(self.scene.as_mut(), self.seat.as_mut(), surface)? {
            self.engage_lock();
        }
        Ok(())
    }

    pub(super) fn engage_lock(&mut self) {
        if self.lock_engaged {
            return;
        }
        self.lock_engaged = true;
        self.release_pointer_grabs();
        self.close_menu();
        self.workspaces[self.current].set_enabled(self.scene.as_mut(), false);
        for view in self.views.values_mut() {
            view.clear_pointer_focus(self.scene.as_mut());
        }
        self.seat.pointer_clear_focus();
        self.events.emit(&ServerEvent::SessionLocked);
    }

    /// The lock client destroyed `surface`. The lock itself stays.
    pub fn lock_surface_destroyed(&mut self, surface: SurfaceId) {
        if let Some(lock) = self.session_lock.as_mut() {
            lock.surface_destroyed(self.scene.as_mut(), self.seat.as_mut(), surface);
        }
    }

    /// The locking client asks to unlock. Workspaces and keyboard focus
    /// come back.
    pub fn unlock(&mut self) -> Result<(), WlmakerError> {
        let Some(lock) = self.session_lock.as_mut() else {
            return Err(ProtocolError::UnlockBeforeLocked.into());
        };
        lock.unlock(self.scene.as_mut())?;
        if let Some(lock) = self.session_lock.take() {
            lock.destroy(self.scene.as_mut());
        }
        self.lock_engaged = false;
        self.workspaces[self.current].set_enabled(self.scene.as_mut(), true);
        self.seat.keyboard_clear_focus();
        self.sync_activation();
        self.events.emit(&ServerEvent::SessionUnlocked);
        Ok(())
    }

    /// The locking client went away without unlocking. The session stays
    /// locked with nothing shown until a new client locks and unlocks.
    pub fn lock_client_gone(&mut self) {
        let Some(lock) = self.session_lock.take() else {
            return;
        };
        let was_locked = lock.is_locked();
        lock.destroy(self.scene.as_mut());
        self.seat.keyboard_clear_focus();
        if was_locked {
            tracing::warn!("lock client vanished, session stays locked");
        } else {
            tracing::debug!("lock client vanished before the lock was confirmed");
        }
    }
}
