//! Fakes shared by the unit tests.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use wlmaker_common::{ProtocolError, SurfaceId};

use crate::input::AxisEvent;
use crate::lock::LockClient;
use crate::view::{ViewImpl, ViewKind};

#[derive(Debug, Default)]
pub struct StaticLog {
    pub activated: Vec<bool>,
    pub maximized: Vec<bool>,
    pub fullscreen: Vec<bool>,
    pub closed: bool,
    pub axis_events: usize,
}

/// View whose size changes take effect immediately.
pub struct StaticView {
    kind: ViewKind,
    size: (u32, u32),
    surface: Option<SurfaceId>,
    pub log: Rc<RefCell<StaticLog>>,
}

impl StaticView {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            kind: ViewKind::Toplevel,
            size: (width, height),
            surface: None,
            log: Rc::default(),
        }
    }

    pub fn with_surface(mut self, surface: SurfaceId) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn with_kind(mut self, kind: ViewKind) -> Self {
        self.kind = kind;
        self
    }
}

impl ViewImpl for StaticView {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn set_activated(&mut self, activated: bool) {
        self.log.borrow_mut().activated.push(activated);
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.log.borrow_mut().maximized.push(maximized);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.log.borrow_mut().fullscreen.push(fullscreen);
    }

    fn handle_axis(&mut self, _event: &AxisEvent) -> bool {
        self.log.borrow_mut().axis_events += 1;
        true
    }

    fn close(&mut self) {
        self.log.borrow_mut().closed = true;
    }

    fn surface(&self) -> Option<SurfaceId> {
        self.surface
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockMessage {
    Configure {
        surface: SurfaceId,
        serial: u32,
        width: u32,
        height: u32,
    },
    Locked,
    Finished,
    Error(ProtocolError),
}

/// Lock client recording everything it is sent. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingLockClient {
    pub messages: Rc<RefCell<Vec<LockMessage>>>,
    pub alive: Rc<RefCell<bool>>,
}

impl RecordingLockClient {
    pub fn new() -> Self {
        Self {
            messages: Rc::default(),
            alive: Rc::new(RefCell::new(true)),
        }
    }

    pub fn take(&self) -> Vec<LockMessage> {
        std::mem::take(&mut *self.messages.borrow_mut())
    }

    pub fn configures(&self) -> Vec<(SurfaceId, u32, u32, u32)> {
        self.messages
            .borrow()
            .iter()
            .filter_map(|m| match m {
                LockMessage::Configure {
                    surface,
                    serial,
                    width,
                    height,
                } => Some((*surface, *serial, *width, *height)),
                _ => None,
            })
            .collect()
    }

    pub fn was_locked(&self) -> bool {
        self.messages.borrow().contains(&LockMessage::Locked)
    }

    pub fn kill(&self) {
        *self.alive.borrow_mut() = false;
    }
}

impl LockClient for RecordingLockClient {
    fn configure(&mut self, surface: SurfaceId, serial: u32, width: u32, height: u32) {
        self.messages.borrow_mut().push(LockMessage::Configure {
            surface,
            serial,
            width,
            height,
        });
    }

    fn locked(&mut self) {
        self.messages.borrow_mut().push(LockMessage::Locked);
    }

    fn finished(&mut self) {
        self.messages.borrow_mut().push(LockMessage::Finished);
    }

    fn post_error(&mut self, error: &ProtocolError) {
        self.messages.borrow_mut().push(LockMessage::Error(error.clone()));
    }

    fn is_alive(&self) -> bool {
        *self.alive.borrow()
    }
}
