//! Synthetic views drawn by the window manager itself: the dock, the clip
//! and the root menu.

mod clip;
mod dock;
mod menu;

#[cfg(test)]
mod tests;

pub use clip::Clip;
pub use dock::{dock_origin, Dock};
pub use menu::RootMenu;

use std::any::Any;

use crate::view::{ViewImpl, ViewKind};

/// View implementation of chrome elements. The size is whatever the
/// element laid itself out to.
#[derive(Debug)]
pub struct ChromeView {
    kind: ViewKind,
    size: (u32, u32),
}

impl ChromeView {
    pub fn new(kind: ViewKind, width: u32, height: u32) -> Self {
        debug_assert!(kind.is_chrome(), "{kind:?} is not a chrome kind");
        Self {
            kind,
            size: (width.max(1), height.max(1)),
        }
    }
}

impl ViewImpl for ChromeView {
    fn kind(&self) -> ViewKind {
        self.kind
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.size = (width, height);
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
