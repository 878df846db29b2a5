//! XDG toplevel adapter.

use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use wlmaker_common::SurfaceId;

use super::{ViewImpl, ViewKind};

/// Requests the window manager sends to an XDG toplevel client.
pub trait ToplevelHandle {
    fn surface(&self) -> SurfaceId;

    fn configure(&mut self, width: u32, height: u32);

    fn set_activated(&mut self, activated: bool);

    fn set_maximized(&mut self, maximized: bool);

    fn set_fullscreen(&mut self, fullscreen: bool);

    fn close(&mut self);
}

pub struct ToplevelView {
    handle: Box<dyn ToplevelHandle>,
    committed: (u32, u32),
    pending: Option<(u32, u32)>,
}

impl ToplevelView {
    /// `size` is the size of the first committed buffer.
    pub fn new(handle: Box<dyn ToplevelHandle>, size: (u32, u32)) -> Self {
        Self {
            handle,
            committed: size,
            pending: None,
        }
    }

    /// The client committed a buffer of this size.
    pub fn commit(&mut self, width: u32, height: u32) {
        self.committed = (width, height);
        if self.pending == Some((width, height)) {
            self.pending = None;
        }
    }

    /// Last size requested and not yet committed.
    pub fn pending_size(&self) -> Option<(u32, u32)> {
        self.pending
    }
}

impl ViewImpl for ToplevelView {
    fn kind(&self) -> ViewKind {
        ViewKind::Toplevel
    }

    fn size(&self) -> (u32, u32) {
        self.committed
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.pending = Some((width, height));
        self.handle.configure(width, height);
    }

    fn set_activated(&mut self, activated: bool) {
        self.handle.set_activated(activated);
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.handle.set_maximized(maximized);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.handle.set_fullscreen(fullscreen);
    }

    fn close(&mut self) {
        self.handle.close();
    }

    fn surface(&self) -> Option<SurfaceId> {
        Some(self.handle.surface())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToplevelRequest {
    Configure(u32, u32),
    Activated(bool),
    Maximized(bool),
    Fullscreen(bool),
    Close,
}

/// Toplevel handle without a client. Requests are recorded; clones share
/// the log.
#[derive(Debug, Clone)]
pub struct HeadlessToplevel {
    surface: SurfaceId,
    requests: Rc<RefCell<Vec<ToplevelRequest>>>,
}

impl HeadlessToplevel {
    pub fn new(surface: SurfaceId) -> Self {
        Self {
            surface,
            requests: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn requests(&self) -> Vec<ToplevelRequest> {
        self.requests.borrow().clone()
    }

    pub fn take_requests(&self) -> Vec<ToplevelRequest> {
        std::mem::take(&mut *self.requests.borrow_mut())
    }

    /// Most recent configure that a client would answer with a commit.
    pub fn last_configure(&self) -> Option<(u32, u32)> {
        self.requests.borrow().iter().rev().find_map(|r| match r {
            ToplevelRequest::Configure(w, h) => Some((*w, *h)),
            _ => None,
        })
    }

    fn push(&self, request: ToplevelRequest) {
        self.requests.borrow_mut().push(request);
    }
}

impl ToplevelHandle for HeadlessToplevel {
    fn surface(&self) -> SurfaceId {
        self.surface
    }

    fn configure(&mut self, width: u32, height: u32) {
        self.push(ToplevelRequest::Configure(width, height));
    }

    fn set_activated(&mut self, activated: bool) {
        self.push(ToplevelRequest::Activated(activated));
    }

    fn set_maximized(&mut self, maximized: bool) {
        self.push(ToplevelRequest::Maximized(maximized));
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        self.push(ToplevelRequest::Fullscreen(fullscreen));
    }

    fn close(&mut self) {
        self.push(ToplevelRequest::Close);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_follows_commits_not_configures() {
        let handle = HeadlessToplevel::new(SurfaceId(1));
        let mut view = ToplevelView::new(Box::new(handle.clone()), (640, 480));

        view.set_size(800, 600);
        assert_eq!(view.size(), (640, 480));
        assert_eq!(view.pending_size(), Some((800, 600)));
        assert_eq!(handle.last_configure(), Some((800, 600)));

        view.commit(800, 600);
        assert_eq!(view.size(), (800, 600));
        assert_eq!(view.pending_size(), None);
    }

    #[test]
    fn state_requests_reach_the_client() {
        let handle = HeadlessToplevel::new(SurfaceId(2));
        let mut view = ToplevelView::new(Box::new(handle.clone()), (10, 10));
        view.set_activated(true);
        view.set_maximized(true);
        view.close();

        assert_eq!(
            handle.take_requests(),
            vec![
                ToplevelRequest::Activated(true),
                ToplevelRequest::Maximized(true),
                ToplevelRequest::Close,
            ]
        );
        assert_eq!(view.surface(), Some(SurfaceId(2)));
    }
}
