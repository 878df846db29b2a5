//! Pointer state machine: passthrough, interactive move and resize.

#[cfg(test)]
mod tests;

use wlmaker_common::{Edges, Point, Rect, ViewId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorMode {
    #[default]
    Passthrough,
    Move,
    Resize,
}

/// What a pointer motion means for the grabbed view, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CursorMotion {
    Passthrough,
    Move { view: ViewId, x: i32, y: i32 },
    Resize { view: ViewId, geometry: Rect },
}

#[derive(Debug, Default)]
pub struct Cursor {
    mode: CursorMode,
    grabbed: Option<ViewId>,
    /// Pointer minus the grabbed point of the view (its origin for moves,
    /// the dragged border for resizes).
    grab_x: f64,
    grab_y: f64,
    grab_box: Rect,
    resize_edges: Edges,
    under_pointer: Option<ViewId>,
    position: Point,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    pub fn grabbed(&self) -> Option<ViewId> {
        self.grabbed
    }

    pub fn resize_edges(&self) -> Edges {
        self.resize_edges
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn warp(&mut self, x: f64, y: f64) {
        self.position = Point::new(x, y);
    }

    pub fn under_pointer(&self) -> Option<ViewId> {
        self.under_pointer
    }

    pub fn set_under_pointer(&mut self, view: Option<ViewId>) {
        self.under_pointer = view;
    }

    /// Start moving `view`, whose origin is at `origin`. Only the
    /// workspace's activated view can be grabbed.
    pub fn begin_move(&mut self, view: ViewId, origin: (i32, i32), is_activated: bool) -> bool {
        if !is_activated {
            tracing::warn!(%view, "move denied: view is not activated");
            return false;
        }
        self.mode = CursorMode::Move;
        self.grabbed = Some(view);
        self.grab_x = self.position.x - f64::from(origin.0);
        self.grab_y = self.position.y - f64::from(origin.1);
        tracing::debug!(%view, "move started");
        true
    }

    /// Start resizing `view` along `edges`, from its current `geometry`.
    pub fn begin_resize(
        &mut self,
        view: ViewId,
        geometry: Rect,
        edges: Edges,
        is_activated: bool,
    ) -> bool {
        if !is_activated {
            tracing::warn!(%view, "resize denied: view is not activated");
            return false;
        }
        if edges.is_empty() {
            tracing::warn!(%view, "resize denied: no edges");
            return false;
        }
        let border_x = geometry.x + if edges.contains(Edges::RIGHT) { geometry.width } else { 0 };
        let border_y = geometry.y + if edges.contains(Edges::BOTTOM) { geometry.height } else { 0 };

        self.mode = CursorMode::Resize;
        self.grabbed = Some(view);
        self.grab_x = self.position.x - f64::from(border_x);
        self.grab_y = self.position.y - f64::from(border_y);
        self.grab_box = geometry;
        self.resize_edges = edges;
        tracing::debug!(%view, ?edges, "resize started");
        true
    }

    /// Move the pointer and report what the grabbed view should do.
    pub fn motion_to(&mut self, x: f64, y: f64) -> CursorMotion {
        self.position = Point::new(x, y);
        let Some(view) = self.grabbed else {
            return CursorMotion::Passthrough;
        };
        match self.mode {
            CursorMode::Passthrough => CursorMotion::Passthrough,
            CursorMode::Move => CursorMotion::Move {
                view,
                x: (x - self.grab_x).floor() as i32,
                y: (y - self.grab_y).floor() as i32,
            },
            CursorMode::Resize => CursorMotion::Resize {
                view,
                geometry: self.resized_box(x, y),
            },
        }
    }

    fn resized_box(&self, x: f64, y: f64) -> Rect {
        let border_x = (x - self.grab_x).floor() as i32;
        let border_y = (y - self.grab_y).floor() as i32;
        let b = self.grab_box;
        let (mut left, mut right, mut top, mut bottom) = (b.x, b.right(), b.y, b.bottom());

        if self.resize_edges.contains(Edges::TOP) {
            top = border_y.min(bottom - 1);
        } else if self.resize_edges.contains(Edges::BOTTOM) {
            bottom = border_y.max(top + 1);
        }
        if self.resize_edges.contains(Edges::LEFT) {
            left = border_x.min(right - 1);
        } else if self.resize_edges.contains(Edges::RIGHT) {
            right = border_x.max(left + 1);
        }
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Any button release ends a grab. Returns the view that was grabbed.
    pub fn release(&mut self) -> Option<ViewId> {
        let grabbed = self.grabbed.take();
        if let Some(view) = grabbed {
            tracing::debug!(%view, mode = ?self.mode, "grab released");
        }
        self.mode = CursorMode::Passthrough;
        self.resize_edges = Edges::empty();
        grabbed
    }

    /// Forget every reference to `view`.
    pub fn view_unmapped(&mut self, view: ViewId) {
        if self.grabbed == Some(view) {
            self.release();
        }
        if self.under_pointer == Some(view) {
            self.under_pointer = None;
        }
    }
}
