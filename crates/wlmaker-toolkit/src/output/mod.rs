//! Outputs and the output layout.

mod layout;

pub use layout::{OutputEvent, OutputLayout};

use wlmaker_common::{OutputId, Rect};

/// A physical output placed in the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub id: OutputId,
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub mode_width: u32,
    pub mode_height: u32,
    pub scale: f64,
}

impl Output {
    pub fn new(id: OutputId, name: impl Into<String>, mode_width: u32, mode_height: u32) -> Self {
        Self {
            id,
            name: name.into(),
            x: 0,
            y: 0,
            mode_width,
            mode_height,
            scale: 1.0,
        }
    }

    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Size in layout coordinates: the mode divided by the scale.
    pub fn effective_size(&self) -> (u32, u32) {
        let scale = if self.scale > 0.0 { self.scale } else { 1.0 };
        (
            (f64::from(self.mode_width) / scale).round() as u32,
            (f64::from(self.mode_height) / scale).round() as u32,
        )
    }

    pub fn layout_box(&self) -> Rect {
        let (w, h) = self.effective_size();
        Rect::new(self.x, self.y, w as i32, h as i32)
    }
}
