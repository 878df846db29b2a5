//! Layer-shell surfaces (panels, backgrounds, overlays).

use std::any::Any;
use std::cell::Cell;
use std::rc::Rc;

use wlmaker_common::{Edges, OutputId, Rect, SurfaceId};

use super::{ViewImpl, ViewKind};
use crate::workspace::Layer;

pub trait LayerHandle {
    fn surface(&self) -> SurfaceId;

    fn configure(&mut self, width: u32, height: u32);

    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Margins {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

/// Double-buffered state of a layer surface, as last committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerSurfaceState {
    pub layer: Layer,
    pub anchor: Edges,
    /// Zero means "stretch between the opposite anchors".
    pub desired_width: u32,
    pub desired_height: u32,
    pub exclusive_zone: i32,
    pub margins: Margins,
    pub output: OutputId,
}

impl LayerSurfaceState {
    pub fn new(layer: Layer, output: OutputId) -> Self {
        Self {
            layer,
            anchor: Edges::empty(),
            desired_width: 0,
            desired_height: 0,
            exclusive_zone: 0,
            margins: Margins::default(),
            output,
        }
    }

    /// The single edge an exclusive zone applies to. A surface anchored to
    /// one edge, or to one edge plus both perpendicular ones, has one.
    fn exclusive_edge(&self) -> Option<Edges> {
        let horizontal = Edges::LEFT | Edges::RIGHT;
        let vertical = Edges::TOP | Edges::BOTTOM;
        [Edges::TOP, Edges::BOTTOM, Edges::LEFT, Edges::RIGHT]
            .into_iter()
            .find(|edge| {
                let perpendicular = if vertical.contains(*edge) {
                    horizontal
                } else {
                    vertical
                };
                self.anchor == *edge || self.anchor == *edge | perpendicular
            })
    }
}

/// Margins, zones and sizes come from the client; the arithmetic is
/// done in `i64` and clamped back.
fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn place(start: i32, extent: i32, size: i32, low: bool, high: bool, m_low: i32, m_high: i32) -> i32 {
    let (start, extent, size) = (i64::from(start), i64::from(extent), i64::from(size));
    let (m_low, m_high) = (i64::from(m_low), i64::from(m_high));
    clamp_i32(match (low, high) {
        (true, true) => start + m_low + (extent - m_low - m_high - size) / 2,
        (true, false) => start + m_low,
        (false, true) => start + extent - size - m_high,
        (false, false) => start + (extent - size) / 2,
    })
}

/// Size along one axis: stretched between both anchors when `desired` is
/// zero, else `desired`. Never larger than `extent`, never below 1.
fn axis_size(desired: u32, stretch: bool, extent: i32, m_low: i32, m_high: i32) -> i32 {
    let extent = i64::from(extent.max(1));
    let size = if desired == 0 && stretch {
        extent - i64::from(m_low) - i64::from(m_high)
    } else {
        i64::from(desired)
    };
    clamp_i32(size.clamp(1, extent))
}

/// Box of a layer surface inside `bounds`.
pub fn arrange_layer(bounds: Rect, state: &LayerSurfaceState) -> Rect {
    let a = state.anchor;
    let m = state.margins;
    let width = axis_size(
        state.desired_width,
        a.contains(Edges::LEFT | Edges::RIGHT),
        bounds.width,
        m.left,
        m.right,
    );
    let height = axis_size(
        state.desired_height,
        a.contains(Edges::TOP | Edges::BOTTOM),
        bounds.height,
        m.top,
        m.bottom,
    );
    let x = place(
        bounds.x,
        bounds.width,
        width,
        a.contains(Edges::LEFT),
        a.contains(Edges::RIGHT),
        m.left,
        m.right,
    );
    let y = place(
        bounds.y,
        bounds.height,
        height,
        a.contains(Edges::TOP),
        a.contains(Edges::BOTTOM),
        m.top,
        m.bottom,
    );
    Rect::new(x, y, width, height)
}

/// Shrink `usable` by the surface's exclusive zone, at most down to an
/// empty box.
pub fn exclusive_area(usable: Rect, state: &LayerSurfaceState) -> Rect {
    if state.exclusive_zone <= 0 {
        return usable;
    }
    let Some(edge) = state.exclusive_edge() else {
        return usable;
    };
    let m = state.margins;
    let margin = if edge == Edges::TOP {
        m.top
    } else if edge == Edges::BOTTOM {
        m.bottom
    } else if edge == Edges::LEFT {
        m.left
    } else {
        m.right
    };
    let vertical = edge == Edges::TOP || edge == Edges::BOTTOM;
    let extent = (if vertical { usable.height } else { usable.width }).max(0);
    let d = clamp_i32(
        (i64::from(state.exclusive_zone) + i64::from(margin)).clamp(0, i64::from(extent)),
    );

    let mut r = usable;
    if edge == Edges::TOP {
        r.y = r.y.saturating_add(d);
        r.height = extent - d;
    } else if edge == Edges::BOTTOM {
        r.height = extent - d;
    } else if edge == Edges::LEFT {
        r.x = r.x.saturating_add(d);
        r.width = extent - d;
    } else {
        r.width = extent - d;
    }
    r
}

pub struct LayerView {
    handle: Box<dyn LayerHandle>,
    state: LayerSurfaceState,
    configured: Option<(u32, u32)>,
}

impl LayerView {
    pub fn new(handle: Box<dyn LayerHandle>, state: LayerSurfaceState) -> Self {
        Self {
            handle,
            state,
            configured: None,
        }
    }

    pub fn state(&self) -> &LayerSurfaceState {
        &self.state
    }

    /// The client committed new double-buffered state.
    pub fn commit(&mut self, state: LayerSurfaceState) {
        self.state = state;
    }
}

impl ViewImpl for LayerView {
    fn kind(&self) -> ViewKind {
        ViewKind::Layer
    }

    /// Layer surfaces take the size they are configured with.
    fn size(&self) -> (u32, u32) {
        self.configured.unwrap_or((
            self.state.desired_width.max(1),
            self.state.desired_height.max(1),
        ))
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if self.configured != Some((width, height)) {
            self.configured = Some((width, height));
            self.handle.configure(width, height);
        }
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

/// Layer handle without a client; counts configures.
#[derive(Debug, Clone)]
pub struct HeadlessLayer {
    surface: SurfaceId,
    configures: Rc<Cell<u32>>,
    closed: Rc<Cell<bool>>,
}

impl HeadlessLayer {
    pub fn new(surface: SurfaceId) -> Self {
        Self {
            surface,
            configures: Rc::new(Cell::new(0)),
            closed: Rc::new(Cell::new(false)),
        }
    }

    pub fn configure_count(&self) -> u32 {
        self.configures.get()
    }

    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl LayerHandle for HeadlessLayer {
    fn surface(&self) -> SurfaceId {
        self.surface
    }

    fn configure(&mut self, _width: u32, _height: u32) {
        self.configures.set(self.configures.get() + 1);
    }

    fn close(&mut self) {
        self.closed.set(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output() -> Rect {
        Rect::new(0, 0, 1920, 1080)
    }

    fn panel(anchor: Edges, height: u32, zone: i32) -> LayerSurfaceState {
        LayerSurfaceState {
            anchor,
            desired_height: height,
            exclusive_zone: zone,
            ..LayerSurfaceState::new(Layer::Top, OutputId(1))
        }
    }

    #[test]
    fn top_panel_stretches_horizontally() {
        let state = panel(Edges::TOP | Edges::LEFT | Edges::RIGHT, 30, 30);
        assert_eq!(arrange_layer(output(), &state), Rect::new(0, 0, 1920, 30));
        assert_eq!(exclusive_area(output(), &state), Rect::new(0, 30, 1920, 1050));
    }

    #[test]
    fn bottom_panel_with_margin() {
        let mut state = panel(Edges::BOTTOM | Edges::LEFT | Edges::RIGHT, 40, 40);
        state.margins.bottom = 5;
        assert_eq!(arrange_layer(output(), &state), Rect::new(0, 1035, 1920, 40));
        assert_eq!(exclusive_area(output(), &state), Rect::new(0, 0, 1920, 1035));
    }

    #[test]
    fn unanchored_surface_is_centered() {
        let state = LayerSurfaceState {
            desired_width: 200,
            desired_height: 100,
            ..LayerSurfaceState::new(Layer::Overlay, OutputId(1))
        };
        assert_eq!(arrange_layer(output(), &state), Rect::new(860, 490, 200, 100));
    }

    #[test]
    fn corner_anchor_has_no_exclusive_edge() {
        let state = panel(Edges::TOP | Edges::LEFT, 30, 30);
        assert_eq!(exclusive_area(output(), &state), output());
    }

    #[test]
    fn left_dock_reserves_width() {
        let state = LayerSurfaceState {
            anchor: Edges::LEFT,
            desired_width: 64,
            desired_height: 500,
            exclusive_zone: 64,
            ..LayerSurfaceState::new(Layer::Top, OutputId(1))
        };
        assert_eq!(arrange_layer(output(), &state), Rect::new(0, 290, 64, 500));
        assert_eq!(exclusive_area(output(), &state), Rect::new(64, 0, 1856, 1080));
    }

    #[test]
    fn extreme_margins_do_not_overflow() {
        let mut state = panel(Edges::TOP | Edges::LEFT | Edges::RIGHT, 30, 30);
        state.margins.top = i32::MAX;
        state.margins.left = i32::MAX;
        assert_eq!(exclusive_area(output(), &state), Rect::new(0, 1080, 1920, 0));
        let arranged = arrange_layer(output(), &state);
        assert_eq!((arranged.width, arranged.height), (1, 30));

        state.margins.top = i32::MIN;
        assert_eq!(exclusive_area(output(), &state), output());
    }

    #[test]
    fn huge_zone_reserves_at_most_the_output() {
        let state = LayerSurfaceState {
            anchor: Edges::LEFT,
            desired_width: 64,
            exclusive_zone: i32::MAX,
            margins: Margins {
                left: i32::MAX,
                ..Margins::default()
            },
            ..LayerSurfaceState::new(Layer::Top, OutputId(1))
        };
        assert_eq!(exclusive_area(output(), &state), Rect::new(1920, 0, 0, 1080));
    }

    #[test]
    fn oversized_surface_is_clamped_to_bounds() {
        let state = LayerSurfaceState {
            desired_width: u32::MAX,
            desired_height: u32::MAX,
            ..LayerSurfaceState::new(Layer::Overlay, OutputId(1))
        };
        assert_eq!(arrange_layer(output(), &state), output());
    }

    #[test]
    fn configure_only_on_change() {
        let handle = HeadlessLayer::new(SurfaceId(5));
        let mut view = LayerView::new(
            Box::new(handle.clone()),
            panel(Edges::TOP | Edges::LEFT | Edges::RIGHT, 30, 30),
        );
        view.set_size(1920, 30);
        view.set_size(1920, 30);
        assert_eq!(handle.configure_count(), 1);
        assert_eq!(view.size(), (1920, 30));
    }
}
