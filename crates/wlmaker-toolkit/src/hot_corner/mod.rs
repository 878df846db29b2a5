//! Hot corners: dwelling in a corner of the output layout runs an action.
//!
//! States: no corner, occupying a corner (timer armed), triggered (enter
//! action ran). Leaving a triggered corner runs its leave action once.
//! Moving straight from one corner to another clears the first before
//! occupying the second.


use std::time::Duration;

use wlmaker_common::{Action, Edges, Point, Rect};
use wlmaker_config::schema::HotCornerConfig;

use crate::timer::{TimerId, TimerService};

/// Corner of `extents` the pixel `(x, y)` is in, or empty.
pub fn corner_for(extents: Rect, x: i32, y: i32) -> Edges {
    if extents.is_empty() {
        return Edges::empty();
    }
    let mut edges = Edges::empty();
    if x == extents.x {
        edges |= Edges::LEFT;
    } else if x >= extents.x + extents.width - 1 {
        edges |= Edges::RIGHT;
    }
    if y == extents.y {
        edges |= Edges::TOP;
    } else if y >= extents.y + extents.height - 1 {
        edges |= Edges::BOTTOM;
    }
    if edges.is_corner() {
        edges
    } else {
        Edges::empty()
    }
}

#[derive(Debug)]
pub struct HotCorner {
    extents: Rect,
    position: Point,
    corner: Edges,
    timer: Option<TimerId>,
    triggered: bool,
    delay: Duration,
    config: HotCornerConfig,
}

impl HotCorner {
    pub fn new(config: &HotCornerConfig) -> Self {
        Self {
            extents: Rect::default(),
            position: Point::default(),
            corner: Edges::empty(),
            timer: None,
            triggered: false,
            delay: Duration::from_millis(config.trigger_delay_ms),
            config: config.clone(),
        }
    }

    pub fn corner(&self) -> Edges {
        self.corner
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    pub fn extents(&self) -> Rect {
        self.extents
    }

    /// The output layout changed.
    pub fn update_extents(&mut self, timers: &mut dyn TimerService, extents: Rect) -> Vec<Action> {
        self.extents = extents;
        self.evaluate(timers)
    }

    /// The pointer moved.
    pub fn update_position(&mut self, timers: &mut dyn TimerService, x: f64, y: f64) -> Vec<Action> {
        self.position = Point::new(x, y);
        self.evaluate(timers)
    }

    /// The debounce timer fired. Returns the enter action, if configured.
    pub fn on_timer(&mut self, id: TimerId) -> Option<Action> {
        if self.timer != Some(id) || self.corner.is_empty() || self.triggered {
            return None;
        }
        self.triggered = true;
        tracing::debug!(corner = ?self.corner, "hot corner triggered");
        Some(self.enter_action(self.corner).clone()).filter(|a| !a.is_none())
    }

    /// Leave whatever corner is occupied, e.g. on teardown.
    pub fn clear(&mut self, timers: &mut dyn TimerService) -> Vec<Action> {
        if let Some(id) = self.timer.take() {
            timers.cancel(id);
        }
        self.leave_corner()
    }

    fn evaluate(&mut self, timers: &mut dyn TimerService) -> Vec<Action> {
        let (x, y) = self.position.floor();
        let corner = corner_for(self.extents, x, y);
        if corner == self.corner {
            return Vec::new();
        }

        if corner.is_empty() {
            return self.clear(timers);
        }
        let actions = self.leave_corner();
        self.occupy(timers, corner);
        actions
    }

    fn leave_corner(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        if self.triggered {
            let leave = self.leave_action(self.corner).clone();
            tracing::debug!(corner = ?self.corner, "hot corner left after trigger");
            if !leave.is_none() {
                actions.push(leave);
            }
        }
        self.corner = Edges::empty();
        self.triggered = false;
        actions
    }

    fn occupy(&mut self, timers: &mut dyn TimerService, corner: Edges) {
        let timer = match self.timer {
            Some(id) if timers.rearm(id, self.delay) => id,
            _ => timers.arm(self.delay),
        };
        self.timer = Some(timer);
        self.corner = corner;
        self.triggered = false;
        tracing::debug!(?corner, %timer, "hot corner occupied");
    }

    fn enter_action(&self, corner: Edges) -> &Action {
        let c = &self.config;
        match corner {
            e if e == Edges::TOP | Edges::LEFT => &c.top_left_enter,
            e if e == Edges::TOP | Edges::RIGHT => &c.top_right_enter,
            e if e == Edges::BOTTOM | Edges::LEFT => &c.bottom_left_enter,
            _ => &c.bottom_right_enter,
        }
    }

    fn leave_action(&self, corner: Edges) -> &Action {
        let c = &self.config;
        match corner {
            e if e == Edges::TOP | Edges::LEFT => &c.top_left_leave,
            e if e == Edges::TOP | Edges::RIGHT => &c.top_right_leave,
            e if e == Edges::BOTTOM | Edges::LEFT => &c.bottom_left_leave,
            _ => &c.bottom_right_leave,
        }
    }
}
