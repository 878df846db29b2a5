//! Seat collaborator: keyboard and pointer focus towards clients.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use wlmaker_common::{Edges, SurfaceId};

use crate::input::{AxisEvent, ButtonEvent};

/// Keys held and modifiers latched at the time of a keyboard enter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    pub keycodes: Vec<u32>,
    pub modifiers: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CursorImage {
    #[default]
    Default,
    Grabbing,
    Resize(Edges),
}

pub trait Seat {
    fn keyboard_state(&self) -> KeyboardState;

    fn keyboard_enter(&mut self, surface: SurfaceId, state: &KeyboardState);

    fn keyboard_focus(&self) -> Option<SurfaceId>;

    fn keyboard_clear_focus(&mut self);

    fn set_cursor_image(&mut self, image: CursorImage);

    fn pointer_enter(&mut self, surface: SurfaceId, x: f64, y: f64);

    fn pointer_motion(&mut self, time_msec: u32, x: f64, y: f64);

    fn pointer_focus(&self) -> Option<SurfaceId>;

    fn pointer_clear_focus(&mut self);

    fn pointer_button(&mut self, event: &ButtonEvent);

    fn pointer_axis(&mut self, event: &AxisEvent);
}

/// What a [`HeadlessSeat`] forwarded to clients.
#[derive(Debug, Clone, PartialEq)]
pub enum SeatEvent {
    KeyboardEnter {
        surface: SurfaceId,
        state: KeyboardState,
    },
    KeyboardClear,
    PointerEnter {
        surface: SurfaceId,
        x: f64,
        y: f64,
    },
    PointerMotion {
        x: f64,
        y: f64,
    },
    PointerClear,
    Button(ButtonEvent),
    Axis(AxisEvent),
}

#[derive(Debug, Default)]
pub struct SeatState {
    pub keyboard: KeyboardState,
    pub keyboard_focus: Option<SurfaceId>,
    pub pointer_focus: Option<SurfaceId>,
    pub cursor_image: CursorImage,
    pub events: Vec<SeatEvent>,
}

/// Seat without a backend. Focus is tracked and every client-facing event
/// is recorded. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSeat {
    state: Rc<RefCell<SeatState>>,
}

impl HeadlessSeat {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Ref<'_, SeatState> {
        self.state.borrow()
    }

    pub fn press_key(&self, keycode: u32) {
        let mut state = self.state.borrow_mut();
        if !state.keyboard.keycodes.contains(&keycode) {
            state.keyboard.keycodes.push(keycode);
        }
    }

    pub fn release_key(&self, keycode: u32) {
        self.state
            .borrow_mut()
            .keyboard
            .keycodes
            .retain(|k| *k != keycode);
    }

    pub fn set_modifiers(&self, modifiers: u32) {
        self.state.borrow_mut().keyboard.modifiers = modifiers;
    }

    pub fn take_events(&self) -> Vec<SeatEvent> {
        std::mem::take(&mut self.state.borrow_mut().events)
    }

    pub fn cursor_image(&self) -> CursorImage {
        self.state.borrow().cursor_image
    }
}

impl Seat for HeadlessSeat {
    fn keyboard_state(&self) -> KeyboardState {
        self.state.borrow().keyboard.clone()
    }

    fn keyboard_enter(&mut self, surface: SurfaceId, state: &KeyboardState) {
        let mut s = self.state.borrow_mut();
        s.keyboard_focus = Some(surface);
        s.events.push(SeatEvent::KeyboardEnter {
            surface,
            state: state.clone(),
        });
    }

    fn keyboard_focus(&self) -> Option<SurfaceId> {
        self.state.borrow().keyboard_focus
    }

    fn keyboard_clear_focus(&mut self) {
        let mut s = self.state.borrow_mut();
        if s.keyboard_focus.take().is_some() {
            s.events.push(SeatEvent::KeyboardClear);
        }
    }

    fn set_cursor_image(&mut self, image: CursorImage) {
        self.state.borrow_mut().cursor_image = image;
    }

    fn pointer_enter(&mut self, surface: SurfaceId, x: f64, y: f64) {
        let mut s = self.state.borrow_mut();
        s.pointer_focus = Some(surface);
        s.events.push(SeatEvent::PointerEnter { surface, x, y });
    }

    fn pointer_motion(&mut self, _time_msec: u32, x: f64, y: f64) {
        let mut s = self.state.borrow_mut();
        if s.pointer_focus.is_some() {
            s.events.push(SeatEvent::PointerMotion { x, y });
        }
    }

    fn pointer_focus(&self) -> Option<SurfaceId> {
        self.state.borrow().pointer_focus
    }

    fn pointer_clear_focus(&mut self) {
        let mut s = self.state.borrow_mut();
        if s.pointer_focus.take().is_some() {
            s.events.push(SeatEvent::PointerClear);
        }
    }

    fn pointer_button(&mut self, event: &ButtonEvent) {
        let mut s = self.state.borrow_mut();
        if s.pointer_focus.is_some() {
            s.events.push(SeatEvent::Button(*event));
        }
    }

    fn pointer_axis(&mut self, event: &AxisEvent) {
        let mut s = self.state.borrow_mut();
        if s.pointer_focus.is_some() {
            s.events.push(SeatEvent::Axis(*event));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::BTN_LEFT;

    #[test]
    fn keyboard_enter_carries_held_keys() {
        let seat = HeadlessSeat::new();
        seat.press_key(30);
        seat.press_key(30);
        seat.set_modifiers(4);

        let mut handle = seat.clone();
        let state = handle.keyboard_state();
        handle.keyboard_enter(SurfaceId(1), &state);

        assert_eq!(handle.keyboard_focus(), Some(SurfaceId(1)));
        assert_eq!(
            seat.take_events(),
            vec![SeatEvent::KeyboardEnter {
                surface: SurfaceId(1),
                state: KeyboardState {
                    keycodes: vec![30],
                    modifiers: 4
                },
            }]
        );
    }

    #[test]
    fn clearing_unfocused_keyboard_is_silent() {
        let mut seat = HeadlessSeat::new();
        seat.keyboard_clear_focus();
        assert!(seat.take_events().is_empty());
    }

    #[test]
    fn pointer_events_need_focus() {
        let mut seat = HeadlessSeat::new();
        seat.pointer_button(&ButtonEvent::pressed(BTN_LEFT));
        assert!(seat.take_events().is_empty());

        seat.pointer_enter(SurfaceId(2), 1.0, 2.0);
        seat.pointer_button(&ButtonEvent::pressed(BTN_LEFT));
        seat.pointer_clear_focus();
        assert_eq!(seat.take_events().len(), 3);
        assert_eq!(seat.pointer_focus(), None);
    }
}
