//! Pointer input events as delivered by the input backend.

use serde::{Deserialize, Serialize};

pub const BTN_LEFT: u32 = 0x110;
pub const BTN_RIGHT: u32 = 0x111;
pub const BTN_MIDDLE: u32 = 0x112;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonEvent {
    #[serde(default)]
    pub time_msec: u32,
    pub button: u32,
    pub state: ButtonState,
}

impl ButtonEvent {
    pub fn pressed(button: u32) -> Self {
        Self {
            time_msec: 0,
            button,
            state: ButtonState::Pressed,
        }
    }

    pub fn released(button: u32) -> Self {
        Self {
            time_msec: 0,
            button,
            state: ButtonState::Released,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.state == ButtonState::Pressed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrientation {
    Vertical,
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisEvent {
    #[serde(default)]
    pub time_msec: u32,
    pub orientation: AxisOrientation,
    pub delta: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn button_event_from_json() {
        let ev: ButtonEvent =
            serde_json::from_str(r#"{"button": 272, "state": "pressed"}"#).unwrap();
        assert_eq!(ev, ButtonEvent::pressed(BTN_LEFT));
        assert!(ev.is_pressed());
    }

    #[test]
    fn axis_event_from_json() {
        let ev: AxisEvent =
            serde_json::from_str(r#"{"orientation": "vertical", "delta": -15.0}"#).unwrap();
        assert_eq!(ev.orientation, AxisOrientation::Vertical);
        assert_eq!(ev.time_msec, 0);
    }
}
