//! Hot-corner configuration: dwell delay and per-corner actions.

use serde::{Deserialize, Serialize};
use wlmaker_common::Action;

/// Actions to run when the pointer dwells in, or leaves, a screen corner.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HotCornerConfig {
    /// Time the pointer must rest in a corner before the enter action fires
    /// (valid range: 0-10000 ms).
    pub trigger_delay_ms: u64,
    pub top_left_enter: Action,
    pub top_left_leave: Action,
    pub top_right_enter: Action,
    pub top_right_leave: Action,
    pub bottom_left_enter: Action,
    pub bottom_left_leave: Action,
    pub bottom_right_enter: Action,
    pub bottom_right_leave: Action,
}

impl Default for HotCornerConfig {
    fn default() -> Self {
        Self {
            trigger_delay_ms: 500,
            top_left_enter: Action::LockScreen,
            top_left_leave: Action::None,
            top_right_enter: Action::InhibitLockBegin,
            top_right_leave: Action::InhibitLockEnd,
            bottom_left_enter: Action::None,
            bottom_left_leave: Action::None,
            bottom_right_enter: Action::None,
            bottom_right_leave: Action::None,
        }
    }
}
