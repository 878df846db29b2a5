//! Hot-corner validation.

use crate::schema::WlmakerConfig;
use wlmaker_common::Action;

use super::helpers::validate_range;

pub(crate) fn validate_hot_corner(errors: &mut Vec<String>, config: &WlmakerConfig) {
    let hc = &config.hot_corner;
    validate_range(
        errors,
        "hot_corner.trigger_delay_ms",
        hc.trigger_delay_ms,
        0,
        10_000,
    );

    let actions = [
        ("top_left_enter", &hc.top_left_enter),
        ("top_left_leave", &hc.top_left_leave),
        ("top_right_enter", &hc.top_right_enter),
        ("top_right_leave", &hc.top_right_leave),
        ("bottom_left_enter", &hc.bottom_left_enter),
        ("bottom_left_leave", &hc.bottom_left_leave),
        ("bottom_right_enter", &hc.bottom_right_enter),
        ("bottom_right_leave", &hc.bottom_right_leave),
    ];
    for (name, action) in actions {
        if let Action::Launch(command) = action {
            if command.trim().is_empty() {
                errors.push(format!("hot_corner.{name} launches an empty command"));
            }
        }
    }
}
