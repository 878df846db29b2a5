//! Decoration, dock and menu geometry validation.

use crate::schema::WlmakerConfig;

use super::helpers::validate_range;

pub(crate) fn validate_decoration(errors: &mut Vec<String>, config: &WlmakerConfig) {
    let d = &config.decoration;
    validate_range(errors, "decoration.titlebar_height", d.titlebar_height, 10, 64);
    validate_range(errors, "decoration.button_size", d.button_size, 10, 64);
    validate_range(errors, "decoration.border_width", d.border_width, 0, 8);
    if d.button_size > d.titlebar_height {
        errors.push(format!(
            "decoration.button_size = {} exceeds decoration.titlebar_height = {}",
            d.button_size, d.titlebar_height
        ));
    }
}

pub(crate) fn validate_dock(errors: &mut Vec<String>, config: &WlmakerConfig) {
    validate_range(errors, "dock.tile_size", config.dock.tile_size, 16, 256);
    for launcher in &config.dock.launchers {
        if launcher.command.trim().is_empty() {
            errors.push(format!("dock launcher '{}' has an empty command", launcher.name));
        }
    }
}

pub(crate) fn validate_menu(errors: &mut Vec<String>, config: &WlmakerConfig) {
    validate_range(errors, "menu.item_height", config.menu.item_height, 10, 64);
    validate_range(errors, "menu.width", config.menu.width, 50, 800);
}
