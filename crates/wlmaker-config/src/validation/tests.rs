//! Tests for the full validation pipeline.

use super::*;
use crate::schema::*;
use wlmaker_common::Action;

#[test]
fn default_config_validates() {
    let config = WlmakerConfig::default();
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_trigger_delay_too_large() {
    let mut config = WlmakerConfig::default();
    config.hot_corner.trigger_delay_ms = 60_000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("hot_corner.trigger_delay_ms"));
}

#[test]
fn zero_trigger_delay_is_allowed() {
    let mut config = WlmakerConfig::default();
    config.hot_corner.trigger_delay_ms = 0;
    assert!(validate(&config).is_ok());
}

#[test]
fn catches_empty_launch_command_in_hot_corner() {
    let mut config = WlmakerConfig::default();
    config.hot_corner.bottom_left_enter = Action::Launch("  ".into());
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("hot_corner.bottom_left_enter"));
}

#[test]
fn catches_no_workspaces() {
    let mut config = WlmakerConfig::default();
    config.workspaces.names.clear();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("workspaces.names"));
}

#[test]
fn catches_duplicate_workspace_names() {
    let mut config = WlmakerConfig::default();
    config.workspaces.names = vec!["Main".into(), "Main".into()];
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("'Main' twice"));
}

#[test]
fn catches_titlebar_too_small() {
    let mut config = WlmakerConfig::default();
    config.decoration.titlebar_height = 4;
    config.decoration.button_size = 4;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("decoration.titlebar_height"));
}

#[test]
fn catches_button_larger_than_titlebar() {
    let mut config = WlmakerConfig::default();
    config.decoration.button_size = 40;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("exceeds decoration.titlebar_height"));
}

#[test]
fn catches_tile_size_out_of_range() {
    let mut config = WlmakerConfig::default();
    config.dock.tile_size = 8;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("dock.tile_size"));
}

#[test]
fn catches_empty_launcher_command() {
    let mut config = WlmakerConfig::default();
    config.dock.launchers.push(LauncherConfig {
        name: "Broken".into(),
        command: String::new(),
    });
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("'Broken'"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = WlmakerConfig::default();
    config.menu.item_height = 0;
    config.menu.width = 5000;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("menu.item_height"));
    assert!(err.contains("menu.width"));
}
