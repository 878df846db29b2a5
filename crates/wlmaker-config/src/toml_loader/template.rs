//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# wlmaker configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[hot_corner]
# trigger_delay_ms = 500       # 0-10000
# Actions: "none", "lock_screen", "inhibit_lock_begin", "inhibit_lock_end",
# "quit", "workspace_previous", "workspace_next", "window_raise",
# "window_lower", "window_toggle_maximized", "window_toggle_fullscreen",
# "window_toggle_shaded", "window_iconify", "window_close",
# or { launch = "command" }.
# top_left_enter = "lock_screen"
# top_left_leave = "none"
# top_right_enter = "inhibit_lock_begin"
# top_right_leave = "inhibit_lock_end"
# bottom_left_enter = "none"
# bottom_left_leave = "none"
# bottom_right_enter = "none"
# bottom_right_leave = "none"

[workspaces]
# names = ["Main", "Work", "Media"]   # 1-16 unique names

[decoration]
# titlebar_height = 22         # 10-64
# button_size = 22             # 10-64, at most titlebar_height
# border_width = 1             # 0-8

[dock]
# enabled = true
# edge = "right"               # "left" or "right"
# tile_size = 64               # 16-256
#
# [[dock.launchers]]
# name = "Terminal"
# command = "foot"

[menu]
# item_height = 20             # 10-64
# width = 200                  # 50-800
#
# [[menu.items]]
# label = "Lock Screen"
# action = "lock_screen"

[logging]
# level = "INFO"               # TRACE, DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
