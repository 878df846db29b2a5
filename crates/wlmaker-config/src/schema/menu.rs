//! Root menu configuration.

use serde::{Deserialize, Serialize};
use wlmaker_common::Action;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItemConfig {
    pub label: String,
    pub action: Action,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Height of one menu entry in pixels (valid range: 10-64).
    pub item_height: u32,
    /// Menu width in pixels (valid range: 50-800).
    pub width: u32,
    pub items: Vec<MenuItemConfig>,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            item_height: 20,
            width: 200,
            items: Action::menu_actions()
                .into_iter()
                .map(|action| MenuItemConfig {
                    label: action.label().to_string(),
                    action,
                })
                .collect(),
        }
    }
}
