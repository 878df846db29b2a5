//! Server-side window decoration configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecorationConfig {
    /// Title bar height in pixels (valid range: 10-64).
    pub titlebar_height: u32,
    /// Edge length of the square title bar buttons (valid range: 10-64).
    pub button_size: u32,
    /// Border around decorated windows in pixels (valid range: 0-8).
    pub border_width: u32,
}

impl Default for DecorationConfig {
    fn default() -> Self {
        Self {
            titlebar_height: 22,
            button_size: 22,
            border_width: 1,
        }
    }
}
