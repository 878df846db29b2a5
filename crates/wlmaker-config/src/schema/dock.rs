//! Dock configuration: placement, tile size and launchers.

use serde::{Deserialize, Serialize};

/// Screen edge the dock is pinned to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum DockEdge {
    Left,
    #[default]
    Right,
}

/// One launcher tile.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LauncherConfig {
    pub name: String,
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DockConfig {
    pub enabled: bool,
    pub edge: DockEdge,
    /// Tile edge length in pixels (valid range: 16-256).
    pub tile_size: u32,
    pub launchers: Vec<LauncherConfig>,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            edge: DockEdge::Right,
            tile_size: 64,
            launchers: vec![LauncherConfig {
                name: "Terminal".into(),
                command: "foot".into(),
            }],
        }
    }
}
