//! Configuration schema types for wlmaker.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod decoration;
mod dock;
mod hot_corner;
mod menu;
mod system;
mod workspaces;

pub use decoration::*;
pub use dock::*;
pub use hot_corner::*;
pub use menu::*;
pub use system::*;
pub use workspaces::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration.
///
/// Only override what you want to change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct WlmakerConfig {
    pub hot_corner: HotCornerConfig,
    pub workspaces: WorkspacesConfig,
    pub decoration: DecorationConfig,
    pub dock: DockConfig,
    pub menu: MenuConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
