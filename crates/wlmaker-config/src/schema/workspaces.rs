//! Workspace configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspacesConfig {
    /// Workspace names, in switching order (1-16 entries, unique).
    pub names: Vec<String>,
}

impl Default for WorkspacesConfig {
    fn default() -> Self {
        Self {
            names: vec!["Main".into(), "Work".into(), "Media".into()],
        }
    }
}
