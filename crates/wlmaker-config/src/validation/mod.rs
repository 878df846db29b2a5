//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod hot_corner;
mod layout;
mod workspaces;

#[cfg(test)]
mod tests;

use crate::schema::WlmakerConfig;
use wlmaker_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &WlmakerConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    hot_corner::validate_hot_corner(&mut errors, config);
    workspaces::validate_workspaces(&mut errors, config);
    layout::validate_decoration(&mut errors, config);
    layout::validate_dock(&mut errors, config);
    layout::validate_menu(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
