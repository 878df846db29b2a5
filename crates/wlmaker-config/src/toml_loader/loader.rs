//! Reading a config file into [`WlmakerConfig`].

use std::io::ErrorKind;
use std::path::Path;

use wlmaker_common::ConfigError;

use super::paths::{create_default_config, default_config_path};
use crate::schema::WlmakerConfig;

/// Parse the TOML file at `path`. Missing sections and fields take their
/// defaults; ranges are checked by [`crate::validation`], not here.
pub fn load_from_path(path: &Path) -> Result<WlmakerConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
        _ => ConfigError::ParseError(format!("cannot read {}: {e}", path.display())),
    })?;
    let config = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("{}: {e}", path.display())))?;
    tracing::info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load the platform default file. A missing file is created with the
/// commented template and the defaults are returned.
pub fn load_default() -> Result<WlmakerConfig, ConfigError> {
    let path = default_config_path()?;
    match load_from_path(&path) {
        Err(ConfigError::FileNotFound(_)) => {
            create_default_config(&path)?;
            Ok(WlmakerConfig::default())
        }
        result => result,
    }
}
