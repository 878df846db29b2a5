//! Where the config lives, and writing the commented default.

use std::io::Write;
use std::path::{Path, PathBuf};

use wlmaker_common::ConfigError;

use super::template::default_config_toml;

/// `$XDG_CONFIG_HOME/wlmaker/config.toml` or the platform equivalent.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("wlmaker").join("config.toml"))
        .ok_or_else(|| ConfigError::ParseError("no config directory on this platform".into()))
}

/// Write the commented default config to `path`, creating parents. An
/// existing file is left untouched; returns whether one was written.
pub fn create_default_config(path: &Path) -> Result<bool, ConfigError> {
    let io_error = |what: &str, e: std::io::Error| {
        ConfigError::ParseError(format!("{what} {}: {e}", path.display()))
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| io_error("cannot create directory for", e))?;
    }
    let mut file = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
    {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(false),
        Err(e) => return Err(io_error("cannot create", e)),
    };
    file.write_all(default_config_toml().as_bytes())
        .map_err(|e| io_error("cannot write", e))?;

    tracing::info!(path = %path.display(), "default config written");
    Ok(true)
}
