//! XDG Base Directory utilities for shelf data and config.

use crate::error::ShelfError;
use std::path::PathBuf;

const APP_DIR: &str = "devshelf";

/// Get XDG data home directory
///
/// Returns `$XDG_DATA_HOME` if set, otherwise defaults to `$HOME/.local/share`
/// Follows XDG Base Directory Specification
pub fn data_home() -> Option<PathBuf> {
    if let Ok(xdg_data_home) = std::env::var("XDG_DATA_HOME") {
        if !xdg_data_home.is_empty() {
            return Some(PathBuf::from(xdg_data_home));
        }
    }

    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".local").join("share"))
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Result<PathBuf, ShelfError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        ShelfError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Default data directory: `$XDG_DATA_HOME/devshelf/`
///
/// Not created here; the file store creates it on first write.
pub fn default_data_dir() -> Result<PathBuf, ShelfError> {
    let data_home = data_home().ok_or_else(|| {
        ShelfError::ConfigError(
            "Could not determine XDG data home directory (HOME not set)".to_string(),
        )
    })?;
    Ok(data_home.join(APP_DIR))
}

/// Global config file: `$XDG_CONFIG_HOME/devshelf/config.toml`
pub fn global_config_path() -> Result<PathBuf, ShelfError> {
    Ok(config_home()?.join(APP_DIR).join("config.toml"))
}
