//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ShelfConfig;
use crate::error::ShelfError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from the global file, an optional explicit file, and
    /// the environment.
    pub fn load(explicit_file: Option<&Path>) -> Result<ShelfConfig, ShelfError> {
        MergeService::load(explicit_file)
            .map_err(|e| ShelfError::ConfigError(format!("Failed to load configuration: {}", e)))
    }
}
