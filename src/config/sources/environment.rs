//! Environment variable source: DEVSHELF_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Environment variable prefix, e.g. `DEVSHELF__STORAGE__DATA_DIR`.
pub const ENV_PREFIX: &str = "DEVSHELF";

/// Add environment variable overlay to builder.
/// Uses DEVSHELF prefix and __ as separator for nested keys.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
