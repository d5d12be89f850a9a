//! Application configuration schemas.
//!
//! All configuration structs are deserialized via the `config` crate from a
//! TOML file, an optional environment overlay and `TOOLCRIB__*` environment
//! variables. Every field carries a default, so an empty configuration is a
//! valid one.

pub mod app;
pub mod database;
pub mod inventory;
pub mod logging;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::database::DatabaseConfig;
pub use self::inventory::InventoryConfig;
pub use self::logging::LoggingConfig;

use crate::error::AppError;

/// Prefix for environment variable overrides (`TOOLCRIB__SERVER__PORT=9000`).
pub const ENV_PREFIX: &str = "TOOLCRIB";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Store backend settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Inventory behaviour settings.
    #[serde(default)]
    pub inventory: InventoryConfig,
}

impl AppConfig {
    /// Load configuration from `path`, overlaid with `config/{env}.toml`
    /// (resolved next to `path`) when `env` is given, then with
    /// `TOOLCRIB__SECTION__KEY` environment variables.
    ///
    /// Missing files are skipped.
    pub fn load(path: &str, env: Option<&str>) -> Result<Self, AppError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name(path).required(false));

        if let Some(env) = env {
            let dir = Path::new(path).parent().unwrap_or_else(|| Path::new("."));
            let overlay = dir.join(format!("{env}.toml"));
            tracing::debug!(overlay = %overlay.display(), "Adding environment config overlay");
            builder = builder.add_source(
                config::File::from(overlay)
                    .format(config::FileFormat::Toml)
                    .required(false),
            );
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
