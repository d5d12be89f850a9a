//! CLI command definitions and dispatch.

pub mod checkout;
pub mod migrate;
pub mod seed;
pub mod serve;
pub mod tool;
pub mod tool_type;
pub mod user;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use toolcrib_core::config::AppConfig;
use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_database::store::{self, InventoryStore};

use crate::output::OutputFormat;

/// Toolcrib: MWD tool checkout and return tracking
#[derive(Debug, Parser)]
#[command(name = "toolcrib", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(serve::ServeArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Install the demo inventory into an empty store
    Seed,
    /// User management
    User(user::UserArgs),
    /// Tool type management
    ToolType(tool_type::ToolTypeArgs),
    /// Tool registry and calibration
    Tool(tool::ToolArgs),
    /// Check tools out and back in
    Checkout(checkout::CheckoutArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> AppResult<()> {
        match &self.command {
            Commands::Serve(args) => serve::execute(args, &self.config).await,
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Seed => seed::execute(&self.config, self.format).await,
            Commands::User(args) => user::execute(args, &self.config, self.format).await,
            Commands::ToolType(args) => tool_type::execute(args, &self.config, self.format).await,
            Commands::Tool(args) => tool::execute(args, &self.config, self.format).await,
            Commands::Checkout(args) => checkout::execute(args, &self.config, self.format).await,
        }
    }
}

/// Helper: load configuration from file, honouring `TOOLCRIB_ENV`
pub fn load_config(config_path: &str) -> AppResult<AppConfig> {
    let env = std::env::var("TOOLCRIB_ENV").ok();
    AppConfig::load(config_path, env.as_deref())
}

/// Helper: open the configured store
pub async fn open_store(config: &AppConfig) -> AppResult<Arc<dyn InventoryStore>> {
    store::connect(&config.database).await
}

/// Helper: ask before a destructive action unless `force` is set
pub fn confirm(prompt: &str, force: bool) -> AppResult<bool> {
    if force {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
