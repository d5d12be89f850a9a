//! Database migration management commands.

use clap::{Args, Subcommand};

use toolcrib_core::result::AppResult;
use toolcrib_database::{apply_schema, open_pool};

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> AppResult<()> {
    let config = super::load_config(config_path)?;

    match &args.command {
        MigrateCommand::Run => {
            if config.database.provider != "postgres" {
                output::print_warning(&format!(
                    "Store provider '{}' has no migrations",
                    config.database.provider
                ));
                return Ok(());
            }

            let pool = open_pool(&config.database).await?;
            apply_schema(&pool).await?;
            output::print_success("Inventory schema is up to date.");
        }
    }

    Ok(())
}
