//! Checkout and return CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use toolcrib_core::result::AppResult;
use toolcrib_entity::checkout::Checkout;
use toolcrib_service::{CheckoutQueryService, ToolLifecycleManager};

use crate::output::{self, OutputFormat};

/// Arguments for checkout commands
#[derive(Debug, Args)]
pub struct CheckoutArgs {
    /// Checkout subcommand
    #[command(subcommand)]
    pub command: CheckoutCommand,
}

/// Checkout subcommands
#[derive(Debug, Subcommand)]
pub enum CheckoutCommand {
    /// List open checkouts, newest first
    List,
    /// Check a tool out to a user
    Out {
        /// Tool ID
        tool_id: i64,
        /// User ID
        #[arg(long)]
        user: i64,
        /// Rig or project site
        #[arg(long)]
        location: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: String,
    },
    /// Return a checked-out tool
    Return {
        /// Tool ID
        tool_id: i64,
        /// Condition on return (defaults to `inventory.default_return_condition`)
        #[arg(long)]
        condition: Option<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct CheckoutRow {
    id: i64,
    tool_id: i64,
    user_id: i64,
    project_location: String,
    due_date: String,
    checked_out_at: String,
    returned_at: String,
    condition: String,
}

impl From<&Checkout> for CheckoutRow {
    fn from(c: &Checkout) -> Self {
        Self {
            id: c.id,
            tool_id: c.tool_id,
            user_id: c.user_id,
            project_location: c.project_location.clone(),
            due_date: c.due_date.to_string(),
            checked_out_at: c.checked_out_at.format("%Y-%m-%d %H:%M").to_string(),
            returned_at: output::or_dash(c.returned_at.map(|at| at.format("%Y-%m-%d %H:%M"))),
            condition: output::or_dash(c.condition_on_return.as_deref()),
        }
    }
}

/// Execute checkout commands
pub async fn execute(
    args: &CheckoutArgs,
    config_path: &str,
    format: OutputFormat,
) -> AppResult<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;

    match &args.command {
        CheckoutCommand::List => {
            let open = CheckoutQueryService::new(store).list_open().await?;
            let rows: Vec<CheckoutRow> = open.iter().map(CheckoutRow::from).collect();
            output::print_list(&rows, format);
        }
        CheckoutCommand::Out {
            tool_id,
            user,
            location,
            due,
        } => {
            let checkout = ToolLifecycleManager::new(store)
                .checkout(*user, *tool_id, location, due)
                .await?;
            output::print_item(&CheckoutRow::from(&checkout), format);
        }
        CheckoutCommand::Return { tool_id, condition } => {
            let condition = condition
                .clone()
                .unwrap_or_else(|| config.inventory.default_return_condition.clone());
            let checkout = ToolLifecycleManager::new(store)
                .return_tool(*tool_id, Some(&condition))
                .await?;
            output::print_item(&CheckoutRow::from(&checkout), format);
        }
    }

    Ok(())
}
