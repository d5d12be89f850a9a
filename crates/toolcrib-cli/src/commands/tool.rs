//! Tool registry CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use toolcrib_core::result::AppResult;
use toolcrib_entity::tool::{CreateTool, Tool};
use toolcrib_service::{ToolLifecycleManager, ToolService};

use crate::output::{self, OutputFormat};

/// Arguments for tool commands
#[derive(Debug, Args)]
pub struct ToolArgs {
    /// Tool subcommand
    #[command(subcommand)]
    pub command: ToolCommand,
}

/// Tool subcommands
#[derive(Debug, Subcommand)]
pub enum ToolCommand {
    /// List tools
    List {
        /// Only tools whose name or serial contains this text
        #[arg(short, long)]
        search: Option<String>,
        /// Only tools that can be checked out
        #[arg(long, conflicts_with = "search")]
        available: bool,
    },
    /// Register a tool
    Add {
        /// Descriptive name
        name: String,
        /// Serial number
        serial_number: String,
        /// Tool type ID
        #[arg(long = "type")]
        type_id: Option<i64>,
        /// Storage location
        #[arg(long)]
        location: Option<String>,
    },
    /// Record a calibration (forces the tool back to available)
    Calibrate {
        /// Tool ID
        id: i64,
    },
    /// Delete a tool
    Delete {
        /// Tool ID
        id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct ToolRow {
    id: i64,
    serial_number: String,
    name: String,
    type_id: String,
    location: String,
    status: String,
    last_calibrated: String,
}

impl From<&Tool> for ToolRow {
    fn from(t: &Tool) -> Self {
        Self {
            id: t.id,
            serial_number: t.serial_number.clone(),
            name: t.name.clone(),
            type_id: output::or_dash(t.type_id),
            location: output::or_dash(t.location.as_deref()),
            status: t.status.to_string(),
            last_calibrated: output::or_dash(
                t.last_calibrated.map(|at| at.format("%Y-%m-%d %H:%M")),
            ),
        }
    }
}

/// Execute tool commands
pub async fn execute(args: &ToolArgs, config_path: &str, format: OutputFormat) -> AppResult<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;
    let tools = ToolService::new(store.clone());

    match &args.command {
        ToolCommand::List { search, available } => {
            let found = match (search, available) {
                (_, true) => tools.list_available().await?,
                (Some(query), false) => tools.search(query).await?,
                (None, false) => tools.list().await?,
            };
            let rows: Vec<ToolRow> = found.iter().map(ToolRow::from).collect();
            output::print_list(&rows, format);
        }
        ToolCommand::Add {
            name,
            serial_number,
            type_id,
            location,
        } => {
            let tool = tools
                .register(CreateTool {
                    name: name.clone(),
                    serial_number: serial_number.clone(),
                    type_id: *type_id,
                    location: location.clone(),
                })
                .await?;
            output::print_item(&ToolRow::from(&tool), format);
        }
        ToolCommand::Calibrate { id } => {
            let before = tools.get(*id).await?;
            let tool = ToolLifecycleManager::new(store).calibrate(*id).await?;
            if before.is_checked_out() {
                output::print_warning(&format!(
                    "Tool {} was checked out; its checkout record is still open",
                    tool.serial_number
                ));
            }
            output::print_item(&ToolRow::from(&tool), format);
        }
        ToolCommand::Delete { id, force } => {
            let tool = tools.get(*id).await?;
            let prompt = format!("Delete tool {} ({})?", tool.serial_number, tool.name);
            if !super::confirm(&prompt, *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            tools.delete(tool.id).await?;
            output::print_success(&format!("Tool {} deleted", tool.serial_number));
        }
    }

    Ok(())
}
