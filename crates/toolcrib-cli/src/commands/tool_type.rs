//! Tool type CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use toolcrib_core::result::AppResult;
use toolcrib_entity::tool_type::{CreateToolType, ToolType};
use toolcrib_service::ToolTypeService;

use crate::output::{self, OutputFormat};

/// Arguments for tool type commands
#[derive(Debug, Args)]
pub struct ToolTypeArgs {
    /// Tool type subcommand
    #[command(subcommand)]
    pub command: ToolTypeCommand,
}

/// Tool type subcommands
#[derive(Debug, Subcommand)]
pub enum ToolTypeCommand {
    /// List all tool types
    List,
    /// Add a tool type
    Add {
        /// Category name
        name: String,
        /// Description
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Debug, Serialize, Tabled)]
struct ToolTypeRow {
    id: i64,
    name: String,
    description: String,
}

impl From<&ToolType> for ToolTypeRow {
    fn from(t: &ToolType) -> Self {
        Self {
            id: t.id,
            name: t.name.clone(),
            description: output::or_dash(t.description.as_deref()),
        }
    }
}

/// Execute tool type commands
pub async fn execute(
    args: &ToolTypeArgs,
    config_path: &str,
    format: OutputFormat,
) -> AppResult<()> {
    let config = super::load_config(config_path)?;
    let service = ToolTypeService::new(super::open_store(&config).await?);

    match &args.command {
        ToolTypeCommand::List => {
            let rows: Vec<ToolTypeRow> =
                service.list().await?.iter().map(ToolTypeRow::from).collect();
            output::print_list(&rows, format);
        }
        ToolTypeCommand::Add { name, description } => {
            let tool_type = service
                .create(CreateToolType {
                    name: name.clone(),
                    description: description.clone(),
                })
                .await?;
            output::print_item(&ToolTypeRow::from(&tool_type), format);
        }
    }

    Ok(())
}
