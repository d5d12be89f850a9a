//! Demo inventory seeding command.

use toolcrib_core::result::AppResult;
use toolcrib_service::Seeder;

use crate::output::{self, OutputFormat};

/// Execute the seed command
pub async fn execute(config_path: &str, format: OutputFormat) -> AppResult<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;

    let summary = Seeder::new(store).seed_if_empty().await?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Table if summary.is_empty() => {
            output::print_warning("Inventory already populated, nothing seeded.");
        }
        OutputFormat::Table => {
            output::print_success("Demo inventory installed.");
            output::print_kv("Tool types", &summary.tool_types.to_string());
            output::print_kv("Users", &summary.users.to_string());
            output::print_kv("Tools", &summary.tools.to_string());
        }
    }

    Ok(())
}
