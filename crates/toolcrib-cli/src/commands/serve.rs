//! Start the Toolcrib server.

use clap::Args;

use toolcrib_core::result::AppResult;

/// Arguments for the serve command
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Override the server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the server host
    #[arg(long)]
    pub host: Option<String>,

    /// Seed the demo inventory if the store is empty
    #[arg(long)]
    pub seed: bool,
}

/// Execute the serve command
pub async fn execute(args: &ServeArgs, config_path: &str) -> AppResult<()> {
    let mut config = super::load_config(config_path)?;

    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if args.seed {
        config.inventory.seed_on_startup = true;
    }

    println!("Starting Toolcrib server...");
    println!("  Host:  {}", config.server.host);
    println!("  Port:  {}", config.server.port);
    println!("  Store: {}", config.database.provider);

    let store = super::open_store(&config).await?;
    toolcrib_api::run_server(config, store).await
}
