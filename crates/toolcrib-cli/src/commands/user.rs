//! User management CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use toolcrib_core::result::AppResult;
use toolcrib_entity::user::{CreateUser, User};
use toolcrib_service::UserService;

use crate::output::{self, OutputFormat};

/// Arguments for user commands
#[derive(Debug, Args)]
pub struct UserArgs {
    /// User subcommand
    #[command(subcommand)]
    pub command: UserCommand,
}

/// User subcommands
#[derive(Debug, Subcommand)]
pub enum UserCommand {
    /// List all users
    List,
    /// Add a user
    Add {
        /// Username
        username: String,
        /// Display name
        #[arg(long)]
        full_name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Role tag (defaults to `inventory.default_role`)
        #[arg(long)]
        role: Option<String>,
    },
    /// Delete a user
    Delete {
        /// User ID
        id: i64,
        /// Skip confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// User display row for table output
#[derive(Debug, Serialize, Tabled)]
struct UserRow {
    /// User ID
    id: i64,
    /// Username
    username: String,
    /// Full name
    full_name: String,
    /// Email
    email: String,
    /// Role
    role: String,
}

impl From<&User> for UserRow {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            full_name: output::or_dash(u.full_name.as_deref()),
            email: output::or_dash(u.email.as_deref()),
            role: u.role.clone(),
        }
    }
}

/// Execute user commands
pub async fn execute(args: &UserArgs, config_path: &str, format: OutputFormat) -> AppResult<()> {
    let config = super::load_config(config_path)?;
    let store = super::open_store(&config).await?;
    let users = UserService::new(store, config.inventory.default_role.clone());

    match &args.command {
        UserCommand::List => {
            let rows: Vec<UserRow> = users.list().await?.iter().map(UserRow::from).collect();
            output::print_list(&rows, format);
        }
        UserCommand::Add {
            username,
            full_name,
            email,
            role,
        } => {
            let user = users
                .create(CreateUser {
                    username: username.clone(),
                    full_name: full_name.clone(),
                    email: email.clone(),
                    role: role.clone().unwrap_or_default(),
                })
                .await?;
            output::print_item(&UserRow::from(&user), format);
        }
        UserCommand::Delete { id, force } => {
            let user = users.get(*id).await?;
            if !super::confirm(&format!("Delete user '{}'?", user.username), *force)? {
                println!("Cancelled.");
                return Ok(());
            }
            users.delete(user.id).await?;
            output::print_success(&format!("User '{}' deleted", user.username));
        }
    }

    Ok(())
}
