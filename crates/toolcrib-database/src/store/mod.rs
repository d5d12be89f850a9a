//! Inventory store abstraction.
//!
//! The service layer never touches sqlx directly. It talks to an
//! [`InventoryStore`] for plain reads and CRUD, and to a [`StoreTransaction`]
//! for the multi-record lifecycle transitions, which must either fully apply
//! or leave nothing behind.

pub mod memory;
pub mod postgres;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;

use toolcrib_core::config::DatabaseConfig;
use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_entity::checkout::{Checkout, NewCheckout};
use toolcrib_entity::tool::{CreateTool, Tool, ToolStatus, UpdateTool};
use toolcrib_entity::tool_type::{CreateToolType, ToolType, UpdateToolType};
use toolcrib_entity::user::{CreateUser, UpdateUser, User};

use crate::connection::{apply_schema, open_pool};

pub use memory::MemoryInventoryStore;
pub use postgres::PgInventoryStore;

/// Persistent storage for users, tool types, tools and checkouts.
///
/// Lookups return `Ok(None)` for missing records; uniqueness and reference
/// violations surface as [`ErrorKind::Constraint`](toolcrib_core::ErrorKind::Constraint).
#[async_trait]
pub trait InventoryStore: Send + Sync + fmt::Debug + 'static {
    /// Short backend identifier (`"postgres"`, `"memory"`).
    fn backend_name(&self) -> &'static str;

    /// Verify the backend is reachable.
    async fn health_check(&self) -> AppResult<()>;

    /// Open a transaction for a lifecycle transition.
    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>>;

    // -- users --

    /// List users ordered by id.
    async fn list_users(&self) -> AppResult<Vec<User>>;
    /// Get a user by id.
    async fn get_user(&self, id: i64) -> AppResult<Option<User>>;
    /// Insert a user.
    async fn create_user(&self, data: &CreateUser) -> AppResult<User>;
    /// Replace a user's fields.
    async fn update_user(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>>;
    /// Delete a user. Returns `false` if it did not exist.
    async fn delete_user(&self, id: i64) -> AppResult<bool>;

    // -- tool types --

    /// List tool types ordered by id.
    async fn list_tool_types(&self) -> AppResult<Vec<ToolType>>;
    /// Get a tool type by id.
    async fn get_tool_type(&self, id: i64) -> AppResult<Option<ToolType>>;
    /// Insert a tool type.
    async fn create_tool_type(&self, data: &CreateToolType) -> AppResult<ToolType>;
    /// Replace a tool type's fields.
    async fn update_tool_type(&self, id: i64, data: &UpdateToolType)
    -> AppResult<Option<ToolType>>;
    /// Delete a tool type. Tools of that type keep existing with no type.
    async fn delete_tool_type(&self, id: i64) -> AppResult<bool>;

    // -- tools --

    /// List tools ordered by id.
    async fn list_tools(&self) -> AppResult<Vec<Tool>>;
    /// List available tools ordered by serial number.
    async fn list_available_tools(&self) -> AppResult<Vec<Tool>>;
    /// Get a tool by id.
    async fn get_tool(&self, id: i64) -> AppResult<Option<Tool>>;
    /// Get a tool by serial number.
    async fn get_tool_by_serial(&self, serial_number: &str) -> AppResult<Option<Tool>>;
    /// Register a tool as available, calibrated at `registered_at`.
    async fn create_tool(&self, data: &CreateTool, registered_at: DateTime<Utc>)
    -> AppResult<Tool>;
    /// Replace a tool's descriptive fields.
    async fn update_tool(&self, id: i64, data: &UpdateTool) -> AppResult<Option<Tool>>;
    /// Delete a tool. Fails with a constraint error while checkouts reference it.
    async fn delete_tool(&self, id: i64) -> AppResult<bool>;

    // -- checkouts --

    /// Get a checkout by id.
    async fn get_checkout(&self, id: i64) -> AppResult<Option<Checkout>>;
    /// List open checkouts, newest first.
    async fn list_open_checkouts(&self) -> AppResult<Vec<Checkout>>;
    /// List every checkout of a tool, newest first.
    async fn list_tool_checkouts(&self, tool_id: i64) -> AppResult<Vec<Checkout>>;
}

/// A unit of work spanning several records.
///
/// Dropping a transaction without calling [`commit`](Self::commit) discards
/// every write made through it.
#[async_trait]
pub trait StoreTransaction: Send {
    /// Read a tool, holding it against concurrent transitions.
    async fn find_tool(&mut self, id: i64) -> AppResult<Option<Tool>>;

    /// Read a user.
    async fn find_user(&mut self, id: i64) -> AppResult<Option<User>>;

    /// The most recently opened checkout of `tool_id` that has not been returned.
    async fn find_open_checkout(&mut self, tool_id: i64) -> AppResult<Option<Checkout>>;

    /// Insert a new open checkout.
    async fn insert_checkout(&mut self, data: &NewCheckout) -> AppResult<Checkout>;

    /// Mark a checkout returned.
    async fn close_checkout(
        &mut self,
        id: i64,
        returned_at: DateTime<Utc>,
        condition: Option<&str>,
    ) -> AppResult<Checkout>;

    /// Write a tool's status and calibration timestamp.
    async fn save_tool_state(
        &mut self,
        tool_id: i64,
        status: ToolStatus,
        last_calibrated: Option<DateTime<Utc>>,
    ) -> AppResult<Tool>;

    /// Make every write visible atomically.
    async fn commit(self: Box<Self>) -> AppResult<()>;

    /// Discard every write.
    async fn rollback(self: Box<Self>) -> AppResult<()>;
}

/// Open the store selected by `config.provider`.
pub async fn connect(config: &DatabaseConfig) -> AppResult<Arc<dyn InventoryStore>> {
    let store: Arc<dyn InventoryStore> = match config.provider.as_str() {
        "postgres" => {
            info!("Initializing PostgreSQL inventory store");
            let pool = open_pool(config).await?;
            if config.run_migrations {
                apply_schema(&pool).await?;
            }
            Arc::new(PgInventoryStore::new(pool))
        }
        "memory" => {
            info!("Initializing in-memory inventory store");
            Arc::new(MemoryInventoryStore::new())
        }
        other => {
            return Err(AppError::configuration(format!(
                "Unknown database provider: '{other}'. Supported: postgres, memory"
            )));
        }
    };

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolcrib_core::ErrorKind;

    #[tokio::test]
    async fn test_connect_memory() {
        let store = connect(&DatabaseConfig::memory()).await.expect("memory store");
        assert_eq!(store.backend_name(), "memory");
        store.health_check().await.expect("healthy");
    }

    #[tokio::test]
    async fn test_connect_unknown_provider() {
        let config = DatabaseConfig {
            provider: "sqlite".to_string(),
            ..DatabaseConfig::default()
        };
        let err = connect(&config).await.expect_err("unknown provider");
        assert_eq!(err.kind, ErrorKind::Configuration);
    }
}
