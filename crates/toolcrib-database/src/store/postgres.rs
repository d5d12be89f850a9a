//! PostgreSQL-backed inventory store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use toolcrib_core::error::{AppError, ErrorKind};
use toolcrib_core::result::AppResult;
use toolcrib_entity::checkout::{Checkout, NewCheckout};
use toolcrib_entity::tool::{CreateTool, Tool, ToolStatus, UpdateTool};
use toolcrib_entity::tool_type::{CreateToolType, ToolType, UpdateToolType};
use toolcrib_entity::user::{CreateUser, UpdateUser, User};

use super::{InventoryStore, StoreTransaction};
use crate::repositories::{
    CheckoutRepository, ToolRepository, ToolTypeRepository, UserRepository,
};

/// Inventory store over a PostgreSQL pool.
#[derive(Debug, Clone)]
pub struct PgInventoryStore {
    pool: PgPool,
    users: UserRepository,
    tool_types: ToolTypeRepository,
    tools: ToolRepository,
    checkouts: CheckoutRepository,
}

impl PgInventoryStore {
    /// Build the store and its repositories over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            tool_types: ToolTypeRepository::new(pool.clone()),
            tools: ToolRepository::new(pool.clone()),
            checkouts: CheckoutRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl InventoryStore for PgInventoryStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Database health check failed", e)
            })?;
        Ok(())
    }

    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        let tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to begin transaction: {e}"),
                e,
            )
        })?;
        Ok(Box::new(PgStoreTransaction { tx }))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        self.users.find_by_id(id).await
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        self.users.create(data).await
    }

    async fn update_user(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>> {
        self.users.update(id, data).await
    }

    async fn delete_user(&self, id: i64) -> AppResult<bool> {
        self.users.delete(id).await
    }

    async fn list_tool_types(&self) -> AppResult<Vec<ToolType>> {
        self.tool_types.find_all().await
    }

    async fn get_tool_type(&self, id: i64) -> AppResult<Option<ToolType>> {
        self.tool_types.find_by_id(id).await
    }

    async fn create_tool_type(&self, data: &CreateToolType) -> AppResult<ToolType> {
        self.tool_types.create(data).await
    }

    async fn update_tool_type(
        &self,
        id: i64,
        data: &UpdateToolType,
    ) -> AppResult<Option<ToolType>> {
        self.tool_types.update(id, data).await
    }

    async fn delete_tool_type(&self, id: i64) -> AppResult<bool> {
        self.tool_types.delete(id).await
    }

    async fn list_tools(&self) -> AppResult<Vec<Tool>> {
        self.tools.find_all().await
    }

    async fn list_available_tools(&self) -> AppResult<Vec<Tool>> {
        self.tools.find_available().await
    }

    async fn get_tool(&self, id: i64) -> AppResult<Option<Tool>> {
        self.tools.find_by_id(id).await
    }

    async fn get_tool_by_serial(&self, serial_number: &str) -> AppResult<Option<Tool>> {
        self.tools.find_by_serial(serial_number).await
    }

    async fn create_tool(
        &self,
        data: &CreateTool,
        registered_at: DateTime<Utc>,
    ) -> AppResult<Tool> {
        self.tools.create(data, registered_at).await
    }

    async fn update_tool(&self, id: i64, data: &UpdateTool) -> AppResult<Option<Tool>> {
        self.tools.update(id, data).await
    }

    async fn delete_tool(&self, id: i64) -> AppResult<bool> {
        self.tools.delete(id).await
    }

    async fn get_checkout(&self, id: i64) -> AppResult<Option<Checkout>> {
        self.checkouts.find_by_id(id).await
    }

    async fn list_open_checkouts(&self) -> AppResult<Vec<Checkout>> {
        self.checkouts.find_open().await
    }

    async fn list_tool_checkouts(&self, tool_id: i64) -> AppResult<Vec<Checkout>> {
        self.checkouts.find_by_tool(tool_id).await
    }
}

/// A PostgreSQL transaction. Rolled back by sqlx when dropped uncommitted.
pub struct PgStoreTransaction {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTransaction for PgStoreTransaction {
    async fn find_tool(&mut self, id: i64) -> AppResult<Option<Tool>> {
        ToolRepository::lock_by_id(&mut *self.tx, id).await
    }

    async fn find_user(&mut self, id: i64) -> AppResult<Option<User>> {
        UserRepository::fetch_by_id(&mut *self.tx, id).await
    }

    async fn find_open_checkout(&mut self, tool_id: i64) -> AppResult<Option<Checkout>> {
        CheckoutRepository::find_open_for_tool(&mut *self.tx, tool_id).await
    }

    async fn insert_checkout(&mut self, data: &NewCheckout) -> AppResult<Checkout> {
        CheckoutRepository::insert(&mut *self.tx, data).await
    }

    async fn close_checkout(
        &mut self,
        id: i64,
        returned_at: DateTime<Utc>,
        condition: Option<&str>,
    ) -> AppResult<Checkout> {
        CheckoutRepository::close(&mut *self.tx, id, returned_at, condition)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Checkout {id} not found")))
    }

    async fn save_tool_state(
        &mut self,
        tool_id: i64,
        status: ToolStatus,
        last_calibrated: Option<DateTime<Utc>>,
    ) -> AppResult<Tool> {
        ToolRepository::save_state(&mut *self.tx, tool_id, status, last_calibrated)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tool {tool_id} not found")))
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        self.tx.commit().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to commit transaction: {e}"),
                e,
            )
        })
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        self.tx.rollback().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to roll back transaction: {e}"),
                e,
            )
        })
    }
}
