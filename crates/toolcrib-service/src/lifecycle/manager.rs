//! Tool lifecycle manager.
//!
//! Every transition runs inside one store transaction: the tool is read,
//! its state checked and every write applied through the same handle. The
//! transaction is committed on success and rolled back on any error, so a
//! failed operation never leaves a half-applied change.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_database::store::{InventoryStore, StoreTransaction};
use toolcrib_entity::checkout::{Checkout, NewCheckout};
use toolcrib_entity::tool::{Tool, ToolStatus};

use super::due_date::parse_due_date;

/// Owns the checkout / return / calibrate transitions of a tool's status.
#[derive(Debug, Clone)]
pub struct ToolLifecycleManager {
    store: Arc<dyn InventoryStore>,
}

impl ToolLifecycleManager {
    /// Creates a new lifecycle manager.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Check a tool out to a user for a project.
    ///
    /// Fails with `NotFound` for an unknown tool or user, `Conflict` when the
    /// tool is not available, and `InvalidInput` for a malformed due date or
    /// a blank project location.
    pub async fn checkout(
        &self,
        user_id: i64,
        tool_id: i64,
        project_location: &str,
        due_date: &str,
    ) -> AppResult<Checkout> {
        let mut tx = self.store.begin().await?;
        let result = checkout_in(tx.as_mut(), user_id, tool_id, project_location, due_date).await;
        let checkout = finish(tx, result).await?;

        info!(
            checkout_id = checkout.id,
            tool_id,
            user_id,
            project_location = %checkout.project_location,
            due_date = %checkout.due_date,
            "Tool checked out"
        );
        Ok(checkout)
    }

    /// Close the open checkout of a tool and put it back on the shelf.
    pub async fn return_tool(&self, tool_id: i64, condition: Option<&str>) -> AppResult<Checkout> {
        let mut tx = self.store.begin().await?;
        let result = return_in(tx.as_mut(), tool_id, condition).await;
        let checkout = finish(tx, result).await?;

        info!(
            checkout_id = checkout.id,
            tool_id,
            condition = checkout.condition_on_return.as_deref().unwrap_or(""),
            "Tool returned"
        );
        Ok(checkout)
    }

    /// Record a calibration and force the tool to `available`.
    ///
    /// An open checkout of the tool is left open.
    pub async fn calibrate(&self, tool_id: i64) -> AppResult<Tool> {
        let mut tx = self.store.begin().await?;
        let result = calibrate_in(tx.as_mut(), tool_id).await;
        let tool = finish(tx, result).await?;

        info!(tool_id, serial_number = %tool.serial_number, "Tool calibrated");
        Ok(tool)
    }
}

async fn checkout_in(
    tx: &mut dyn StoreTransaction,
    user_id: i64,
    tool_id: i64,
    project_location: &str,
    due_date: &str,
) -> AppResult<Checkout> {
    let tool = tx
        .find_tool(tool_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tool {tool_id} not found")))?;
    if !tool.status.is_available() {
        return Err(AppError::conflict(format!(
            "Tool not available (status={})",
            tool.status
        )));
    }

    tx.find_user(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("User {user_id} not found")))?;

    let due_date = parse_due_date(due_date)?;
    let project_location = project_location.trim();
    if project_location.is_empty() {
        return Err(AppError::invalid_input("Project location is required"));
    }

    tx.save_tool_state(tool.id, ToolStatus::CheckedOut, tool.last_calibrated)
        .await?;
    tx.insert_checkout(&NewCheckout {
        user_id,
        tool_id: tool.id,
        due_date,
        project_location: project_location.to_string(),
        checked_out_at: Utc::now(),
    })
    .await
}

async fn return_in(
    tx: &mut dyn StoreTransaction,
    tool_id: i64,
    condition: Option<&str>,
) -> AppResult<Checkout> {
    let tool = tx
        .find_tool(tool_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tool {tool_id} not found")))?;
    let open = tx
        .find_open_checkout(tool.id)
        .await?
        .ok_or_else(|| AppError::conflict("Tool is not currently checked out"))?;

    let closed = tx.close_checkout(open.id, Utc::now(), condition).await?;
    tx.save_tool_state(tool.id, ToolStatus::Available, tool.last_calibrated)
        .await?;
    Ok(closed)
}

async fn calibrate_in(tx: &mut dyn StoreTransaction, tool_id: i64) -> AppResult<Tool> {
    let tool = tx
        .find_tool(tool_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Tool {tool_id} not found")))?;
    if tool.is_checked_out() {
        warn!(
            tool_id,
            serial_number = %tool.serial_number,
            "Calibration resets a checked-out tool to available; its checkout stays open"
        );
    }

    tx.save_tool_state(tool.id, ToolStatus::Available, Some(Utc::now()))
        .await
}

/// Commit on success, roll back on failure.
async fn finish<T>(tx: Box<dyn StoreTransaction>, result: AppResult<T>) -> AppResult<T> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                warn!(error = %rollback_err, "Failed to roll back transaction");
            }
            Err(err)
        }
    }
}
