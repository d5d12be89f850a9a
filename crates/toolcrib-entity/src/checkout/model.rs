//! Checkout entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A record of a tool being assigned to a user for a project.
///
/// `due_date` and `project_location` never change after creation; closing a
/// checkout only fills in `returned_at` and `condition_on_return`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Checkout {
    /// Unique checkout identifier.
    pub id: i64,
    /// User holding the tool.
    pub user_id: i64,
    /// Tool that was checked out.
    pub tool_id: i64,
    /// Date the tool is due back.
    pub due_date: NaiveDate,
    /// Rig or project site the tool went to.
    pub project_location: String,
    /// When the tool was checked out.
    pub checked_out_at: DateTime<Utc>,
    /// When the tool came back (None = still open).
    pub returned_at: Option<DateTime<Utc>>,
    /// Condition noted on return.
    pub condition_on_return: Option<String>,
}

impl Checkout {
    /// Check if this checkout is still open.
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}

/// Data for inserting a new open checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCheckout {
    /// User receiving the tool.
    pub user_id: i64,
    /// Tool being checked out.
    pub tool_id: i64,
    /// Parsed due date.
    pub due_date: NaiveDate,
    /// Rig or project site.
    pub project_location: String,
    /// Checkout timestamp.
    pub checked_out_at: DateTime<Utc>,
}
