//! Tool entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::status::ToolStatus;

/// A trackable piece of equipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tool {
    /// Unique tool identifier.
    pub id: i64,
    /// Descriptive name, e.g. `PowerPulse MWD System`.
    pub name: String,
    /// Manufacturer/asset serial number (unique).
    pub serial_number: String,
    /// Tool type reference. Not required to resolve to a tool type.
    pub type_id: Option<i64>,
    /// Free-text storage location.
    pub location: Option<String>,
    /// Current lifecycle status.
    pub status: ToolStatus,
    /// When the tool was last calibrated.
    pub last_calibrated: Option<DateTime<Utc>>,
}

impl Tool {
    /// Check if the tool is currently out with a user.
    pub fn is_checked_out(&self) -> bool {
        self.status == ToolStatus::CheckedOut
    }

    /// Case-insensitive substring match on name or serial number.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.serial_number.to_lowercase().contains(&query)
    }
}

/// Data required to register a new tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTool {
    /// Descriptive name.
    pub name: String,
    /// Serial number.
    pub serial_number: String,
    /// Tool type reference (optional).
    pub type_id: Option<i64>,
    /// Storage location (optional).
    pub location: Option<String>,
}

/// Descriptive fields that may be edited after registration.
///
/// Status and calibration are absent: they change only through the
/// lifecycle operations.
pub type UpdateTool = CreateTool;
