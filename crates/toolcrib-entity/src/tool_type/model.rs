//! Tool type entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A category of tools, e.g. `Downhole Motors`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct ToolType {
    /// Unique tool type identifier.
    pub id: i64,
    /// Unique category name.
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,
}

/// Data required to create a tool type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateToolType {
    /// Category name.
    pub name: String,
    /// Description (optional).
    pub description: Option<String>,
}

/// Replacement values for an existing tool type.
pub type UpdateToolType = CreateToolType;
