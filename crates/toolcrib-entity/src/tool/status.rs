//! Tool status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a tool is on the shelf or out with a user.
///
/// Only the lifecycle operations (checkout, return, calibrate) move a tool
/// between these states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tool_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ToolStatus {
    /// On the shelf and free to be checked out.
    Available,
    /// Assigned to a user through an open checkout.
    CheckedOut,
}

impl ToolStatus {
    /// Check if the tool can be checked out in this state.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::CheckedOut => "checked_out",
        }
    }
}

impl fmt::Display for ToolStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_matches_stored_value() {
        assert_eq!(ToolStatus::CheckedOut.to_string(), "checked_out");
        assert!(ToolStatus::Available.is_available());
        assert!(!ToolStatus::CheckedOut.is_available());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&ToolStatus::CheckedOut).unwrap();
        assert_eq!(json, "\"checked_out\"");
    }
}
