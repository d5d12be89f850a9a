//! User entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A person tools can be checked out to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: i64,
    /// Unique login name.
    pub username: String,
    /// Human-readable display name.
    pub full_name: Option<String>,
    /// Email address (optional).
    pub email: Option<String>,
    /// Free-text role tag, e.g. `mwd_technician`.
    pub role: String,
}

impl User {
    /// The name to show for this user: full name when present, else username.
    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Data required to create a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Desired username.
    pub username: String,
    /// Display name (optional).
    pub full_name: Option<String>,
    /// Email address (optional).
    pub email: Option<String>,
    /// Role tag.
    pub role: String,
}

/// Replacement values for an existing user.
pub type UpdateUser = CreateUser;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_username() {
        let mut user = User {
            id: 1,
            username: "ann_kwamboka".to_string(),
            full_name: Some("Ann Kwamboka".to_string()),
            email: None,
            role: "rig_manager".to_string(),
        };
        assert_eq!(user.display_name(), "Ann Kwamboka");

        user.full_name = Some(String::new());
        assert_eq!(user.display_name(), "ann_kwamboka");

        user.full_name = None;
        assert_eq!(user.display_name(), "ann_kwamboka");
    }
}
