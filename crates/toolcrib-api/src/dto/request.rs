//! Request DTOs with validation.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use toolcrib_entity::tool::CreateTool;
use toolcrib_entity::tool_type::CreateToolType;
use toolcrib_entity::user::CreateUser;

/// Create or replace a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserRequest {
    /// Username.
    #[validate(length(min = 1, max = 100, message = "Username is required"))]
    pub username: String,
    /// Display name.
    #[serde(default, deserialize_with = "blank_as_none")]
    pub full_name: Option<String>,
    /// Email. A blank value is treated as absent.
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Role tag. Omitted means the configured default role.
    pub role: Option<String>,
}

impl From<UserRequest> for CreateUser {
    fn from(req: UserRequest) -> Self {
        Self {
            username: req.username,
            full_name: req.full_name,
            email: req.email,
            role: req.role.unwrap_or_default(),
        }
    }
}

/// Form fields arrive as `""` when left empty.
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}

/// Create or replace a tool type.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ToolTypeRequest {
    /// Category name.
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,
    /// Description.
    pub description: Option<String>,
}

impl From<ToolTypeRequest> for CreateToolType {
    fn from(req: ToolTypeRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

/// Register or edit a tool.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ToolRequest {
    /// Descriptive name.
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,
    /// Serial number.
    #[validate(length(min = 1, max = 100, message = "Serial number is required"))]
    pub serial_number: String,
    /// Tool type.
    pub type_id: Option<i64>,
    /// Storage location.
    pub location: Option<String>,
}

impl From<ToolRequest> for CreateTool {
    fn from(req: ToolRequest) -> Self {
        Self {
            name: req.name,
            serial_number: req.serial_number,
            type_id: req.type_id,
            location: req.location,
        }
    }
}

/// Check a tool out.
///
/// The fields are checked by the lifecycle manager, after the tool and user
/// lookups.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckoutRequest {
    /// User receiving the tool.
    pub user_id: i64,
    /// Tool to check out.
    pub tool_id: i64,
    /// Rig or project site.
    pub project_location: String,
    /// Due date, `YYYY-MM-DD`.
    pub due_date: String,
}

/// Return a tool.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReturnRequest {
    /// Tool being returned.
    pub tool_id: i64,
    /// Condition on return. Omitted means the configured default.
    pub condition: Option<String>,
}

/// `GET /api/tools` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolSearchQuery {
    /// Case-insensitive match on name or serial number.
    pub search: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_request_validation() {
        let mut req = UserRequest {
            username: "ann_kwamboka".to_string(),
            full_name: None,
            email: Some("ann.kwamboka@gmail.com".to_string()),
            role: None,
        };
        assert!(req.validate().is_ok());

        req.email = Some("not-an-email".to_string());
        assert!(req.validate().is_err());

        req.email = None;
        req.username = String::new();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_role_becomes_blank() {
        let user: CreateUser = UserRequest {
            username: "ann_kwamboka".to_string(),
            full_name: None,
            email: None,
            role: None,
        }
        .into();
        assert_eq!(user.role, "");
        assert_eq!(user.full_name, None);
    }

    #[test]
    fn test_blank_form_fields_pass_validation() {
        let req: UserRequest = serde_json::from_value(serde_json::json!({
            "username": "ann_kwamboka",
            "full_name": "  ",
            "email": "",
        }))
        .expect("deserialize");
        assert!(req.validate().is_ok());
        assert_eq!(req.email, None);
        assert_eq!(req.full_name, None);

        let req: UserRequest =
            serde_json::from_value(serde_json::json!({ "username": "ann_kwamboka" }))
                .expect("missing fields");
        assert_eq!(req.email, None);
    }
}
