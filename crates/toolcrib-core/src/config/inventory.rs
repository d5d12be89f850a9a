//! Inventory behaviour settings.

use serde::{Deserialize, Serialize};

/// Settings that shape how the inventory is initialised and how omitted
/// request fields are filled in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryConfig {
    /// Install the demo tool types, users and tools when the store is empty.
    #[serde(default)]
    pub seed_on_startup: bool,
    /// Role assigned to new users that do not specify one.
    #[serde(default = "default_role")]
    pub default_role: String,
    /// Condition recorded on return when the caller does not give one.
    #[serde(default = "default_return_condition")]
    pub default_return_condition: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            seed_on_startup: false,
            default_role: default_role(),
            default_return_condition: default_return_condition(),
        }
    }
}

fn default_role() -> String {
    "technician".to_string()
}

fn default_return_condition() -> String {
    "Good".to_string()
}
