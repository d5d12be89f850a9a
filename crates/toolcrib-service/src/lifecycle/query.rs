//! Read-only checkout queries.

use std::sync::Arc;

use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_database::store::InventoryStore;
use toolcrib_entity::checkout::Checkout;

/// Lists and fetches checkout records.
#[derive(Debug, Clone)]
pub struct CheckoutQueryService {
    store: Arc<dyn InventoryStore>,
}

impl CheckoutQueryService {
    /// Creates a new checkout query service.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Open checkouts, most recently checked out first.
    pub async fn list_open(&self) -> AppResult<Vec<Checkout>> {
        self.store.list_open_checkouts().await
    }

    /// Get a checkout by id.
    pub async fn get(&self, id: i64) -> AppResult<Checkout> {
        self.store
            .get_checkout(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Checkout {id} not found")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use toolcrib_core::ErrorKind;
    use toolcrib_database::store::MemoryInventoryStore;
    use toolcrib_entity::tool::CreateTool;
    use toolcrib_entity::user::CreateUser;

    use crate::lifecycle::ToolLifecycleManager;

    #[tokio::test]
    async fn test_open_checkouts_newest_first() {
        let store: Arc<dyn InventoryStore> = Arc::new(MemoryInventoryStore::new());
        let user = store
            .create_user(&CreateUser {
                username: "simon_njoroge".to_string(),
                full_name: None,
                email: None,
                role: "tool_push".to_string(),
            })
            .await
            .expect("user");
        let mut tool_ids = Vec::new();
        for serial in ["STABIL-001", "STABIL-002"] {
            let tool = store
                .create_tool(
                    &CreateTool {
                        name: "Stabilizer".to_string(),
                        serial_number: serial.to_string(),
                        type_id: None,
                        location: None,
                    },
                    Utc::now(),
                )
                .await
                .expect("tool");
            tool_ids.push(tool.id);
        }

        let manager = ToolLifecycleManager::new(store.clone());
        let queries = CheckoutQueryService::new(store);
        let first = manager
            .checkout(user.id, tool_ids[0], "Rig 2", "2025-06-01")
            .await
            .expect("first");
        let second = manager
            .checkout(user.id, tool_ids[1], "Rig 3", "2025-06-02")
            .await
            .expect("second");

        let open: Vec<i64> = queries
            .list_open()
            .await
            .expect("list")
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(open, vec![second.id, first.id]);

        assert_eq!(queries.get(first.id).await.expect("get"), first);
        let err = queries.get(4242).await.expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
