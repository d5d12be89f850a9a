//! Tool type CRUD operations.

use std::sync::Arc;

use tracing::info;

use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_database::store::InventoryStore;
use toolcrib_entity::tool_type::{CreateToolType, ToolType, UpdateToolType};

/// Handles tool type management.
#[derive(Debug, Clone)]
pub struct ToolTypeService {
    store: Arc<dyn InventoryStore>,
}

impl ToolTypeService {
    /// Creates a new tool type service.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Creates a tool type.
    pub async fn create(&self, data: CreateToolType) -> AppResult<ToolType> {
        let data = normalize(data)?;
        let tool_type = self.store.create_tool_type(&data).await?;
        info!(tool_type_id = tool_type.id, name = %tool_type.name, "Tool type created");
        Ok(tool_type)
    }

    /// Lists all tool types.
    pub async fn list(&self) -> AppResult<Vec<ToolType>> {
        self.store.list_tool_types().await
    }

    /// Gets a tool type by id.
    pub async fn get(&self, id: i64) -> AppResult<ToolType> {
        self.store
            .get_tool_type(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tool type {id} not found")))
    }

    /// Replaces a tool type's fields.
    pub async fn update(&self, id: i64, data: UpdateToolType) -> AppResult<ToolType> {
        let data = normalize(data)?;
        let tool_type = self
            .store
            .update_tool_type(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tool type {id} not found")))?;
        info!(tool_type_id = id, name = %tool_type.name, "Tool type updated");
        Ok(tool_type)
    }

    /// Deletes a tool type. Its tools are kept without a type.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete_tool_type(id).await? {
            return Err(AppError::not_found(format!("Tool type {id} not found")));
        }
        info!(tool_type_id = id, "Tool type deleted");
        Ok(())
    }
}

fn normalize(mut data: CreateToolType) -> AppResult<CreateToolType> {
    data.name = data.name.trim().to_string();
    if data.name.is_empty() {
        return Err(AppError::invalid_input("Tool type name is required"));
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolcrib_core::ErrorKind;
    use toolcrib_database::store::MemoryInventoryStore;

    fn reamers() -> CreateToolType {
        CreateToolType {
            name: "Reamers".to_string(),
            description: Some("Hole enlargement tools and back reamers".to_string()),
        }
    }

    #[tokio::test]
    async fn test_crud_round() {
        let service = ToolTypeService::new(Arc::new(MemoryInventoryStore::new()));
        let created = service.create(reamers()).await.expect("create");
        assert_eq!(service.get(created.id).await.expect("get"), created);

        let updated = service
            .update(
                created.id,
                CreateToolType {
                    name: "Hole Openers".to_string(),
                    description: None,
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.name, "Hole Openers");
        assert_eq!(updated.description, None);

        service.delete(created.id).await.expect("delete");
        assert!(service.list().await.expect("list").is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_name_is_constraint() {
        let service = ToolTypeService::new(Arc::new(MemoryInventoryStore::new()));
        service.create(reamers()).await.expect("first");
        let err = service.create(reamers()).await.expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Constraint);
    }
}
