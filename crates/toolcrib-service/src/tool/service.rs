//! Tool registry operations.
//!
//! Status and calibration are never written here; they belong to the
//! lifecycle manager.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_database::store::InventoryStore;
use toolcrib_entity::checkout::Checkout;
use toolcrib_entity::tool::{CreateTool, Tool, UpdateTool};

/// Handles tool registration, editing and lookup.
#[derive(Debug, Clone)]
pub struct ToolService {
    store: Arc<dyn InventoryStore>,
}

impl ToolService {
    /// Creates a new tool service.
    pub fn new(store: Arc<dyn InventoryStore>) -> Self {
        Self { store }
    }

    /// Registers a tool. It starts available with `last_calibrated = now`.
    pub async fn register(&self, data: CreateTool) -> AppResult<Tool> {
        let data = normalize(data)?;
        let tool = self.store.create_tool(&data, Utc::now()).await?;
        info!(
            tool_id = tool.id,
            serial_number = %tool.serial_number,
            type_id = ?tool.type_id,
            "Tool registered"
        );
        Ok(tool)
    }

    /// Lists all tools.
    pub async fn list(&self) -> AppResult<Vec<Tool>> {
        self.store.list_tools().await
    }

    /// Tools whose name or serial number contains `query`, ignoring case.
    /// A blank query returns every tool.
    pub async fn search(&self, query: &str) -> AppResult<Vec<Tool>> {
        let query = query.trim();
        let tools = self.store.list_tools().await?;
        if query.is_empty() {
            return Ok(tools);
        }
        let matched: Vec<Tool> = tools.into_iter().filter(|t| t.matches(query)).collect();
        debug!(query, matches = matched.len(), "Tool search");
        Ok(matched)
    }

    /// Tools that can be checked out, ordered by serial number.
    pub async fn list_available(&self) -> AppResult<Vec<Tool>> {
        self.store.list_available_tools().await
    }

    /// Gets a tool by id.
    pub async fn get(&self, id: i64) -> AppResult<Tool> {
        self.store
            .get_tool(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tool {id} not found")))
    }

    /// Gets a tool by serial number.
    pub async fn get_by_serial(&self, serial_number: &str) -> AppResult<Tool> {
        self.store
            .get_tool_by_serial(serial_number.trim())
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Tool with serial '{serial_number}' not found"))
            })
    }

    /// Replaces a tool's descriptive fields.
    pub async fn update(&self, id: i64, data: UpdateTool) -> AppResult<Tool> {
        let data = normalize(data)?;
        let tool = self
            .store
            .update_tool(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tool {id} not found")))?;
        info!(tool_id = id, serial_number = %tool.serial_number, "Tool updated");
        Ok(tool)
    }

    /// Deletes a tool. Tools with checkout history cannot be deleted.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete_tool(id).await? {
            return Err(AppError::not_found(format!("Tool {id} not found")));
        }
        info!(tool_id = id, "Tool deleted");
        Ok(())
    }

    /// Every checkout of a tool, newest first.
    pub async fn history(&self, id: i64) -> AppResult<Vec<Checkout>> {
        let tool = self.get(id).await?;
        self.store.list_tool_checkouts(tool.id).await
    }
}

fn normalize(mut data: CreateTool) -> AppResult<CreateTool> {
    data.name = data.name.trim().to_string();
    data.serial_number = data.serial_number.trim().to_string();
    if data.name.is_empty() {
        return Err(AppError::invalid_input("Tool name is required"));
    }
    if data.serial_number.is_empty() {
        return Err(AppError::invalid_input("Serial number is required"));
    }
    data.location = data.location.filter(|l| !l.trim().is_empty());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolcrib_core::ErrorKind;
    use toolcrib_database::store::MemoryInventoryStore;
    use toolcrib_entity::tool::ToolStatus;

    fn new_tool(name: &str, serial: &str) -> CreateTool {
        CreateTool {
            name: name.to_string(),
            serial_number: serial.to_string(),
            type_id: None,
            location: Some("Directional Tools Bay".to_string()),
        }
    }

    async fn seeded() -> ToolService {
        let service = ToolService::new(Arc::new(MemoryInventoryStore::new()));
        for (name, serial) in [
            ("PowerDrive RSS", "DDSYS-002"),
            ("Navi-Drill RSS", "DDSYS-001"),
            ("PowerPak Motor", "DHMOTOR-003"),
        ] {
            service.register(new_tool(name, serial)).await.expect("register");
        }
        service
    }

    #[tokio::test]
    async fn test_register_starts_available_and_calibrated() {
        let service = ToolService::new(Arc::new(MemoryInventoryStore::new()));
        let before = Utc::now();
        let tool = service
            .register(new_tool("AutoTrak RSS", "DDSYS-003"))
            .await
            .expect("register");
        assert_eq!(tool.status, ToolStatus::Available);
        assert!(tool.last_calibrated.is_some_and(|t| t >= before));
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let service = seeded().await;
        let names: Vec<String> = service
            .search("power")
            .await
            .expect("search")
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, ["PowerDrive RSS", "PowerPak Motor"]);

        assert_eq!(service.search("ddsys").await.expect("serial").len(), 2);
        assert_eq!(service.search("  ").await.expect("blank").len(), 3);
        assert!(service.search("bit").await.expect("none").is_empty());
    }

    #[tokio::test]
    async fn test_available_sorted_by_serial() {
        let service = seeded().await;
        let serials: Vec<String> = service
            .list_available()
            .await
            .expect("available")
            .into_iter()
            .map(|t| t.serial_number)
            .collect();
        assert_eq!(serials, ["DDSYS-001", "DDSYS-002", "DHMOTOR-003"]);
    }

    #[tokio::test]
    async fn test_lookup_by_serial() {
        let service = seeded().await;
        let tool = service.get_by_serial("DHMOTOR-003").await.expect("found");
        assert_eq!(tool.name, "PowerPak Motor");
        let err = service.get_by_serial("NOPE-1").await.expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_update_keeps_status() {
        let service = seeded().await;
        let tool = service.get_by_serial("DDSYS-001").await.expect("found");
        let updated = service
            .update(
                tool.id,
                UpdateTool {
                    name: "Navi-Drill RSS Mk2".to_string(),
                    serial_number: "DDSYS-001".to_string(),
                    type_id: None,
                    location: Some("Rig 4".to_string()),
                },
            )
            .await
            .expect("update");
        assert_eq!(updated.name, "Navi-Drill RSS Mk2");
        assert_eq!(updated.status, tool.status);
        assert_eq!(updated.last_calibrated, tool.last_calibrated);
    }

    #[tokio::test]
    async fn test_duplicate_serial_is_constraint() {
        let service = seeded().await;
        let err = service
            .register(new_tool("Clone", "DDSYS-001"))
            .await
            .expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Constraint);
    }

    #[tokio::test]
    async fn test_history_of_unknown_tool() {
        let service = seeded().await;
        let err = service.history(404).await.expect_err("missing");
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
