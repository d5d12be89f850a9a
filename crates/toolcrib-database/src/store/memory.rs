//! In-memory inventory store.
//!
//! Holds every table in a single mutex-guarded [`MemoryState`]. A
//! transaction takes the lock for its whole lifetime and works on a staged
//! copy, so lifecycle transitions are serialized and a transaction that is
//! dropped without committing leaves the state untouched. Constraint
//! violations are reported under the same names PostgreSQL uses.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_entity::checkout::{Checkout, NewCheckout};
use toolcrib_entity::tool::{CreateTool, Tool, ToolStatus, UpdateTool};
use toolcrib_entity::tool_type::{CreateToolType, ToolType, UpdateToolType};
use toolcrib_entity::user::{CreateUser, UpdateUser, User};

use super::{InventoryStore, StoreTransaction};

/// In-memory inventory store. Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryInventoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryInventoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    tool_types: BTreeMap<i64, ToolType>,
    tools: BTreeMap<i64, Tool>,
    checkouts: BTreeMap<i64, Checkout>,
    user_seq: i64,
    tool_type_seq: i64,
    tool_seq: i64,
    checkout_seq: i64,
}

fn next_id(seq: &mut i64) -> i64 {
    *seq += 1;
    *seq
}

fn violation(context: &str, constraint: &str) -> AppError {
    AppError::constraint(format!("{context}: constraint '{constraint}' violated"))
}

fn newest_first(checkouts: &mut [Checkout]) {
    checkouts.sort_by(|a, b| {
        b.checked_out_at
            .cmp(&a.checked_out_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

impl MemoryState {
    fn username_taken(&self, username: &str, except: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.username == username && Some(u.id) != except)
    }

    fn tool_type_name_taken(&self, name: &str, except: Option<i64>) -> bool {
        self.tool_types
            .values()
            .any(|t| t.name == name && Some(t.id) != except)
    }

    fn serial_taken(&self, serial_number: &str, except: Option<i64>) -> bool {
        self.tools
            .values()
            .any(|t| t.serial_number == serial_number && Some(t.id) != except)
    }

    fn check_tool_fields(
        &self,
        context: &str,
        id: Option<i64>,
        serial_number: &str,
        type_id: Option<i64>,
    ) -> AppResult<()> {
        if self.serial_taken(serial_number, id) {
            return Err(violation(context, "tools_serial_number_key"));
        }
        if let Some(type_id) = type_id {
            if !self.tool_types.contains_key(&type_id) {
                return Err(violation(context, "tools_type_id_fkey"));
            }
        }
        Ok(())
    }

    fn open_checkout_for(&self, tool_id: i64) -> Option<Checkout> {
        let mut open: Vec<Checkout> = self
            .checkouts
            .values()
            .filter(|c| c.tool_id == tool_id && c.is_open())
            .cloned()
            .collect();
        newest_first(&mut open);
        open.into_iter().next()
    }

    fn insert_checkout(&mut self, data: &NewCheckout) -> AppResult<Checkout> {
        let context = "Failed to create checkout";
        if !self.users.contains_key(&data.user_id) {
            return Err(violation(context, "checkouts_user_id_fkey"));
        }
        if !self.tools.contains_key(&data.tool_id) {
            return Err(violation(context, "checkouts_tool_id_fkey"));
        }

        let checkout = Checkout {
            id: next_id(&mut self.checkout_seq),
            user_id: data.user_id,
            tool_id: data.tool_id,
            due_date: data.due_date,
            project_location: data.project_location.clone(),
            checked_out_at: data.checked_out_at,
            returned_at: None,
            condition_on_return: None,
        };
        self.checkouts.insert(checkout.id, checkout.clone());
        Ok(checkout)
    }

    fn close_checkout(
        &mut self,
        id: i64,
        returned_at: DateTime<Utc>,
        condition: Option<&str>,
    ) -> AppResult<Checkout> {
        let checkout = self
            .checkouts
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Checkout {id} not found")))?;
        checkout.returned_at = Some(returned_at);
        checkout.condition_on_return = condition.map(str::to_string);
        Ok(checkout.clone())
    }

    fn save_tool_state(
        &mut self,
        tool_id: i64,
        status: ToolStatus,
        last_calibrated: Option<DateTime<Utc>>,
    ) -> AppResult<Tool> {
        let tool = self
            .tools
            .get_mut(&tool_id)
            .ok_or_else(|| AppError::not_found(format!("Tool {tool_id} not found")))?;
        tool.status = status;
        tool.last_calibrated = last_calibrated;
        Ok(tool.clone())
    }
}

#[async_trait]
impl InventoryStore for MemoryInventoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<()> {
        Ok(())
    }

    async fn begin(&self) -> AppResult<Box<dyn StoreTransaction>> {
        let guard = self.state.clone().lock_owned().await;
        let staged = guard.clone();
        debug!("Opened in-memory transaction");
        Ok(Box::new(MemoryStoreTransaction { guard, staged }))
    }

    async fn list_users(&self) -> AppResult<Vec<User>> {
        Ok(self.state.lock().await.users.values().cloned().collect())
    }

    async fn get_user(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn create_user(&self, data: &CreateUser) -> AppResult<User> {
        let mut state = self.state.lock().await;
        if state.username_taken(&data.username, None) {
            return Err(violation("Failed to create user", "users_username_key"));
        }
        let user = User {
            id: next_id(&mut state.user_seq),
            username: data.username.clone(),
            full_name: data.full_name.clone(),
            email: data.email.clone(),
            role: data.role.clone(),
        };
        state.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>> {
        let mut state = self.state.lock().await;
        if !state.users.contains_key(&id) {
            return Ok(None);
        }
        if state.username_taken(&data.username, Some(id)) {
            return Err(violation("Failed to update user", "users_username_key"));
        }
        let user = User {
            id,
            username: data.username.clone(),
            full_name: data.full_name.clone(),
            email: data.email.clone(),
            role: data.role.clone(),
        };
        state.users.insert(id, user.clone());
        Ok(Some(user))
    }

    async fn delete_user(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state.checkouts.values().any(|c| c.user_id == id) {
            return Err(violation("Failed to delete user", "checkouts_user_id_fkey"));
        }
        Ok(state.users.remove(&id).is_some())
    }

    async fn list_tool_types(&self) -> AppResult<Vec<ToolType>> {
        Ok(self.state.lock().await.tool_types.values().cloned().collect())
    }

    async fn get_tool_type(&self, id: i64) -> AppResult<Option<ToolType>> {
        Ok(self.state.lock().await.tool_types.get(&id).cloned())
    }

    async fn create_tool_type(&self, data: &CreateToolType) -> AppResult<ToolType> {
        let mut state = self.state.lock().await;
        if state.tool_type_name_taken(&data.name, None) {
            return Err(violation("Failed to create tool type", "tool_types_name_key"));
        }
        let tool_type = ToolType {
            id: next_id(&mut state.tool_type_seq),
            name: data.name.clone(),
            description: data.description.clone(),
        };
        state.tool_types.insert(tool_type.id, tool_type.clone());
        Ok(tool_type)
    }

    async fn update_tool_type(
        &self,
        id: i64,
        data: &UpdateToolType,
    ) -> AppResult<Option<ToolType>> {
        let mut state = self.state.lock().await;
        if !state.tool_types.contains_key(&id) {
            return Ok(None);
        }
        if state.tool_type_name_taken(&data.name, Some(id)) {
            return Err(violation("Failed to update tool type", "tool_types_name_key"));
        }
        let tool_type = ToolType {
            id,
            name: data.name.clone(),
            description: data.description.clone(),
        };
        state.tool_types.insert(id, tool_type.clone());
        Ok(Some(tool_type))
    }

    async fn delete_tool_type(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state.tool_types.remove(&id).is_none() {
            return Ok(false);
        }
        for tool in state.tools.values_mut().filter(|t| t.type_id == Some(id)) {
            tool.type_id = None;
        }
        Ok(true)
    }

    async fn list_tools(&self) -> AppResult<Vec<Tool>> {
        Ok(self.state.lock().await.tools.values().cloned().collect())
    }

    async fn list_available_tools(&self) -> AppResult<Vec<Tool>> {
        let mut tools: Vec<Tool> = self
            .state
            .lock()
            .await
            .tools
            .values()
            .filter(|t| t.status.is_available())
            .cloned()
            .collect();
        tools.sort_by(|a, b| a.serial_number.cmp(&b.serial_number));
        Ok(tools)
    }

    async fn get_tool(&self, id: i64) -> AppResult<Option<Tool>> {
        Ok(self.state.lock().await.tools.get(&id).cloned())
    }

    async fn get_tool_by_serial(&self, serial_number: &str) -> AppResult<Option<Tool>> {
        Ok(self
            .state
            .lock()
            .await
            .tools
            .values()
            .find(|t| t.serial_number == serial_number)
            .cloned())
    }

    async fn create_tool(
        &self,
        data: &CreateTool,
        registered_at: DateTime<Utc>,
    ) -> AppResult<Tool> {
        let mut state = self.state.lock().await;
        state.check_tool_fields(
            "Failed to create tool",
            None,
            &data.serial_number,
            data.type_id,
        )?;
        let tool = Tool {
            id: next_id(&mut state.tool_seq),
            name: data.name.clone(),
            serial_number: data.serial_number.clone(),
            type_id: data.type_id,
            location: data.location.clone(),
            status: ToolStatus::Available,
            last_calibrated: Some(registered_at),
        };
        state.tools.insert(tool.id, tool.clone());
        Ok(tool)
    }

    async fn update_tool(&self, id: i64, data: &UpdateTool) -> AppResult<Option<Tool>> {
        let mut state = self.state.lock().await;
        if !state.tools.contains_key(&id) {
            return Ok(None);
        }
        state.check_tool_fields(
            "Failed to update tool",
            Some(id),
            &data.serial_number,
            data.type_id,
        )?;
        let Some(tool) = state.tools.get_mut(&id) else {
            return Ok(None);
        };
        tool.name = data.name.clone();
        tool.serial_number = data.serial_number.clone();
        tool.type_id = data.type_id;
        tool.location = data.location.clone();
        Ok(Some(tool.clone()))
    }

    async fn delete_tool(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.lock().await;
        if state.checkouts.values().any(|c| c.tool_id == id) {
            return Err(violation("Failed to delete tool", "checkouts_tool_id_fkey"));
        }
        Ok(state.tools.remove(&id).is_some())
    }

    async fn get_checkout(&self, id: i64) -> AppResult<Option<Checkout>> {
        Ok(self.state.lock().await.checkouts.get(&id).cloned())
    }

    async fn list_open_checkouts(&self) -> AppResult<Vec<Checkout>> {
        let mut open: Vec<Checkout> = self
            .state
            .lock()
            .await
            .checkouts
            .values()
            .filter(|c| c.is_open())
            .cloned()
            .collect();
        newest_first(&mut open);
        Ok(open)
    }

    async fn list_tool_checkouts(&self, tool_id: i64) -> AppResult<Vec<Checkout>> {
        let mut history: Vec<Checkout> = self
            .state
            .lock()
            .await
            .checkouts
            .values()
            .filter(|c| c.tool_id == tool_id)
            .cloned()
            .collect();
        newest_first(&mut history);
        Ok(history)
    }
}

/// Transaction over the in-memory state.
///
/// Writes go to `staged`; commit swaps it into the locked state.
pub struct MemoryStoreTransaction {
    guard: OwnedMutexGuard<MemoryState>,
    staged: MemoryState,
}

#[async_trait]
impl StoreTransaction for MemoryStoreTransaction {
    async fn find_tool(&mut self, id: i64) -> AppResult<Option<Tool>> {
        Ok(self.staged.tools.get(&id).cloned())
    }

    async fn find_user(&mut self, id: i64) -> AppResult<Option<User>> {
        Ok(self.staged.users.get(&id).cloned())
    }

    async fn find_open_checkout(&mut self, tool_id: i64) -> AppResult<Option<Checkout>> {
        Ok(self.staged.open_checkout_for(tool_id))
    }

    async fn insert_checkout(&mut self, data: &NewCheckout) -> AppResult<Checkout> {
        self.staged.insert_checkout(data)
    }

    async fn close_checkout(
        &mut self,
        id: i64,
        returned_at: DateTime<Utc>,
        condition: Option<&str>,
    ) -> AppResult<Checkout> {
        self.staged.close_checkout(id, returned_at, condition)
    }

    async fn save_tool_state(
        &mut self,
        tool_id: i64,
        status: ToolStatus,
        last_calibrated: Option<DateTime<Utc>>,
    ) -> AppResult<Tool> {
        self.staged.save_tool_state(tool_id, status, last_calibrated)
    }

    async fn commit(self: Box<Self>) -> AppResult<()> {
        let Self { mut guard, staged } = *self;
        *guard = staged;
        debug!("Committed in-memory transaction");
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> AppResult<()> {
        debug!("Rolled back in-memory transaction");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use toolcrib_core::ErrorKind;

    fn user(username: &str) -> CreateUser {
        CreateUser {
            username: username.to_string(),
            full_name: None,
            email: None,
            role: "technician".to_string(),
        }
    }

    fn tool(serial: &str, type_id: Option<i64>) -> CreateTool {
        CreateTool {
            name: format!("Tool {serial}"),
            serial_number: serial.to_string(),
            type_id,
            location: Some("Main Store".to_string()),
        }
    }

    fn new_checkout(user_id: i64, tool_id: i64, at: DateTime<Utc>) -> NewCheckout {
        NewCheckout {
            user_id,
            tool_id,
            due_date: NaiveDate::from_ymd_opt(2030, 1, 1).expect("date"),
            project_location: "Rig 7".to_string(),
            checked_out_at: at,
        }
    }

    #[tokio::test]
    async fn test_unique_constraints() {
        let store = MemoryInventoryStore::new();
        store.create_user(&user("jdoe")).await.expect("first");
        let err = store.create_user(&user("jdoe")).await.expect_err("duplicate");
        assert_eq!(err.kind, ErrorKind::Constraint);
        assert!(err.message.contains("users_username_key"));

        let now = Utc::now();
        store.create_tool(&tool("SN-1", None), now).await.expect("tool");
        let err = store
            .create_tool(&tool("SN-1", None), now)
            .await
            .expect_err("duplicate serial");
        assert!(err.message.contains("tools_serial_number_key"));
    }

    #[tokio::test]
    async fn test_tool_type_reference_must_exist() {
        let store = MemoryInventoryStore::new();
        let err = store
            .create_tool(&tool("SN-1", Some(99)), Utc::now())
            .await
            .expect_err("unknown type");
        assert_eq!(err.kind, ErrorKind::Constraint);
        assert!(err.message.contains("tools_type_id_fkey"));
    }

    #[tokio::test]
    async fn test_deleting_tool_type_detaches_tools() {
        let store = MemoryInventoryStore::new();
        let tt = store
            .create_tool_type(&CreateToolType {
                name: "Stabilizers".to_string(),
                description: None,
            })
            .await
            .expect("type");
        let t = store
            .create_tool(&tool("SN-1", Some(tt.id)), Utc::now())
            .await
            .expect("tool");

        assert!(store.delete_tool_type(tt.id).await.expect("delete"));
        let t = store.get_tool(t.id).await.expect("get").expect("exists");
        assert_eq!(t.type_id, None);
    }

    #[tokio::test]
    async fn test_dropped_transaction_discards_writes() {
        let store = MemoryInventoryStore::new();
        let u = store.create_user(&user("jdoe")).await.expect("user");
        let t = store.create_tool(&tool("SN-1", None), Utc::now()).await.expect("tool");

        {
            let mut tx = store.begin().await.expect("begin");
            tx.insert_checkout(&new_checkout(u.id, t.id, Utc::now()))
                .await
                .expect("insert");
            tx.save_tool_state(t.id, ToolStatus::CheckedOut, t.last_calibrated)
                .await
                .expect("save");
        }

        assert!(store.list_open_checkouts().await.expect("list").is_empty());
        let t = store.get_tool(t.id).await.expect("get").expect("exists");
        assert_eq!(t.status, ToolStatus::Available);
    }

    #[tokio::test]
    async fn test_commit_applies_writes() {
        let store = MemoryInventoryStore::new();
        let u = store.create_user(&user("jdoe")).await.expect("user");
        let t = store.create_tool(&tool("SN-1", None), Utc::now()).await.expect("tool");

        let mut tx = store.begin().await.expect("begin");
        let c = tx
            .insert_checkout(&new_checkout(u.id, t.id, Utc::now()))
            .await
            .expect("insert");
        tx.save_tool_state(t.id, ToolStatus::CheckedOut, t.last_calibrated)
            .await
            .expect("save");
        tx.commit().await.expect("commit");

        assert_eq!(store.get_checkout(c.id).await.expect("get"), Some(c));
        let t = store.get_tool(t.id).await.expect("get").expect("exists");
        assert!(t.is_checked_out());
    }

    #[tokio::test]
    async fn test_open_checkout_is_most_recent() {
        let store = MemoryInventoryStore::new();
        let u = store.create_user(&user("jdoe")).await.expect("user");
        let t = store.create_tool(&tool("SN-1", None), Utc::now()).await.expect("tool");
        let earlier = Utc::now() - Duration::hours(2);
        let later = Utc::now();

        let mut tx = store.begin().await.expect("begin");
        tx.insert_checkout(&new_checkout(u.id, t.id, earlier))
            .await
            .expect("first");
        let newest = tx
            .insert_checkout(&new_checkout(u.id, t.id, later))
            .await
            .expect("second");
        let open = tx.find_open_checkout(t.id).await.expect("find");
        assert_eq!(open.map(|c| c.id), Some(newest.id));
        tx.commit().await.expect("commit");

        let listed = store.list_open_checkouts().await.expect("list");
        assert_eq!(listed.first().map(|c| c.id), Some(newest.id));
    }

    #[tokio::test]
    async fn test_referenced_records_cannot_be_deleted() {
        let store = MemoryInventoryStore::new();
        let u = store.create_user(&user("jdoe")).await.expect("user");
        let t = store.create_tool(&tool("SN-1", None), Utc::now()).await.expect("tool");
        let mut tx = store.begin().await.expect("begin");
        tx.insert_checkout(&new_checkout(u.id, t.id, Utc::now()))
            .await
            .expect("insert");
        tx.commit().await.expect("commit");

        let err = store.delete_tool(t.id).await.expect_err("referenced tool");
        assert!(err.message.contains("checkouts_tool_id_fkey"));
        let err = store.delete_user(u.id).await.expect_err("referenced user");
        assert!(err.message.contains("checkouts_user_id_fkey"));
    }

    #[tokio::test]
    async fn test_available_tools_sorted_by_serial() {
        let store = MemoryInventoryStore::new();
        let now = Utc::now();
        for serial in ["SN-3", "SN-1", "SN-2"] {
            store.create_tool(&tool(serial, None), now).await.expect("tool");
        }
        let serials: Vec<String> = store
            .list_available_tools()
            .await
            .expect("list")
            .into_iter()
            .map(|t| t.serial_number)
            .collect();
        assert_eq!(serials, ["SN-1", "SN-2", "SN-3"]);
    }
}
