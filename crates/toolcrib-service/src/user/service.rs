//! User CRUD operations.

use std::sync::Arc;

use tracing::info;

use toolcrib_core::error::AppError;
use toolcrib_core::result::AppResult;
use toolcrib_database::store::InventoryStore;
use toolcrib_entity::user::{CreateUser, UpdateUser, User};

/// Handles user management.
#[derive(Debug, Clone)]
pub struct UserService {
    /// Inventory store.
    store: Arc<dyn InventoryStore>,
    /// Role given to users created without one.
    default_role: String,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(store: Arc<dyn InventoryStore>, default_role: impl Into<String>) -> Self {
        Self {
            store,
            default_role: default_role.into(),
        }
    }

    /// Creates a user. A blank role is replaced by the configured default.
    pub async fn create(&self, data: CreateUser) -> AppResult<User> {
        let data = self.normalize(data)?;
        let user = self.store.create_user(&data).await?;
        info!(user_id = user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    /// Lists all users.
    pub async fn list(&self) -> AppResult<Vec<User>> {
        self.store.list_users().await
    }

    /// Gets a user by id.
    pub async fn get(&self, id: i64) -> AppResult<User> {
        self.store
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))
    }

    /// Replaces a user's fields.
    pub async fn update(&self, id: i64, data: UpdateUser) -> AppResult<User> {
        let data = self.normalize(data)?;
        let user = self
            .store
            .update_user(id, &data)
            .await?
            .ok_or_else(|| AppError::not_found(format!("User {id} not found")))?;
        info!(user_id = id, username = %user.username, "User updated");
        Ok(user)
    }

    /// Deletes a user. Users with checkout history cannot be deleted.
    pub async fn delete(&self, id: i64) -> AppResult<()> {
        if !self.store.delete_user(id).await? {
            return Err(AppError::not_found(format!("User {id} not found")));
        }
        info!(user_id = id, "User deleted");
        Ok(())
    }

    fn normalize(&self, mut data: CreateUser) -> AppResult<CreateUser> {
        data.username = data.username.trim().to_string();
        if data.username.is_empty() {
            return Err(AppError::invalid_input("Username is required"));
        }
        if data.role.trim().is_empty() {
            data.role = self.default_role.clone();
        }
        Ok(data)
    }
}
