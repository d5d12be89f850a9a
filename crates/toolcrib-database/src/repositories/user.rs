//! User repository implementation.

use sqlx::postgres::PgExecutor;
use sqlx::PgPool;

use toolcrib_core::result::AppResult;
use toolcrib_entity::user::{CreateUser, UpdateUser, User};

use super::db_error;

/// Repository for user CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by primary key.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Self::fetch_by_id(&self.pool, id).await
    }

    /// Find a user by primary key on any executor (pool or open transaction).
    pub async fn fetch_by_id<'e, E: PgExecutor<'e>>(executor: E, id: i64) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(db_error("Failed to find user"))
    }

    /// List all users ordered by id.
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list users"))
    }

    /// Create a new user.
    pub async fn create(&self, data: &CreateUser) -> AppResult<User> {
        sqlx::query_as::<_, User>(
            "INSERT INTO users (username, full_name, email, role) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.username)
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.role)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create user"))
    }

    /// Replace a user's fields. Returns `None` if the user does not exist.
    pub async fn update(&self, id: i64, data: &UpdateUser) -> AppResult<Option<User>> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET username = $2, full_name = $3, email = $4, role = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.username)
        .bind(&data.full_name)
        .bind(&data.email)
        .bind(&data.role)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update user"))
    }

    /// Delete a user. Returns `true` if a row was removed.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete user"))?;
        Ok(result.rows_affected() > 0)
    }
}
