//! Tool repository implementation.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnection;
use sqlx::PgPool;

use toolcrib_core::result::AppResult;
use toolcrib_entity::tool::{CreateTool, Tool, ToolStatus, UpdateTool};

use super::db_error;

/// Repository for tool registration and queries.
#[derive(Debug, Clone)]
pub struct ToolRepository {
    pool: PgPool,
}

impl ToolRepository {
    /// Create a new tool repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a tool by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Tool>> {
        sqlx::query_as::<_, Tool>("SELECT * FROM tools WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find tool"))
    }

    /// Find a tool by its serial number.
    pub async fn find_by_serial(&self, serial_number: &str) -> AppResult<Option<Tool>> {
        sqlx::query_as::<_, Tool>("SELECT * FROM tools WHERE serial_number = $1")
            .bind(serial_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find tool by serial"))
    }

    /// List all tools ordered by id.
    pub async fn find_all(&self) -> AppResult<Vec<Tool>> {
        sqlx::query_as::<_, Tool>("SELECT * FROM tools ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list tools"))
    }

    /// List tools that can be checked out, ordered by serial number.
    pub async fn find_available(&self) -> AppResult<Vec<Tool>> {
        sqlx::query_as::<_, Tool>(
            "SELECT * FROM tools WHERE status = 'available' ORDER BY serial_number",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list available tools"))
    }

    /// Register a tool. New tools start available and freshly calibrated.
    pub async fn create(&self, data: &CreateTool, registered_at: DateTime<Utc>) -> AppResult<Tool> {
        sqlx::query_as::<_, Tool>(
            "INSERT INTO tools (name, serial_number, type_id, location, status, last_calibrated) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(data.type_id)
        .bind(&data.location)
        .bind(ToolStatus::Available)
        .bind(registered_at)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create tool"))
    }

    /// Replace a tool's descriptive fields. Status is left untouched.
    pub async fn update(&self, id: i64, data: &UpdateTool) -> AppResult<Option<Tool>> {
        sqlx::query_as::<_, Tool>(
            "UPDATE tools SET name = $2, serial_number = $3, type_id = $4, location = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.serial_number)
        .bind(data.type_id)
        .bind(&data.location)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update tool"))
    }

    /// Delete a tool.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tools WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete tool"))?;
        Ok(result.rows_affected() > 0)
    }

    /// Read a tool and lock its row until the surrounding transaction ends.
    pub async fn lock_by_id(conn: &mut PgConnection, id: i64) -> AppResult<Option<Tool>> {
        sqlx::query_as::<_, Tool>("SELECT * FROM tools WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
            .map_err(db_error("Failed to lock tool"))
    }

    /// Write a tool's lifecycle fields.
    pub async fn save_state(
        conn: &mut PgConnection,
        id: i64,
        status: ToolStatus,
        last_calibrated: Option<DateTime<Utc>>,
    ) -> AppResult<Option<Tool>> {
        sqlx::query_as::<_, Tool>(
            "UPDATE tools SET status = $2, last_calibrated = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .bind(last_calibrated)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error("Failed to update tool status"))
    }
}
