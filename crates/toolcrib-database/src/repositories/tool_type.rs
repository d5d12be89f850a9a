//! Tool type repository implementation.

use sqlx::PgPool;

use toolcrib_core::result::AppResult;
use toolcrib_entity::tool_type::{CreateToolType, ToolType, UpdateToolType};

use super::db_error;

/// Repository for tool type reference data.
#[derive(Debug, Clone)]
pub struct ToolTypeRepository {
    pool: PgPool,
}

impl ToolTypeRepository {
    /// Create a new tool type repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a tool type by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<ToolType>> {
        sqlx::query_as::<_, ToolType>("SELECT * FROM tool_types WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find tool type"))
    }

    /// List all tool types ordered by id.
    pub async fn find_all(&self) -> AppResult<Vec<ToolType>> {
        sqlx::query_as::<_, ToolType>("SELECT * FROM tool_types ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to list tool types"))
    }

    /// Create a tool type.
    pub async fn create(&self, data: &CreateToolType) -> AppResult<ToolType> {
        sqlx::query_as::<_, ToolType>(
            "INSERT INTO tool_types (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.description)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create tool type"))
    }

    /// Replace a tool type's fields.
    pub async fn update(&self, id: i64, data: &UpdateToolType) -> AppResult<Option<ToolType>> {
        sqlx::query_as::<_, ToolType>(
            "UPDATE tool_types SET name = $2, description = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(&data.name)
        .bind(&data.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error("Failed to update tool type"))
    }

    /// Delete a tool type. Tools referencing it keep existing with no type.
    pub async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM tool_types WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete tool type"))?;
        Ok(result.rows_affected() > 0)
    }
}
