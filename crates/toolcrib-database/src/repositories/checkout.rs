//! Checkout repository implementation.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgConnection;
use sqlx::PgPool;

use toolcrib_core::result::AppResult;
use toolcrib_entity::checkout::{Checkout, NewCheckout};

use super::db_error;

/// Repository for checkout records.
#[derive(Debug, Clone)]
pub struct CheckoutRepository {
    pool: PgPool,
}

impl CheckoutRepository {
    /// Create a new checkout repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a checkout by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Checkout>> {
        sqlx::query_as::<_, Checkout>("SELECT * FROM checkouts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find checkout"))
    }

    /// List all open checkouts, newest first.
    pub async fn find_open(&self) -> AppResult<Vec<Checkout>> {
        sqlx::query_as::<_, Checkout>(
            "SELECT * FROM checkouts WHERE returned_at IS NULL \
             ORDER BY checked_out_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list open checkouts"))
    }

    /// List every checkout of one tool, newest first.
    pub async fn find_by_tool(&self, tool_id: i64) -> AppResult<Vec<Checkout>> {
        sqlx::query_as::<_, Checkout>(
            "SELECT * FROM checkouts WHERE tool_id = $1 ORDER BY checked_out_at DESC, id DESC",
        )
        .bind(tool_id)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error("Failed to list tool checkouts"))
    }

    /// Most recently opened checkout of a tool that has not been returned.
    pub async fn find_open_for_tool(
        conn: &mut PgConnection,
        tool_id: i64,
    ) -> AppResult<Option<Checkout>> {
        sqlx::query_as::<_, Checkout>(
            "SELECT * FROM checkouts WHERE tool_id = $1 AND returned_at IS NULL \
             ORDER BY checked_out_at DESC, id DESC LIMIT 1 FOR UPDATE",
        )
        .bind(tool_id)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error("Failed to find open checkout"))
    }

    /// Insert a new open checkout.
    pub async fn insert(conn: &mut PgConnection, data: &NewCheckout) -> AppResult<Checkout> {
        sqlx::query_as::<_, Checkout>(
            "INSERT INTO checkouts (user_id, tool_id, due_date, project_location, checked_out_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.user_id)
        .bind(data.tool_id)
        .bind(data.due_date)
        .bind(&data.project_location)
        .bind(data.checked_out_at)
        .fetch_one(&mut *conn)
        .await
        .map_err(db_error("Failed to create checkout"))
    }

    /// Close a checkout. Only the return fields are written.
    pub async fn close(
        conn: &mut PgConnection,
        id: i64,
        returned_at: DateTime<Utc>,
        condition: Option<&str>,
    ) -> AppResult<Option<Checkout>> {
        sqlx::query_as::<_, Checkout>(
            "UPDATE checkouts SET returned_at = $2, condition_on_return = $3 \
             WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(returned_at)
        .bind(condition)
        .fetch_optional(&mut *conn)
        .await
        .map_err(db_error("Failed to close checkout"))
    }
}
