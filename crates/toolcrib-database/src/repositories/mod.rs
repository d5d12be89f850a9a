//! PostgreSQL repositories for the Toolcrib entities.
//!
//! Pool-bound methods serve plain CRUD. Associated functions that take a
//! `&mut PgConnection` are used inside store transactions.

pub mod checkout;
pub mod tool;
pub mod tool_type;
pub mod user;

pub use checkout::CheckoutRepository;
pub use tool::ToolRepository;
pub use tool_type::ToolTypeRepository;
pub use user::UserRepository;

use toolcrib_core::error::{AppError, ErrorKind};

/// Classify a sqlx error: uniqueness and foreign-key violations become
/// [`ErrorKind::Constraint`], everything else [`ErrorKind::Database`].
pub(crate) fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| {
        let constraint = e.as_database_error().and_then(|db| {
            (db.is_unique_violation() || db.is_foreign_key_violation())
                .then(|| db.constraint().unwrap_or("unnamed").to_string())
        });

        match constraint {
            Some(name) => AppError::with_source(
                ErrorKind::Constraint,
                format!("{context}: constraint '{name}' violated"),
                e,
            ),
            None => AppError::with_source(ErrorKind::Database, format!("{context}: {e}"), e),
        }
    }
}
