//! Convenience result type alias for Toolcrib.

use crate::error::AppError;

/// A specialized `Result` type for Toolcrib operations.
pub type AppResult<T> = Result<T, AppError>;
