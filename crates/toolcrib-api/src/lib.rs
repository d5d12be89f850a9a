//! # toolcrib-api
//!
//! HTTP API layer for Toolcrib built on Axum.
//!
//! Provides the JSON endpoints for users, tool types, tools and checkouts,
//! middleware (CORS, request logging), extractors, DTOs and the mapping
//! from [`toolcrib_core::AppError`] to HTTP status codes.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::{ApiError, ApiResult};
pub use state::AppState;
