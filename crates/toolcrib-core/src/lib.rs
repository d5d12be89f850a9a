//! # toolcrib-core
//!
//! Core crate for Toolcrib. Contains the configuration schema and the
//! unified error system shared by every other crate in the workspace.
//!
//! This crate has **no** internal dependencies on other Toolcrib crates.

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
