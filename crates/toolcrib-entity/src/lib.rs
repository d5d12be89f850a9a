//! # toolcrib-entity
//!
//! Domain entity models for Toolcrib. Every struct in this crate represents
//! a database table row or the payload used to create or update one. All
//! entities derive `Debug`, `Clone`, `Serialize` and `Deserialize`; table
//! rows additionally derive `sqlx::FromRow`.

pub mod checkout;
pub mod tool;
pub mod tool_type;
pub mod user;
