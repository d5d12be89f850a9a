//! Route handlers organized by domain.

pub mod checkout;
pub mod health;
pub mod tool;
pub mod tool_type;
pub mod user;
