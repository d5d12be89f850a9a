//! Tool registration and lookup.

pub mod service;

pub use service::ToolService;
