//! Tool type management.

pub mod service;

pub use service::ToolTypeService;
