//! Tool domain entities.

pub mod model;
pub mod status;

pub use model::{CreateTool, Tool, UpdateTool};
pub use status::ToolStatus;
