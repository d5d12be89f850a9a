//! Tool type reference data.

pub mod model;

pub use model::{CreateToolType, ToolType, UpdateToolType};
