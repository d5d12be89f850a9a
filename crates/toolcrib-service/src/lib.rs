//! # toolcrib-service
//!
//! Business logic for Toolcrib. The [`ToolLifecycleManager`] owns every
//! tool status transition (checkout, return, calibrate); the remaining
//! services are thin CRUD accessors over the inventory store.
//!
//! Services follow constructor injection: the store is handed in as an
//! `Arc<dyn InventoryStore>` at construction time.

pub mod lifecycle;
pub mod seed;
pub mod tool;
pub mod tool_type;
pub mod user;

pub use lifecycle::{CheckoutQueryService, ToolLifecycleManager};
pub use seed::{SeedSummary, Seeder};
pub use tool::ToolService;
pub use tool_type::ToolTypeService;
pub use user::UserService;
