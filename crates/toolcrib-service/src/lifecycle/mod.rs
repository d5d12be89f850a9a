//! Tool lifecycle: checkout, return and calibration transitions, plus
//! read-only queries over checkout records.

pub mod due_date;
pub mod manager;
pub mod query;

pub use due_date::parse_due_date;
pub use manager::ToolLifecycleManager;
pub use query::CheckoutQueryService;
