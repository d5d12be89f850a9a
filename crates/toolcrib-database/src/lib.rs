//! # toolcrib-database
//!
//! Persistence for Toolcrib. The [`store::InventoryStore`] trait is the
//! boundary the service layer talks to; it is implemented by a PostgreSQL
//! backend (built on the repositories in [`repositories`]) and by an
//! in-memory backend used for tests and local demos.

pub mod connection;
pub mod repositories;
pub mod store;

pub use connection::{apply_schema, open_pool};
pub use store::{InventoryStore, StoreTransaction};
