//! Checkout domain entities.

pub mod model;

pub use model::{Checkout, NewCheckout};
