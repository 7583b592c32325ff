//! Order placement: inventory gating and the end-to-end workflow.
//!
//! This crate owns the order-placement / inventory-consistency protocol that
//! validates a request, gates it on stock, persists the order, and adjusts
//! the counter, with explicit failure and concurrency semantics at each step.

pub mod error;
pub mod guard;
pub mod workflow;

pub use error::CheckoutError;
pub use guard::{Availability, InventoryGuard};
pub use workflow::OrderWorkflow;
