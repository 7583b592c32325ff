//! Orders domain module.
//!
//! This crate contains the order record and request validation, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod order;

pub use order::{Order, OrderRequest};
