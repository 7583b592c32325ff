//! Product catalog domain module.
//!
//! This crate contains business rules for catalog products, implemented purely
//! as deterministic domain logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{Product, ProductDraft, ProductInventory, ProductVariant};
