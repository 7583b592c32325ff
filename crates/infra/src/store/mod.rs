//! Durable store boundary for products and orders.
//!
//! This module defines infrastructure-facing abstractions for persisting
//! catalog products and placed orders without making any storage assumptions.
//! Any backend with atomic single-record update support can implement them.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{InMemoryOrderStore, InMemoryProductStore};
pub use r#trait::{OrderStore, ProductStore, StoreError};
