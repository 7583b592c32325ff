use thiserror::Error;

use storefront_catalog::{Product, ProductDraft, ProductInventory};
use storefront_core::ProductId;
use storefront_orders::Order;

/// Store operation error.
///
/// These are **infrastructure errors** (missing records, rejected conditional
/// updates, backend failures) as opposed to domain errors (validation,
/// invariants). Callers map them to their own error taxonomy.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with the given identifier.
    #[error("record not found")]
    NotFound,

    /// A conditional decrement found less stock than requested. The record is
    /// unchanged.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// The record to be written failed a domain check.
    #[error("invalid record: {0}")]
    InvalidRecord(String),

    /// The storage backend failed (IO, poisoned lock, connection loss).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Durable store of catalog products and their inventory counters.
///
/// ## Design principles
///
/// - **No storage assumptions**: works with the in-memory implementation
///   (tests/dev) and any backend with atomic per-record updates.
/// - **Conditional decrement**: `decrement_stock` is the single atomic
///   check-and-decrement used by order placement. Implementations must apply
///   the sufficiency check and the subtraction as one isolated update per
///   product id, so concurrent orders cannot both pass the check on stale
///   counts and oversell stock.
/// - **Derived availability**: every mutation leaves
///   `in_stock == (quantity > 0)`.
pub trait ProductStore: Send + Sync {
    /// Persist a new product record.
    fn insert(&self, product: Product) -> Result<Product, StoreError>;

    /// Fetch a product by id. Absence is not an error at this layer.
    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// List products, optionally filtered by a case-insensitive search term
    /// matched against name, description, category, tags, and variants.
    fn list(&self, search: Option<&str>) -> Result<Vec<Product>, StoreError>;

    /// Replace a product's client-settable fields from a draft. Fails with
    /// `NotFound` if the record is missing; availability is re-derived.
    fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, StoreError>;

    /// Delete a product. Returns `false` if no record existed. Historical
    /// orders referencing the product are never touched.
    fn delete(&self, id: ProductId) -> Result<bool, StoreError>;

    /// Atomically subtract `quantity` units from the product's stock **only
    /// if** at least that many are available, re-deriving `in_stock`.
    ///
    /// Returns the updated inventory, `NotFound` if the product is missing,
    /// or `InsufficientStock` (record unchanged) when the check fails. The
    /// counter never goes negative.
    fn decrement_stock(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<ProductInventory, StoreError>;

    /// Atomically add `quantity` units back to the product's stock. Used by
    /// the order workflow to release a reservation after a downstream
    /// failure.
    fn restock(&self, id: ProductId, quantity: u32) -> Result<ProductInventory, StoreError>;
}

/// Durable, append-only store of placed orders.
///
/// Orders are immutable once inserted; there is no update or delete.
pub trait OrderStore: Send + Sync {
    /// Persist a new order record.
    fn insert(&self, order: Order) -> Result<Order, StoreError>;

    /// List orders, optionally restricted to an exact email match. Insertion
    /// order is not guaranteed; an empty result is a success.
    fn list(&self, email: Option<&str>) -> Result<Vec<Order>, StoreError>;
}
