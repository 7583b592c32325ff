use std::sync::Arc;

use storefront_catalog::{Product, ProductInventory};
use storefront_core::ProductId;
use storefront_infra::ProductStore;

use crate::error::CheckoutError;

/// Result of a read-only availability check.
#[derive(Debug, Clone)]
pub struct Availability {
    pub available: bool,
    pub product: Product,
}

/// Gates order placement on stock sufficiency and applies the stock change.
///
/// The guard performs no in-process locking; the only synchronization is the
/// store's conditional decrement, scoped per product id.
#[derive(Clone)]
pub struct InventoryGuard {
    products: Arc<dyn ProductStore>,
}

impl InventoryGuard {
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    /// Side-effect-free check: can `requested` units currently be fulfilled?
    ///
    /// Fails with `ProductNotFound` if no such product exists. The answer is
    /// advisory; under concurrency only [`reserve`](Self::reserve) decides.
    pub fn check_availability(
        &self,
        product_id: ProductId,
        requested: u32,
    ) -> Result<Availability, CheckoutError> {
        let product = self
            .products
            .get(product_id)
            .map_err(CheckoutError::from)?
            .ok_or(CheckoutError::ProductNotFound)?;
        Ok(Availability {
            available: product.inventory.can_fulfill(requested),
            product,
        })
    }

    /// Atomically take `quantity` units of stock, reducing the counter and
    /// re-deriving `in_stock`.
    ///
    /// `quantity` is positive and means "reduce by this much". Insufficiency
    /// and a product deleted since the check both surface as errors with no
    /// stock change; the counter never goes negative.
    pub fn reserve(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<ProductInventory, CheckoutError> {
        let inventory = self.products.decrement_stock(product_id, quantity)?;
        tracing::debug!(
            product_id = %product_id,
            quantity,
            remaining = inventory.quantity,
            "stock reserved"
        );
        Ok(inventory)
    }

    /// Compensating increment: give reserved units back after a downstream
    /// failure.
    pub fn release(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<ProductInventory, CheckoutError> {
        let inventory = self.products.restock(product_id, quantity)?;
        tracing::warn!(
            product_id = %product_id,
            quantity,
            remaining = inventory.quantity,
            "reserved stock released"
        );
        Ok(inventory)
    }
}
