use std::collections::HashMap;
use std::sync::RwLock;

use storefront_catalog::{Product, ProductDraft, ProductInventory};
use storefront_core::ProductId;
use storefront_orders::Order;

use super::r#trait::{OrderStore, ProductStore, StoreError};

fn poisoned() -> StoreError {
    StoreError::Backend("lock poisoned".to_string())
}

/// In-memory product store.
///
/// Intended for tests/dev. Conditional decrements take the write lock for the
/// whole check-and-subtract, which is what makes them atomic per product.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    records: RwLock<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProductStore for InMemoryProductStore {
    fn insert(&self, product: Product) -> Result<Product, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.insert(product.id, product.clone());
        Ok(product)
    }

    fn get(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records.get(&id).cloned())
    }

    fn list(&self, search: Option<&str>) -> Result<Vec<Product>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records
            .values()
            .filter(|p| search.is_none_or(|term| p.matches(term)))
            .cloned()
            .collect())
    }

    fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let product = records.get_mut(&id).ok_or(StoreError::NotFound)?;
        product
            .apply(draft)
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;
        Ok(product.clone())
    }

    fn delete(&self, id: ProductId) -> Result<bool, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        Ok(records.remove(&id).is_some())
    }

    fn decrement_stock(
        &self,
        id: ProductId,
        quantity: u32,
    ) -> Result<ProductInventory, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let product = records.get_mut(&id).ok_or(StoreError::NotFound)?;

        // Check and subtract under the same lock acquisition.
        if !product.inventory.can_fulfill(quantity) {
            return Err(StoreError::InsufficientStock {
                requested: quantity,
                available: product.inventory.quantity,
            });
        }
        product
            .inventory
            .decrement(quantity)
            .map_err(|e| StoreError::InvalidRecord(e.to_string()))?;
        Ok(product.inventory)
    }

    fn restock(&self, id: ProductId, quantity: u32) -> Result<ProductInventory, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        let product = records.get_mut(&id).ok_or(StoreError::NotFound)?;
        product.inventory.restock(quantity);
        Ok(product.inventory)
    }
}

/// In-memory append-only order store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    records: RwLock<Vec<Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn insert(&self, order: Order) -> Result<Order, StoreError> {
        let mut records = self.records.write().map_err(|_| poisoned())?;
        records.push(order.clone());
        Ok(order)
    }

    fn list(&self, email: Option<&str>) -> Result<Vec<Order>, StoreError> {
        let records = self.records.read().map_err(|_| poisoned())?;
        Ok(records
            .iter()
            .filter(|o| email.is_none_or(|e| o.email == e))
            .cloned()
            .collect())
    }
}
