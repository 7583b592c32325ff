use std::sync::Arc;

use storefront_checkout::OrderWorkflow;
use storefront_infra::{InMemoryOrderStore, InMemoryProductStore, ProductStore};

/// Shared application services handed to every handler.
pub struct AppServices {
    products: Arc<dyn ProductStore>,
    workflow: OrderWorkflow,
}

impl AppServices {
    pub fn products(&self) -> &dyn ProductStore {
        self.products.as_ref()
    }

    pub fn workflow(&self) -> &OrderWorkflow {
        &self.workflow
    }
}

/// Wire up the store boundary and the order workflow.
///
/// Uses the in-memory stores; the traits leave the backend choice open.
pub fn build_services() -> AppServices {
    let products: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::new());
    let orders = Arc::new(InMemoryOrderStore::new());
    let workflow = OrderWorkflow::new(products.clone(), orders);

    AppServices { products, workflow }
}
