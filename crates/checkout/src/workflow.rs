use std::sync::Arc;

use chrono::Utc;

use storefront_core::OrderId;
use storefront_infra::{OrderStore, ProductStore};
use storefront_orders::{Order, OrderRequest};

use crate::error::CheckoutError;
use crate::guard::InventoryGuard;

/// End-to-end placement of one order.
///
/// Per request: validate → availability check → reserve stock → persist
/// order. The reserve happens **before** the insert, so a committed order
/// whose inventory was never decremented cannot exist; the only compensation
/// path is releasing the reservation when the insert fails.
#[derive(Clone)]
pub struct OrderWorkflow {
    guard: InventoryGuard,
    orders: Arc<dyn OrderStore>,
}

impl OrderWorkflow {
    pub fn new(products: Arc<dyn ProductStore>, orders: Arc<dyn OrderStore>) -> Self {
        Self {
            guard: InventoryGuard::new(products),
            orders,
        }
    }

    pub fn guard(&self) -> &InventoryGuard {
        &self.guard
    }

    /// Place an order.
    ///
    /// On success a durable order record exists, the product's quantity has
    /// been reduced by exactly `request.quantity`, and `in_stock` has been
    /// re-derived. Every failure before the reserve step leaves no side
    /// effects at all.
    pub fn place_order(&self, request: OrderRequest) -> Result<Order, CheckoutError> {
        request.validate()?;

        let product_id = request.product_id;
        let quantity = request.quantity;

        // Read-only pre-check: rejects missing products and obviously short
        // stock without touching anything.
        let availability = self.guard.check_availability(product_id, quantity)?;
        if !availability.available {
            return Err(CheckoutError::InsufficientInventory);
        }

        // The authoritative step under concurrency: the store applies the
        // sufficiency check and the subtraction as one conditional update,
        // so racing orders cannot both succeed on the same units.
        self.guard.reserve(product_id, quantity)?;

        let order = request.into_order(OrderId::new(), Utc::now());
        let order_id = order.id;
        match self.orders.insert(order) {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.id,
                    product_id = %order.product_id,
                    quantity = order.quantity,
                    "order placed"
                );
                Ok(order)
            }
            Err(store_err) => {
                tracing::error!(
                    order_id = %order_id,
                    product_id = %product_id,
                    error = %store_err,
                    "order insert failed after stock was reserved; releasing"
                );
                if let Err(release_err) = self.guard.release(product_id, quantity) {
                    // Manual reconciliation needed; never reported as success.
                    tracing::error!(
                        product_id = %product_id,
                        quantity,
                        error = %release_err,
                        "failed to release reserved stock"
                    );
                }
                Err(CheckoutError::Persistence(store_err.to_string()))
            }
        }
    }

    /// List placed orders, optionally restricted to an exact email match.
    ///
    /// An empty result is a success here; surfacing it otherwise is a
    /// boundary-layer policy.
    pub fn list_orders(&self, email: Option<&str>) -> Result<Vec<Order>, CheckoutError> {
        self.orders.list(email).map_err(CheckoutError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use storefront_catalog::{Product, ProductDraft};
    use storefront_core::ProductId;
    use storefront_infra::{InMemoryOrderStore, InMemoryProductStore, StoreError};

    fn draft(quantity: u32) -> ProductDraft {
        ProductDraft {
            name: "Canvas Tote".to_string(),
            description: "Heavy cotton tote bag".to_string(),
            price: 1_500,
            category: "bags".to_string(),
            tags: vec![],
            variants: vec![],
            quantity,
        }
    }

    struct Fixture {
        products: Arc<InMemoryProductStore>,
        orders: Arc<InMemoryOrderStore>,
        workflow: OrderWorkflow,
        product_id: ProductId,
    }

    fn fixture(stock: u32) -> Fixture {
        let products = Arc::new(InMemoryProductStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let product = Product::create(ProductId::new(), draft(stock), Utc::now()).unwrap();
        let product_id = product.id;
        products.insert(product).unwrap();
        let workflow = OrderWorkflow::new(products.clone(), orders.clone());
        Fixture {
            products,
            orders,
            workflow,
            product_id,
        }
    }

    fn request(f: &Fixture, quantity: u32) -> OrderRequest {
        OrderRequest {
            email: "buyer@example.com".to_string(),
            product_id: f.product_id,
            price: 1_500,
            quantity,
        }
    }

    fn stock_of(f: &Fixture) -> u32 {
        f.products
            .get(f.product_id)
            .unwrap()
            .unwrap()
            .inventory
            .quantity
    }

    #[test]
    fn placing_an_order_decrements_stock_by_exactly_the_quantity() {
        let f = fixture(5);
        let order = f.workflow.place_order(request(&f, 3)).unwrap();

        assert_eq!(order.quantity, 3);
        let product = f.products.get(f.product_id).unwrap().unwrap();
        assert_eq!(product.inventory.quantity, 2);
        assert!(product.inventory.in_stock);
        assert_eq!(f.orders.list(None).unwrap().len(), 1);
    }

    #[test]
    fn draining_stock_flips_in_stock_off() {
        let f = fixture(2);
        f.workflow.place_order(request(&f, 2)).unwrap();

        let product = f.products.get(f.product_id).unwrap().unwrap();
        assert_eq!(product.inventory.quantity, 0);
        assert!(!product.inventory.in_stock);
    }

    #[test]
    fn insufficient_stock_rejects_with_no_side_effects() {
        let f = fixture(0);
        let err = f.workflow.place_order(request(&f, 1)).unwrap_err();

        assert!(matches!(err, CheckoutError::InsufficientInventory));
        assert_eq!(stock_of(&f), 0);
        assert!(f.orders.list(None).unwrap().is_empty());
    }

    #[test]
    fn unknown_product_rejects_with_no_side_effects() {
        let f = fixture(5);
        let mut req = request(&f, 1);
        req.product_id = ProductId::new();

        let err = f.workflow.place_order(req).unwrap_err();
        assert!(matches!(err, CheckoutError::ProductNotFound));
        assert!(f.orders.list(None).unwrap().is_empty());
        assert_eq!(stock_of(&f), 5);
    }

    #[test]
    fn malformed_request_rejects_before_any_store_access() {
        let f = fixture(5);
        let mut req = request(&f, 1);
        req.email = "not-an-email".to_string();

        let err = f.workflow.place_order(req).unwrap_err();
        assert!(matches!(err, CheckoutError::Validation(_)));
        assert_eq!(stock_of(&f), 5);
        assert!(f.orders.list(None).unwrap().is_empty());
    }

    /// Order store that always fails, for exercising the compensation path.
    struct BrokenOrderStore;

    impl OrderStore for BrokenOrderStore {
        fn insert(&self, _order: Order) -> Result<Order, StoreError> {
            Err(StoreError::Backend("disk full".to_string()))
        }

        fn list(&self, _email: Option<&str>) -> Result<Vec<Order>, StoreError> {
            Err(StoreError::Backend("disk full".to_string()))
        }
    }

    #[test]
    fn failed_order_insert_releases_the_reserved_stock() {
        let products = Arc::new(InMemoryProductStore::new());
        let product = Product::create(ProductId::new(), draft(5), Utc::now()).unwrap();
        let product_id = product.id;
        products.insert(product).unwrap();
        let workflow = OrderWorkflow::new(products.clone(), Arc::new(BrokenOrderStore));

        let err = workflow
            .place_order(OrderRequest {
                email: "buyer@example.com".to_string(),
                product_id,
                price: 1_500,
                quantity: 3,
            })
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Persistence(_)));
        let inv = products.get(product_id).unwrap().unwrap().inventory;
        assert_eq!(inv.quantity, 5);
        assert!(inv.in_stock);
    }

    #[test]
    fn repeated_list_orders_with_no_writes_returns_the_same_set() {
        let f = fixture(10);
        f.workflow.place_order(request(&f, 1)).unwrap();
        f.workflow.place_order(request(&f, 2)).unwrap();

        let mut first = f.workflow.list_orders(None).unwrap();
        let mut second = f.workflow.list_orders(None).unwrap();
        first.sort_by_key(|o| o.id.to_string());
        second.sort_by_key(|o| o.id.to_string());
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn list_orders_filters_by_exact_email() {
        let f = fixture(10);
        f.workflow.place_order(request(&f, 1)).unwrap();
        let mut other = request(&f, 1);
        other.email = "someone.else@example.com".to_string();
        f.workflow.place_order(other).unwrap();

        let mine = f.workflow.list_orders(Some("buyer@example.com")).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].email, "buyer@example.com");
        assert!(f.workflow.list_orders(Some("nobody@example.com")).unwrap().is_empty());
    }

    #[test]
    fn concurrent_single_unit_orders_never_oversell() {
        const STOCK: u32 = 5;
        const ORDERS: u32 = 8;

        let f = fixture(STOCK);
        let workflow = Arc::new(f.workflow.clone());

        let handles: Vec<_> = (0..ORDERS)
            .map(|i| {
                let workflow = workflow.clone();
                let req = OrderRequest {
                    email: format!("buyer{i}@example.com"),
                    product_id: f.product_id,
                    price: 1_500,
                    quantity: 1,
                };
                std::thread::spawn(move || workflow.place_order(req))
            })
            .collect();

        let mut successes = 0u32;
        let mut rejections = 0u32;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(_) => successes += 1,
                Err(CheckoutError::InsufficientInventory) => rejections += 1,
                Err(other) => panic!("unexpected failure kind: {other:?}"),
            }
        }

        assert_eq!(successes, STOCK);
        assert_eq!(rejections, ORDERS - STOCK);
        assert_eq!(stock_of(&f), 0);
        assert_eq!(f.orders.list(None).unwrap().len(), STOCK as usize);
    }
}

#[cfg(test)]
mod properties {
    use super::*;
    use chrono::Utc;
    use proptest::prelude::*;
    use storefront_catalog::{Product, ProductDraft};
    use storefront_core::ProductId;
    use storefront_infra::{InMemoryOrderStore, InMemoryProductStore};

    fn seeded_workflow(stock: u32) -> (OrderWorkflow, Arc<InMemoryProductStore>, ProductId) {
        let products = Arc::new(InMemoryProductStore::new());
        let orders = Arc::new(InMemoryOrderStore::new());
        let draft = ProductDraft {
            name: "Prop Widget".to_string(),
            description: "generated".to_string(),
            price: 100,
            category: "misc".to_string(),
            tags: vec![],
            variants: vec![],
            quantity: stock,
        };
        let product = Product::create(ProductId::new(), draft, Utc::now()).unwrap();
        let id = product.id;
        products.insert(product).unwrap();
        (OrderWorkflow::new(products.clone(), orders), products, id)
    }

    proptest! {
        #[test]
        fn sufficient_requests_succeed_and_account_exactly(
            stock in 1u32..500,
            requested in 1u32..500,
        ) {
            let requested = requested.min(stock);
            let (workflow, products, id) = seeded_workflow(stock);

            let order = workflow.place_order(OrderRequest {
                email: "p@example.com".to_string(),
                product_id: id,
                price: 1,
                quantity: requested,
            }).unwrap();

            prop_assert_eq!(order.quantity, requested);
            let inv = products.get(id).unwrap().unwrap().inventory;
            prop_assert_eq!(inv.quantity, stock - requested);
            prop_assert_eq!(inv.in_stock, stock - requested > 0);
        }

        #[test]
        fn short_requests_are_rejected_and_change_nothing(
            stock in 0u32..500,
            excess in 1u32..500,
        ) {
            let requested = stock + excess;
            let (workflow, products, id) = seeded_workflow(stock);

            let err = workflow.place_order(OrderRequest {
                email: "p@example.com".to_string(),
                product_id: id,
                price: 1,
                quantity: requested,
            }).unwrap_err();

            prop_assert!(matches!(err, CheckoutError::InsufficientInventory));
            let inv = products.get(id).unwrap().unwrap().inventory;
            prop_assert_eq!(inv.quantity, stock);
        }
    }
}
