//! Infrastructure layer: durable record stores.

pub mod store;

pub use store::{
    InMemoryOrderStore, InMemoryProductStore, OrderStore, ProductStore, StoreError,
};
