//! Typed outcomes of order placement.

use thiserror::Error;

use storefront_core::DomainError;
use storefront_infra::StoreError;

/// Discriminated failure of a checkout operation.
///
/// Every core operation returns one of these kinds rather than a generic
/// failure; the HTTP layer maps kinds to status codes. None of the variants
/// is retried automatically.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Malformed input. No side effects.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The referenced product does not exist. No side effects.
    #[error("product not found")]
    ProductNotFound,

    /// Business-rule rejection: requested quantity is not available. No side
    /// effects, no order persisted.
    #[error("insufficient quantity available in inventory")]
    InsufficientInventory,

    /// The underlying store failed. Surfaced with its message; not retried.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl From<StoreError> for CheckoutError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::ProductNotFound,
            StoreError::InsufficientStock { .. } => Self::InsufficientInventory,
            StoreError::InvalidRecord(_) | StoreError::Backend(_) => {
                Self::Persistence(err.to_string())
            }
        }
    }
}

impl From<DomainError> for CheckoutError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => Self::ProductNotFound,
            other => Self::Validation(other.to_string()),
        }
    }
}
