use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, OrderId, ProductId};

/// A placed order. Immutable once created; references its product by id only,
/// so the product may later go out of stock or be deleted without touching
/// order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub email: String,
    pub product_id: ProductId,
    /// Price in smallest currency unit, captured at order time (not re-derived
    /// from the product).
    pub price: u64,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
}

/// Incoming order payload, prior to shape validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    pub email: String,
    pub product_id: ProductId,
    pub price: u64,
    pub quantity: u32,
}

impl OrderRequest {
    /// Field-level validation: the canonical constraint set for order requests.
    ///
    /// Shape only: stock sufficiency and product existence are checked by the
    /// workflow, not here.
    pub fn validate(&self) -> DomainResult<()> {
        if !is_valid_email(&self.email) {
            return Err(DomainError::validation("email is not a valid address"));
        }
        if self.price == 0 {
            return Err(DomainError::validation("price must be positive"));
        }
        if self.quantity == 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(())
    }

    /// Materialize the order record from a validated request.
    pub fn into_order(self, id: OrderId, created_at: DateTime<Utc>) -> Order {
        Order {
            id,
            email: self.email,
            product_id: self.product_id,
            price: self.price,
            quantity: self.quantity,
            created_at,
        }
    }
}

/// Minimal RFC-shaped email check: one `@` with a non-empty local part and a
/// dotted, non-empty domain, no whitespace.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty()
}
