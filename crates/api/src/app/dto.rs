use serde::Deserialize;

use storefront_catalog::{ProductDraft, ProductVariant};
use storefront_core::{DomainError, DomainResult};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct VariantBody {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryBody {
    pub quantity: i64,
    /// Accepted for wire compatibility; the stored flag is always derived
    /// from the quantity.
    #[serde(default)]
    pub in_stock: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ProductBody {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub variants: Vec<VariantBody>,
    pub inventory: InventoryBody,
}

impl ProductBody {
    /// Narrow the raw payload into a validated draft.
    ///
    /// Numbers arrive signed so that a negative value is a validation error
    /// rather than a deserialization failure.
    pub fn into_draft(self) -> DomainResult<ProductDraft> {
        let price = u64::try_from(self.price)
            .map_err(|_| DomainError::validation("price must be positive"))?;
        let quantity = u32::try_from(self.inventory.quantity)
            .map_err(|_| DomainError::validation("inventory quantity must not be negative"))?;

        let draft = ProductDraft {
            name: self.name,
            description: self.description,
            price,
            category: self.category,
            tags: self.tags,
            variants: self
                .variants
                .into_iter()
                .map(|v| ProductVariant {
                    kind: v.kind,
                    value: v.value,
                })
                .collect(),
            quantity,
        };
        draft.validate()?;
        Ok(draft)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderBody {
    pub email: String,
    pub product_id: String,
    pub price: i64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub search_term: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub email: Option<String>,
}
