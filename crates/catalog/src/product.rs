use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storefront_core::{DomainError, DomainResult, ProductId};

/// A named variant of a product, e.g. `{type: "size", value: "42"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductVariant {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

/// Stock-tracking sub-record of a product.
///
/// Invariant: `in_stock == (quantity > 0)` after every mutation. The flag is
/// always derived from the counter, never accepted from callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInventory {
    pub quantity: u32,
    pub in_stock: bool,
}

impl ProductInventory {
    pub fn from_quantity(quantity: u32) -> Self {
        Self {
            quantity,
            in_stock: quantity > 0,
        }
    }

    /// Whether `requested` units can currently be fulfilled.
    pub fn can_fulfill(&self, requested: u32) -> bool {
        self.in_stock && self.quantity >= requested
    }

    /// Reduce the counter by `quantity` units and re-derive `in_stock`.
    ///
    /// The counter never goes negative: sufficiency must have been checked
    /// before calling this, and a shortfall here is an invariant violation,
    /// not an insufficiency report.
    pub fn decrement(&mut self, quantity: u32) -> DomainResult<()> {
        let remaining = self
            .quantity
            .checked_sub(quantity)
            .ok_or_else(|| DomainError::invariant("inventory quantity would go negative"))?;
        *self = Self::from_quantity(remaining);
        Ok(())
    }

    /// Add `quantity` units back and re-derive `in_stock`.
    pub fn restock(&mut self, quantity: u32) {
        *self = Self::from_quantity(self.quantity.saturating_add(quantity));
    }
}

/// Catalog product record, as persisted and served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in smallest currency unit (e.g., cents). Always positive.
    pub price: u64,
    pub category: String,
    pub tags: Vec<String>,
    pub variants: Vec<ProductVariant>,
    pub inventory: ProductInventory,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating or replacing a product.
///
/// Carries only the client-settable fields; identity, `in_stock` and the
/// creation timestamp are assigned server-side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub tags: Vec<String>,
    pub variants: Vec<ProductVariant>,
    pub quantity: u32,
}

impl ProductDraft {
    /// Field-level validation: the canonical constraint set for products.
    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("name must not be empty"));
        }
        if self.description.trim().is_empty() {
            return Err(DomainError::validation("description must not be empty"));
        }
        if self.price == 0 {
            return Err(DomainError::validation("price must be positive"));
        }
        if self.category.trim().is_empty() {
            return Err(DomainError::validation("category must not be empty"));
        }
        for variant in &self.variants {
            if variant.kind.trim().is_empty() || variant.value.trim().is_empty() {
                return Err(DomainError::validation(
                    "variant type and value must not be empty",
                ));
            }
        }
        Ok(())
    }
}

impl Product {
    /// Create a product from a validated draft.
    pub fn create(id: ProductId, draft: ProductDraft, created_at: DateTime<Utc>) -> DomainResult<Self> {
        draft.validate()?;
        Ok(Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            tags: draft.tags,
            variants: draft.variants,
            inventory: ProductInventory::from_quantity(draft.quantity),
            created_at,
        })
    }

    /// Replace all client-settable fields from a validated draft.
    ///
    /// Identity and creation time are kept; `in_stock` is re-derived.
    pub fn apply(&mut self, draft: ProductDraft) -> DomainResult<()> {
        draft.validate()?;
        self.name = draft.name;
        self.description = draft.description;
        self.price = draft.price;
        self.category = draft.category;
        self.tags = draft.tags;
        self.variants = draft.variants;
        self.inventory = ProductInventory::from_quantity(draft.quantity);
        Ok(())
    }

    /// Case-insensitive substring match over name, description, category,
    /// tags, and variant type/value.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        if term.is_empty() {
            return true;
        }
        let hit = |s: &str| s.to_lowercase().contains(&term);
        hit(&self.name)
            || hit(&self.description)
            || hit(&self.category)
            || self.tags.iter().any(|t| hit(t))
            || self
                .variants
                .iter()
                .any(|v| hit(&v.kind) || hit(&v.value))
    }
}
