use serde::{Deserialize, Serialize};

use stockcheck_core::{DomainError, DomainResult, ProductId, ValueObject};

/// Point-in-time inventory snapshot for one product, as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryFact {
    pub product_id: ProductId,
    #[serde(default = "default_true")]
    pub exists: bool,
    pub in_stock: bool,
    pub tracks_stock: bool,
    /// Units on hand. Present iff `tracks_stock`.
    #[serde(default)]
    pub available_qty: Option<u64>,
    #[serde(default)]
    pub display_name: String,
}

fn default_true() -> bool {
    true
}

impl ValueObject for InventoryFact {}

impl InventoryFact {
    /// A product whose stock is managed as a finite count.
    pub fn tracked(product_id: ProductId, display_name: impl Into<String>, available_qty: u64) -> Self {
        Self {
            product_id,
            exists: true,
            in_stock: true,
            tracks_stock: true,
            available_qty: Some(available_qty),
            display_name: display_name.into(),
        }
    }

    /// A product without stock management (treated as unlimited).
    pub fn untracked(product_id: ProductId, display_name: impl Into<String>) -> Self {
        Self {
            product_id,
            exists: true,
            in_stock: true,
            tracks_stock: false,
            available_qty: None,
            display_name: display_name.into(),
        }
    }

    /// Placeholder for an id the catalog does not know.
    pub fn missing(product_id: ProductId) -> Self {
        Self {
            product_id,
            exists: false,
            in_stock: false,
            tracks_stock: false,
            available_qty: None,
            display_name: String::new(),
        }
    }

    /// Mark the product as out of stock, independent of any tracked count.
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.tracks_stock != self.available_qty.is_some() {
            return Err(DomainError::invariant(format!(
                "product {}: available_qty must be present iff stock is tracked",
                self.product_id
            )));
        }
        Ok(())
    }
}
