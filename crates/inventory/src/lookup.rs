use std::sync::Arc;

use thiserror::Error;

use stockcheck_core::ProductId;

use crate::fact::InventoryFact;

/// Failure of the lookup collaborator itself (not a miss).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("inventory backend unavailable: {0}")]
    Unavailable(String),

    #[error("inventory record for product {product_id} is corrupt: {reason}")]
    Corrupt { product_id: ProductId, reason: String },
}

/// Read-only access to the catalog's inventory facts.
///
/// `Ok(None)` means the catalog has no such product. Implementations must not
/// mutate or reserve stock.
pub trait InventoryLookup: Send + Sync {
    fn lookup(&self, product_id: ProductId) -> Result<Option<InventoryFact>, LookupError>;
}

impl<S> InventoryLookup for Arc<S>
where
    S: InventoryLookup + ?Sized,
{
    fn lookup(&self, product_id: ProductId) -> Result<Option<InventoryFact>, LookupError> {
        (**self).lookup(product_id)
    }
}

impl<S> InventoryLookup for &S
where
    S: InventoryLookup + ?Sized,
{
    fn lookup(&self, product_id: ProductId) -> Result<Option<InventoryFact>, LookupError> {
        (**self).lookup(product_id)
    }
}
