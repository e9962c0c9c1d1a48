use stockcheck_core::{ProductId, ValueObject};

use crate::messages::ReasonCode;

/// Result of one availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Everything requested can be supplied.
    Available,
    /// The product is in stock, but fewer units than requested.
    LimitedStock { available_qty: u64 },
    OutOfStock,
    ProductNotFound { product_id: ProductId },
    Invalid(ReasonCode),
    /// One or more grouped children cannot be supplied, in input order.
    GroupShortfall(Vec<ChildShortfall>),
}

impl ValueObject for Outcome {}

impl Outcome {
    pub fn is_available(&self) -> bool {
        matches!(self, Outcome::Available)
    }

    /// Short machine-readable label, used in logs and as the reply code.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Available => "stock_available",
            Outcome::LimitedStock { .. } => "limited_stock_available",
            Outcome::OutOfStock => "out_of_stock",
            Outcome::ProductNotFound { .. } => "product_not_found",
            Outcome::Invalid(reason) => reason.code(),
            Outcome::GroupShortfall(_) => "group_shortfall",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortfallReason {
    NotFound,
    OutOfStock,
    Limited { available_qty: u64 },
}

/// A grouped child that blocks the request, with its pre-formatted message line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildShortfall {
    pub product_id: ProductId,
    pub reason: ShortfallReason,
    pub message: String,
}

impl ChildShortfall {
    pub fn not_found(product_id: ProductId) -> Self {
        Self {
            product_id,
            reason: ShortfallReason::NotFound,
            message: format!("Product with ID {product_id} not found."),
        }
    }

    pub fn out_of_stock(product_id: ProductId, display_name: &str) -> Self {
        Self {
            product_id,
            reason: ShortfallReason::OutOfStock,
            message: format!("{display_name}: Sorry, this item is out of stock."),
        }
    }

    pub fn limited(product_id: ProductId, display_name: &str, available_qty: u64) -> Self {
        Self {
            product_id,
            reason: ShortfallReason::Limited { available_qty },
            message: format!("{display_name}: Sorry, we only have {available_qty} units in stock."),
        }
    }
}
