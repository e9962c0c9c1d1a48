use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Storefront product type, as sent by the requesting page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    /// A single purchasable item with its own stock count.
    Simple,
    /// A purchasable variant (size/colour) of a parent product; the request carries the variation id.
    Variable,
    /// A listing of independent child products, each with its own requested quantity.
    Grouped,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [ProductKind::Simple, ProductKind::Variable, ProductKind::Grouped];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductKind::Simple => "simple",
            ProductKind::Variable => "variable",
            ProductKind::Grouped => "grouped",
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, ProductKind::Grouped)
    }
}

impl core::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "simple" => Ok(ProductKind::Simple),
            "variable" => Ok(ProductKind::Variable),
            "grouped" => Ok(ProductKind::Grouped),
            other => Err(DomainError::validation(format!(
                "product type must be one of: simple, variable, grouped (got {other:?})"
            ))),
        }
    }
}
