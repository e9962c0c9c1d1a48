//! Strongly-typed product identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::DomainError;

/// Identifier of a storefront product (simple product, variation, or grouped child).
///
/// Catalog ids are strictly positive integers; `0` is the storefront's
/// "nothing selected" sentinel and is never a valid id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct ProductId(u64);

impl ProductId {
    pub fn new(raw: u64) -> Result<Self, DomainError> {
        if raw == 0 {
            return Err(DomainError::invalid_id("ProductId: must be greater than 0"));
        }
        Ok(Self(raw))
    }

    pub fn get(&self) -> u64 {
        self.0
    }

    /// Coerce an untyped request value into a product id.
    ///
    /// Accepts JSON integers and numeric strings (whitespace trimmed). Zero,
    /// negatives, fractions, and non-numeric text yield `None`.
    pub fn parse_raw(value: &JsonValue) -> Option<Self> {
        match value {
            JsonValue::Number(n) => n.as_u64().and_then(|v| Self::new(v).ok()),
            JsonValue::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

impl core::fmt::Display for ProductId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<u64> for ProductId {
    type Error = DomainError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for u64 {
    fn from(value: ProductId) -> Self {
        value.0
    }
}

impl FromStr for ProductId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .trim()
            .parse::<u64>()
            .map_err(|e| DomainError::invalid_id(format!("ProductId: {e}")))?;
        Self::new(raw)
    }
}
