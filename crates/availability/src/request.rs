//! Request normalization: untyped storefront input into a typed `StockRequest`.

use serde::Deserialize;
use serde_json::Value as JsonValue;

use stockcheck_core::{DomainError, ProductId, ProductKind, ValueObject};

use crate::messages::ReasonCode;

/// Raw request body, exactly as posted by the product page.
///
/// Every field is optional and loosely typed: ids and quantities arrive as
/// numbers or numeric strings depending on the page.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawStockRequest {
    pub product_id: Option<JsonValue>,
    pub requested_qty: Option<JsonValue>,
    pub products: Option<Vec<RawChild>>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawChild {
    pub product_id: Option<JsonValue>,
    pub requested_qty: Option<JsonValue>,
}

/// One line of a grouped request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildRequest {
    pub product_id: ProductId,
    /// Lines with a quantity of zero or less are ignored by the evaluator.
    pub requested_qty: i64,
}

impl ChildRequest {
    pub fn new(product_id: ProductId, requested_qty: i64) -> Self {
        Self {
            product_id,
            requested_qty,
        }
    }
}

/// Normalized availability question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StockRequest {
    /// Simple product or selected variation: one id, one quantity.
    Single {
        kind: ProductKind,
        product_id: ProductId,
        requested_qty: i64,
    },
    /// Grouped listing: children evaluated independently, in input order.
    Grouped {
        product_id: ProductId,
        children: Vec<ChildRequest>,
    },
}

impl ValueObject for StockRequest {}

impl StockRequest {
    pub fn simple(product_id: ProductId, requested_qty: i64) -> Self {
        Self::Single {
            kind: ProductKind::Simple,
            product_id,
            requested_qty,
        }
    }

    pub fn variable(variation_id: ProductId, requested_qty: i64) -> Self {
        Self::Single {
            kind: ProductKind::Variable,
            product_id: variation_id,
            requested_qty,
        }
    }

    pub fn grouped(product_id: ProductId, children: Vec<ChildRequest>) -> Self {
        Self::Grouped {
            product_id,
            children,
        }
    }

    pub fn kind(&self) -> ProductKind {
        match self {
            StockRequest::Single { kind, .. } => *kind,
            StockRequest::Grouped { .. } => ProductKind::Grouped,
        }
    }

    pub fn product_id(&self) -> ProductId {
        match self {
            StockRequest::Single { product_id, .. } | StockRequest::Grouped { product_id, .. } => {
                *product_id
            }
        }
    }
}

/// Which product kinds the storefront offers the check for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KindPolicy {
    allowed: Vec<ProductKind>,
}

impl Default for KindPolicy {
    fn default() -> Self {
        Self {
            allowed: ProductKind::ALL.to_vec(),
        }
    }
}

impl KindPolicy {
    pub fn new(allowed: impl IntoIterator<Item = ProductKind>) -> Self {
        let mut kinds = Vec::new();
        for kind in allowed {
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }
        Self { allowed: kinds }
    }

    /// Parse a comma-separated list such as `simple,grouped`.
    pub fn parse_list(list: &str) -> Result<Self, DomainError> {
        let kinds = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::parse::<ProductKind>)
            .collect::<Result<Vec<_>, _>>()?;
        if kinds.is_empty() {
            return Err(DomainError::validation("at least one product type must be allowed"));
        }
        Ok(Self::new(kinds))
    }

    pub fn allows(&self, kind: ProductKind) -> bool {
        self.allowed.contains(&kind)
    }

    pub fn allowed(&self) -> &[ProductKind] {
        &self.allowed
    }
}

/// Coerce an untyped quantity. `None` for non-integers.
fn parse_qty(value: &JsonValue) -> Option<i64> {
    match value {
        JsonValue::Number(n) => n.as_i64(),
        JsonValue::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Validate and coerce raw input. Performs no IO.
///
/// Rejections:
/// - unknown or disallowed `type` → `InvalidRequest`
/// - missing, zero, or non-numeric `product_id` → `InvalidParams`
/// - no usable quantity and no child list → `MissingQuantity`
/// - negative quantity on a non-grouped request → `EnterValidNumber`
pub fn normalize(raw: &RawStockRequest, policy: &KindPolicy) -> Result<StockRequest, ReasonCode> {
    let kind = match raw.kind.as_deref().map(str::trim) {
        None | Some("") => ProductKind::Simple,
        Some(s) => s.parse().map_err(|_| ReasonCode::InvalidRequest)?,
    };
    if !policy.allows(kind) {
        return Err(ReasonCode::InvalidRequest);
    }

    let product_id = raw
        .product_id
        .as_ref()
        .and_then(ProductId::parse_raw)
        .ok_or(ReasonCode::InvalidParams)?;

    // Blank or junk quantities, as an empty form field posts them, count as absent.
    let requested_qty = raw.requested_qty.as_ref().and_then(parse_qty);

    let raw_children = raw.products.as_deref().unwrap_or_default();
    if requested_qty.unwrap_or(0) == 0 && raw_children.is_empty() {
        return Err(ReasonCode::MissingQuantity);
    }

    if kind.is_grouped() {
        let children = raw_children
            .iter()
            .filter_map(|child| {
                // Lines without a usable id cannot be looked up; the page never
                // sends them for real products, so they are dropped.
                let product_id = child.product_id.as_ref().and_then(ProductId::parse_raw)?;
                let requested_qty = child.requested_qty.as_ref().and_then(parse_qty).unwrap_or(0);
                Some(ChildRequest::new(product_id, requested_qty))
            })
            .collect();
        return Ok(StockRequest::grouped(product_id, children));
    }

    let requested_qty = requested_qty.unwrap_or(0);
    if requested_qty < 0 {
        return Err(ReasonCode::EnterValidNumber);
    }

    Ok(StockRequest::Single {
        kind,
        product_id,
        requested_qty,
    })
}
