//! Requesting-side client for the stock-check endpoint.
//!
//! Mirrors what the product page does before and around the call: it
//! validates the shopper's selection locally, and keeps at most one check in
//! flight per product. Issuing a new check for a product aborts the pending
//! one; only the latest answer matters and the server-side evaluation is a
//! pure read, so dropping it mid-flight is harmless.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use thiserror::Error;
use tokio::task::AbortHandle;

use stockcheck_availability::ReasonCode;
use stockcheck_core::{ProductId, ProductKind};

use crate::app::dto::StockCheckResponse;

/// What the shopper selected on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckInput {
    Simple {
        product_id: u64,
        quantity: Option<i64>,
    },
    /// `variation_id` is `None` (or 0) until the shopper picks an option.
    Variable {
        variation_id: Option<u64>,
        quantity: Option<i64>,
    },
    /// `children` holds `(child_id, quantity)` pairs from the grouped form.
    Grouped {
        product_id: u64,
        children: Vec<(u64, Option<i64>)>,
    },
}

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; no request was sent.
    #[error("{0}")]
    Invalid(ReasonCode),

    /// A newer check for the same product replaced this one.
    #[error("superseded by a newer check for the same product")]
    Superseded,

    #[error("network error: {0}")]
    Network(String),

    #[error("API error ({0}): {1}")]
    Api(u16, String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl ClientError {
    /// Message to show the shopper. Transport problems all read as `unexpected_error`.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Invalid(reason) => reason.to_string(),
            _ => ReasonCode::UnexpectedError.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct WireChild {
    product_id: u64,
    requested_qty: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct WireRequest {
    product_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    requested_qty: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    products: Option<Vec<WireChild>>,
    #[serde(rename = "type")]
    kind: ProductKind,
}

/// Local validation, in the order the page applies it.
fn prepare(input: &CheckInput) -> Result<(ProductId, WireRequest), ReasonCode> {
    match input {
        CheckInput::Grouped {
            product_id,
            children,
        } => {
            let products: Vec<WireChild> = children
                .iter()
                .filter_map(|(id, qty)| match qty {
                    Some(q) if *id > 0 && *q > 0 => Some(WireChild {
                        product_id: *id,
                        requested_qty: *q,
                    }),
                    _ => None,
                })
                .collect();
            if products.is_empty() {
                return Err(ReasonCode::GroupProductNotValid);
            }
            let key = ProductId::new(*product_id).map_err(|_| ReasonCode::ProductIdInvalid)?;
            Ok((
                key,
                WireRequest {
                    product_id: *product_id,
                    requested_qty: None,
                    products: Some(products),
                    kind: ProductKind::Grouped,
                },
            ))
        }
        CheckInput::Variable {
            variation_id,
            quantity,
        } => {
            let variation_id = variation_id
                .filter(|id| *id > 0)
                .ok_or(ReasonCode::VariableNotFound)?;
            single(variation_id, *quantity, ProductKind::Variable)
        }
        CheckInput::Simple {
            product_id,
            quantity,
        } => single(*product_id, *quantity, ProductKind::Simple),
    }
}

fn single(product_id: u64, quantity: Option<i64>, kind: ProductKind) -> Result<(ProductId, WireRequest), ReasonCode> {
    let key = ProductId::new(product_id).map_err(|_| ReasonCode::ProductIdInvalid)?;
    let quantity = quantity
        .filter(|q| *q > 0)
        .ok_or(ReasonCode::EnterValidNumber)?;
    Ok((
        key,
        WireRequest {
            product_id,
            requested_qty: Some(quantity),
            products: None,
            kind,
        },
    ))
}

/// HTTP client that keeps at most one pending check per product.
#[derive(Debug, Clone)]
pub struct StockCheckClient {
    http: reqwest::Client,
    api_url: String,
    in_flight: Arc<Mutex<HashMap<ProductId, (u64, AbortHandle)>>>,
    next_ticket: Arc<AtomicU64>,
}

impl StockCheckClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), api_url)
    }

    pub fn with_http(http: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
            in_flight: Arc::new(Mutex::new(HashMap::new())),
            next_ticket: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Number of checks currently awaiting an answer.
    pub fn pending(&self) -> usize {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Validate the selection, then ask the API.
    ///
    /// Returns `ClientError::Superseded` if another check for the same product
    /// is issued before this one completes.
    pub async fn check(&self, input: &CheckInput) -> Result<StockCheckResponse, ClientError> {
        let (key, body) = prepare(input).map_err(ClientError::Invalid)?;
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);

        let http = self.http.clone();
        let url = format!("{}/stock-check", self.api_url);
        let task = tokio::spawn(async move { send(http, url, body).await });

        let pending = PendingCheck {
            in_flight: Arc::clone(&self.in_flight),
            key,
            ticket,
            task: task.abort_handle(),
        };
        {
            let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some((previous, handle)) = in_flight.insert(key, (ticket, task.abort_handle())) {
                tracing::debug!(product_id = key.get(), previous, ticket, "superseding pending stock check");
                handle.abort();
            }
        }

        let joined = task.await;
        drop(pending);

        match joined {
            Ok(result) => result,
            Err(e) if e.is_cancelled() => Err(ClientError::Superseded),
            Err(e) => Err(ClientError::Network(e.to_string())),
        }
    }
}

/// Releases a check's slot when its future finishes or is dropped. Dropping
/// the future early also aborts the request task.
struct PendingCheck {
    in_flight: Arc<Mutex<HashMap<ProductId, (u64, AbortHandle)>>>,
    key: ProductId,
    ticket: u64,
    task: AbortHandle,
}

impl Drop for PendingCheck {
    fn drop(&mut self) {
        self.task.abort();
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if in_flight.get(&self.key).is_some_and(|(t, _)| *t == self.ticket) {
            in_flight.remove(&self.key);
        }
    }
}

async fn send(http: reqwest::Client, url: String, body: WireRequest) -> Result<StockCheckResponse, ClientError> {
    let resp = http
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(|e| ClientError::Network(e.to_string()))?;

    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        return Err(ClientError::Api(status, resp.text().await.unwrap_or_default()));
    }

    resp.json().await.map_err(|e| ClientError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouped_needs_a_positive_child_quantity() {
        let input = CheckInput::Grouped {
            product_id: 10,
            children: vec![(1, Some(0)), (2, None), (0, Some(3))],
        };
        assert_eq!(prepare(&input).unwrap_err(), ReasonCode::GroupProductNotValid);
    }

    #[test]
    fn grouped_sends_only_positive_children() {
        let input = CheckInput::Grouped {
            product_id: 10,
            children: vec![(1, Some(0)), (2, Some(4)), (3, Some(1))],
        };
        let (key, wire) = prepare(&input).unwrap();
        assert_eq!(key.get(), 10);
        assert_eq!(
            wire.products.unwrap(),
            vec![
                WireChild {
                    product_id: 2,
                    requested_qty: 4
                },
                WireChild {
                    product_id: 3,
                    requested_qty: 1
                },
            ]
        );
    }

    #[test]
    fn variable_requires_a_selected_variation() {
        for variation_id in [None, Some(0)] {
            let input = CheckInput::Variable {
                variation_id,
                quantity: Some(1),
            };
            assert_eq!(prepare(&input).unwrap_err(), ReasonCode::VariableNotFound);
        }
    }

    #[test]
    fn variation_id_is_the_request_key() {
        let input = CheckInput::Variable {
            variation_id: Some(55),
            quantity: Some(2),
        };
        let (key, wire) = prepare(&input).unwrap();
        assert_eq!(key.get(), 55);
        assert_eq!(wire.kind, ProductKind::Variable);
        assert_eq!(wire.requested_qty, Some(2));
    }

    #[test]
    fn simple_requires_id_then_quantity() {
        let missing_id = CheckInput::Simple {
            product_id: 0,
            quantity: Some(1),
        };
        assert_eq!(prepare(&missing_id).unwrap_err(), ReasonCode::ProductIdInvalid);

        for quantity in [None, Some(0), Some(-1)] {
            let input = CheckInput::Simple {
                product_id: 3,
                quantity,
            };
            assert_eq!(prepare(&input).unwrap_err(), ReasonCode::EnterValidNumber);
        }
    }

    #[test]
    fn wire_body_matches_the_endpoint_fields() {
        let (_, wire) = prepare(&CheckInput::Simple {
            product_id: 3,
            quantity: Some(2),
        })
        .unwrap();
        assert_eq!(
            serde_json::to_value(&wire).unwrap(),
            serde_json::json!({"product_id": 3, "requested_qty": 2, "type": "simple"})
        );
    }

    #[test]
    fn transport_errors_read_as_unexpected() {
        assert_eq!(
            ClientError::Network("refused".into()).user_message(),
            "An unexpected error occurred. Please try again later."
        );
        assert_eq!(
            ClientError::Invalid(ReasonCode::VariableNotFound).user_message(),
            "Please select the variable option."
        );
    }
}
