//! Outcome formatter: turns an `Outcome` into the reply shown to the shopper.

use serde::Serialize;

use crate::messages::{ReasonCode, StockMessage};
use crate::outcome::Outcome;

/// Separator used between grouped shortfall lines unless configured otherwise.
pub const DEFAULT_LINE_BREAK: &str = "<br>";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Joins the per-child lines of a grouped shortfall.
    pub line_break: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            line_break: DEFAULT_LINE_BREAK.to_string(),
        }
    }
}

/// Reply payload: `success` is true only for `Outcome::Available`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockCheckReply {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
}

impl StockCheckReply {
    /// Reply for a request that never reached the evaluator.
    pub fn rejected(reason: &ReasonCode) -> Self {
        Self {
            success: false,
            message: reason.to_string(),
            code: reason.code(),
        }
    }
}

pub fn render(outcome: &Outcome, options: &RenderOptions) -> StockCheckReply {
    let message = match outcome {
        Outcome::Available => StockMessage::StockAvailable.to_string(),
        Outcome::LimitedStock { available_qty } => {
            StockMessage::LimitedStockAvailable(*available_qty).to_string()
        }
        Outcome::OutOfStock => StockMessage::OutOfStock.to_string(),
        Outcome::ProductNotFound { .. } => ReasonCode::ProductNotFound.to_string(),
        Outcome::Invalid(reason) => reason.to_string(),
        Outcome::GroupShortfall(lines) => lines
            .iter()
            .map(|l| l.message.as_str())
            .collect::<Vec<_>>()
            .join(&options.line_break),
    };

    StockCheckReply {
        success: outcome.is_available(),
        message,
        code: outcome.label(),
    }
}
