use serde::{Deserialize, Serialize};

use stockcheck_availability::StockCheckReply;
use stockcheck_inventory::InventoryFact;

// -------------------------
// Response DTOs
// -------------------------

/// Wire shape of a stock-check answer: `{"success": .., "data": {"message": .., "code": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCheckResponse {
    pub success: bool,
    pub data: StockCheckData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockCheckData {
    pub message: String,
    pub code: String,
}

impl From<StockCheckReply> for StockCheckResponse {
    fn from(reply: StockCheckReply) -> Self {
        Self {
            success: reply.success,
            data: StockCheckData {
                message: reply.message,
                code: reply.code.to_string(),
            },
        }
    }
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn fact_to_json(fact: InventoryFact) -> serde_json::Value {
    serde_json::json!({
        "product_id": fact.product_id.get(),
        "name": fact.display_name,
        "exists": fact.exists,
        "in_stock": fact.in_stock,
        "tracks_stock": fact.tracks_stock,
        "available_qty": fact.available_qty,
    })
}
