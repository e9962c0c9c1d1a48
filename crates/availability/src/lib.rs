//! Stock availability check (pure decision logic).
//!
//! Given a shopper's request for a simple, variable, or grouped product and a
//! read-only inventory lookup, decide whether the requested quantities can be
//! satisfied right now. The answer is advisory: nothing here reserves or
//! mutates stock.
//!
//! - `request`: raw input coercion into a typed `StockRequest`
//! - `evaluate`: the decision procedure producing an `Outcome`
//! - `messages`: the closed message vocabulary (`ReasonCode`, `StockMessage`)
//! - `render`: `Outcome` to user-facing reply

pub mod evaluate;
pub mod messages;
pub mod outcome;
pub mod render;
pub mod request;

pub use evaluate::evaluate;
pub use messages::{ReasonCode, StockMessage};
pub use outcome::{ChildShortfall, Outcome, ShortfallReason};
pub use render::{render, RenderOptions, StockCheckReply};
pub use request::{normalize, ChildRequest, KindPolicy, RawChild, RawStockRequest, StockRequest};
