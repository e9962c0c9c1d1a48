//! HTTP transport for the stock availability check, plus the requesting-side client.

pub mod app;
pub mod client;
pub mod config;
