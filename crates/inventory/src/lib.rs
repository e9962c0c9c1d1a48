//! Inventory lookup boundary.
//!
//! The storefront catalog owns product records and stock counts. This crate
//! only describes what the availability check needs to know about a product
//! (`InventoryFact`) and the read-only capability used to fetch it
//! (`InventoryLookup`). `InMemoryCatalog` is the adapter used in tests and
//! local development.

pub mod catalog;
pub mod fact;
pub mod lookup;

pub use catalog::{CatalogError, InMemoryCatalog};
pub use fact::InventoryFact;
pub use lookup::{InventoryLookup, LookupError};
