//! `stockcheck-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod error;
pub mod id;
pub mod kind;
pub mod value_object;

pub use error::{DomainError, DomainResult};
pub use id::ProductId;
pub use kind::ProductKind;
pub use value_object::ValueObject;
