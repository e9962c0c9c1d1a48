//! Value object trait: equality by value, not identity.
//!
//! Inventory facts, requests, and outcomes are value objects: they are built
//! per request, compared by their attributes, and thrown away after the
//! response is sent.

/// Marker trait for value objects.
///
/// Implementing it is a declaration, not a check: the compiler only enforces
/// the supertraits below. Immutability and value equality are conventions the
/// implementing type keeps.
///
/// The trait requires:
/// - **Clone**: value objects are cheap to copy
/// - **PartialEq**: compared by their attribute values
/// - **Debug**: helpful for logging and tests
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
