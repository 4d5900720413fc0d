//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** - two value
/// objects with the same attribute values are the same value. To "modify"
/// one, create a new one. `Email` and `Phone` are the canonical instances
/// here: parsing produces a normalized value that never changes afterwards.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
