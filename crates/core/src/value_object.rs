//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value** — two instances
/// with the same attribute values are the same value. "Modifying" one means
/// constructing a new instance. `Money` and `Specifications` are the value
/// objects of this domain; entities (`Spu`, `Sku`, ...) carry identity
/// instead and implement [`crate::Entity`].
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
