//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own: two instances carrying the same
/// attributes are the same value. A location policy resolved from the location
/// catalogue is one; a warehouse (keyed by its business unit code) is not.
///
/// The trait requires `Clone + PartialEq + Debug` so values can be copied out of
/// resolvers, compared in tests, and logged.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
