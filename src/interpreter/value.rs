/// Runtime value representation.
///
/// Defines the `Value` enum produced by the resolver, together with the
/// conversions and the whole-number canonicalization applied to every
/// computed number.
pub mod core;
