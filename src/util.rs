/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss, plus the
/// whole-number canonicalization every computed number goes through.
pub mod num;
