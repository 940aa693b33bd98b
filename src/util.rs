/// Numeric conversion helpers.
///
/// This module provides safe functions for converting between integer and
/// floating-point types without risking silent data loss or rounding errors.
/// Use these helpers whenever you need to convert between `i64`, `u64` and
/// `f64` in a way that guarantees correctness.
///
/// All conversions return an `Option`, which is `Some` if the conversion is
/// lossless and valid, or `None` if the value is out of range or not an
/// integer.
pub mod num;
