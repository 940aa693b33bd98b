/// Largest integer value exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_U64_INT: u64 = 9_007_199_254_740_991;
/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Example
/// ```
/// use exprule::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42), Some(42.0));
/// assert_eq!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1), None);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn i64_to_f64_checked(value: i64) -> Option<f64> {
    if value.unsigned_abs() > MAX_SAFE_U64_INT {
        return None;
    }
    Some(value as f64)
}

/// Safely converts a `u64` to `f64` if and only if it is exactly representable.
///
/// ## Example
/// ```
/// use exprule::util::num::{MAX_SAFE_U64_INT, u64_to_f64_checked};
///
/// assert_eq!(u64_to_f64_checked(1234), Some(1234.0));
/// assert_eq!(u64_to_f64_checked(MAX_SAFE_U64_INT + 1), None);
/// ```
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub const fn u64_to_f64_checked(value: u64) -> Option<f64> {
    if value > MAX_SAFE_U64_INT {
        return None;
    }
    Some(value as f64)
}

/// Converts an `f64` to `i64` if the value is finite, within the exactly
/// representable range, and not fractional.
///
/// ## Example
/// ```
/// use exprule::util::num::f64_to_i64_checked;
///
/// assert_eq!(f64_to_i64_checked(-1000.0), Some(-1000));
/// assert_eq!(f64_to_i64_checked(1.5), None);
/// assert_eq!(f64_to_i64_checked(1e20), None);
/// assert_eq!(f64_to_i64_checked(f64::INFINITY), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn f64_to_i64_checked(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_I64_INT as f64 {
        return None;
    }
    Some(value as i64)
}

/// Converts an `f64` to `u64` if the value is finite, non-negative, within
/// the exactly representable range, and not fractional.
///
/// ## Example
/// ```
/// use exprule::util::num::f64_to_u64_checked;
///
/// assert_eq!(f64_to_u64_checked(7.0), Some(7));
/// assert_eq!(f64_to_u64_checked(-5.0), None);
/// assert_eq!(f64_to_u64_checked(1.23), None);
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_sign_loss)]
#[must_use]
pub fn f64_to_u64_checked(value: f64) -> Option<u64> {
    f64_to_i64_checked(value).and_then(|n| u64::try_from(n).ok())
}

/// Maps a truth value to `1` or `0`.
#[must_use]
pub const fn bool_to_f64(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}
