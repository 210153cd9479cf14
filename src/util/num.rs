/// Largest integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

/// Converts a list index written as a number into a `usize` position.
///
/// The index must be integral, non-negative, exactly representable and
/// smaller than `len`.
///
/// ## Parameters
/// - `value`: The index as evaluated.
/// - `len`: Length of the list being indexed.
///
/// ## Returns
/// - `Some(usize)`: The position if it is in bounds.
/// - `None`: If the index is fractional, negative, not finite or too large.
///
/// ## Example
/// ```
/// use quill::util::num::f64_to_index_checked;
///
/// assert_eq!(f64_to_index_checked(2.0, 3), Some(2));
/// assert_eq!(f64_to_index_checked(3.0, 3), None);
/// assert_eq!(f64_to_index_checked(1.5, 3), None);
/// assert_eq!(f64_to_index_checked(-1.0, 3), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn f64_to_index_checked(value: f64, len: usize) -> Option<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > MAX_SAFE_INT {
        return None;
    }

    let index = value as usize;
    (index < len).then_some(index)
}

/// Returns `true` when `value` has no fractional part and fits exactly in
/// an `f64` integer.
///
/// Used when printing numbers: integral values are shown without a decimal
/// point.
#[must_use]
pub fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_finite_indices() {
        assert_eq!(f64_to_index_checked(f64::NAN, 10), None);
        assert_eq!(f64_to_index_checked(f64::INFINITY, 10), None);
    }

    #[test]
    fn accepts_negative_zero() {
        assert_eq!(f64_to_index_checked(-0.0, 1), Some(0));
    }

    #[test]
    fn integral_values() {
        assert!(is_integral(7.0));
        assert!(!is_integral(2.5));
        assert!(!is_integral(1e300));
    }
}
