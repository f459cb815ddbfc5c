/// Lower bound of the `i64` range as an `f64` (`-2^63`, exact).
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
/// Upper bound of the `i64` range as an `f64` (`2^63`, exclusive).
const I64_END_F64: f64 = 9_223_372_036_854_775_808.0;

/// Converts an `f64` to `i64` if the value is finite, whole and in range.
///
/// ## Returns
/// - `Some(i64)`: The converted value.
/// - `None`: If the value is non-finite, fractional or out of range.
///
/// ## Example
/// ```
/// use snx::util::num::f64_to_i64_exact;
///
/// assert_eq!(f64_to_i64_exact(1000.0), Some(1000));
/// assert_eq!(f64_to_i64_exact(-2.0), Some(-2));
/// assert_eq!(f64_to_i64_exact(1.5), None);
/// assert_eq!(f64_to_i64_exact(1e20), None);
/// assert_eq!(f64_to_i64_exact(f64::NAN), None);
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn f64_to_i64_exact(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 {
        return None;
    }
    if !(I64_MIN_F64..I64_END_F64).contains(&value) {
        return None;
    }
    Some(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_edges() {
        assert_eq!(f64_to_i64_exact(I64_MIN_F64), Some(i64::MIN));
        assert_eq!(f64_to_i64_exact(I64_END_F64), None);
        assert_eq!(f64_to_i64_exact(f64::INFINITY), None);
        assert_eq!(f64_to_i64_exact(-0.0), Some(0));
    }
}
