/// Numeric conversion helpers.
///
/// Conversions between `f64` and `i64` that refuse to lose information
/// instead of silently truncating or saturating.
pub mod num;
