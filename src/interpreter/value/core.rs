use crate::util::num::f64_to_i64_exact;

/// Represents a runtime value in the interpreter.
///
/// Values are immutable once constructed. Equality between values is only
/// defined through the comparison operators; the derived `PartialEq` is
/// structural and exists for tests and bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A 64-bit floating-point number.
    Float(f64),
    /// A boolean value (`true` or `false`).
    Bool(bool),
    /// Owned text without surrounding quotes.
    Str(String),
    /// A failed evaluation, carrying a human-readable message.
    Error(String),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl Value {
    /// Parses text that is entirely a numeric literal.
    ///
    /// Accepts an optional leading sign followed by digits with at most one
    /// decimal point and at least one digit. The decimal point alone decides
    /// the kind: without one the result is `Int`, otherwise `Float`.
    ///
    /// # Returns
    /// `None` if the text is not a numeric literal or an integer literal does
    /// not fit in 64 bits.
    ///
    /// # Example
    /// ```
    /// use snx::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from_numeric_literal("-12"), Some(Value::Int(-12)));
    /// assert_eq!(Value::from_numeric_literal("3."), Some(Value::Float(3.0)));
    /// assert_eq!(Value::from_numeric_literal("1.2.3"), None);
    /// assert_eq!(Value::from_numeric_literal("12abc"), None);
    /// ```
    #[must_use]
    pub fn from_numeric_literal(text: &str) -> Option<Self> {
        let body = text.strip_prefix(['+', '-']).unwrap_or(text);

        let digits = body.chars().filter(char::is_ascii_digit).count();
        let points = body.chars().filter(|&c| c == '.').count();

        if digits == 0 || points > 1 || digits + points != body.len() {
            return None;
        }

        if points == 0 {
            text.parse().ok().map(Self::Int)
        } else {
            text.parse().ok().map(Self::Float)
        }
    }

    /// Applies the implicit string-to-number coercion.
    ///
    /// A `Str` whose whole content is a numeric literal becomes that number;
    /// every other value is returned unchanged. This is the only implicit
    /// conversion from text to a number.
    ///
    /// # Example
    /// ```
    /// use snx::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from("3").coerce_numeric(), Value::Int(3));
    /// assert_eq!(Value::from("2.5").coerce_numeric(), Value::Float(2.5));
    /// assert_eq!(Value::from("foo").coerce_numeric(), Value::from("foo"));
    /// ```
    #[must_use]
    pub fn coerce_numeric(&self) -> Self {
        match self {
            Self::Str(s) => Self::from_numeric_literal(s).unwrap_or_else(|| self.clone()),
            _ => self.clone(),
        }
    }

    /// Returns the value as `f64` if it is an `Int` or a `Float`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::Float(r) => Some(*r),
            _ => None,
        }
    }

    /// Returns the boolean if the value is a `Bool`.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Negates a numeric value.
    ///
    /// Used when a sign is written directly in front of an identifier. Text is
    /// coerced first, so `-x` works when `x` holds `"4"`.
    ///
    /// # Returns
    /// `None` if the value is not numeric or the negation overflows.
    #[must_use]
    pub fn negated(&self) -> Option<Self> {
        match self.coerce_numeric() {
            Self::Int(n) => n.checked_neg().map(Self::Int),
            Self::Float(r) => Some(Self::Float(-r)),
            _ => None,
        }
    }

    /// Builds the numeric result of an arithmetic operator.
    ///
    /// A result is an `Int` unless `float` is set or the computed value has a
    /// fractional part. Whole results too large for an `Int` stay `Float`.
    #[must_use]
    pub fn numeric(result: f64, float: bool) -> Self {
        if float {
            return Self::Float(result);
        }
        f64_to_i64_exact(result).map_or(Self::Float(result), Self::Int)
    }

    /// Returns the lowercase name of the variant.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Str(_) => "string",
            Self::Error(_) => "error",
        }
    }

    /// Returns `true` if the value is an `Int` or a `Float`.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Returns `true` if the value is a `Float`.
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Self::Float(_))
    }

    /// Returns `true` if the value is a `Str`.
    #[must_use]
    pub const fn is_str(&self) -> bool {
        matches!(self, Self::Str(_))
    }

    /// Returns `true` if the value is an `Error`.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }
}

/// Writes the textual form of a value.
///
/// Strings are written without quotes. Floats always carry a fractional part
/// so that their kind survives being printed and read back.
impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(r) if r.is_finite() && r.fract() == 0.0 => write!(f, "{r:.1}"),
            Self::Float(r) => write!(f, "{r}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) | Self::Error(s) => f.write_str(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_literal_kind_follows_decimal_point() {
        assert_eq!(Value::from_numeric_literal("42"), Some(Value::Int(42)));
        assert_eq!(Value::from_numeric_literal("+7"), Some(Value::Int(7)));
        assert_eq!(Value::from_numeric_literal(".5"), Some(Value::Float(0.5)));
        assert_eq!(Value::from_numeric_literal("10.0"), Some(Value::Float(10.0)));
    }

    #[test]
    fn numeric_literal_rejects_non_numbers() {
        assert_eq!(Value::from_numeric_literal(""), None);
        assert_eq!(Value::from_numeric_literal("-"), None);
        assert_eq!(Value::from_numeric_literal("."), None);
        assert_eq!(Value::from_numeric_literal(" 1"), None);
        assert_eq!(Value::from_numeric_literal("1e5"), None);
        assert_eq!(Value::from_numeric_literal("99999999999999999999"), None);
    }

    #[test]
    fn display_is_unquoted_and_keeps_float_kind() {
        assert_eq!(Value::Int(-3).to_string(), "-3");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from("hi there").to_string(), "hi there");
    }

    #[test]
    fn numeric_result_promotes_fractions() {
        assert_eq!(Value::numeric(4.0, false), Value::Int(4));
        assert_eq!(Value::numeric(4.0, true), Value::Float(4.0));
        assert_eq!(Value::numeric(2.5, false), Value::Float(2.5));
    }

    #[test]
    fn negation_coerces_text() {
        assert_eq!(Value::from("4").negated(), Some(Value::Int(-4)));
        assert_eq!(Value::Float(1.5).negated(), Some(Value::Float(-1.5)));
        assert_eq!(Value::Bool(true).negated(), None);
        assert_eq!(Value::Int(i64::MIN).negated(), None);
    }
}
