use crate::{
    ast::Operator,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates the equality and ordering operators.
    ///
    /// Equality is defined between two strings, two booleans, or two numbers
    /// of either kind. Ordering is defined between numbers only. Numbers are
    /// compared as floating values, so `1 == 1.0` holds. No string-to-number
    /// coercion takes place here.
    ///
    /// # Parameters
    /// - `op`: One of `== != < > <= >=`.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// A `Bool` value.
    ///
    /// # Example
    /// ```
    /// use snx::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_comparison(Operator::Equal, &Value::Int(2), &Value::Float(2.0));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_comparison(op: Operator, left: &Value, right: &Value) -> EvalResult<Value> {
        use Operator::{Equal, Greater, GreaterEqual, Less, LessEqual, NotEqual};

        match op {
            Equal => Self::values_equal(left, right).map(Value::Bool),
            NotEqual => Self::values_equal(left, right).map(|eq| Value::Bool(!eq)),
            Less | Greater | LessEqual | GreaterEqual => {
                let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
                    return Err(EvalError::type_mismatch(format!("Operator '{op}' requires \
                                                                 numerical operands, found {} \
                                                                 and {}",
                                                                left.type_name(),
                                                                right.type_name())));
                };
                Ok(Value::Bool(match op {
                                   Less => a < b,
                                   Greater => a > b,
                                   LessEqual => a <= b,
                                   _ => a >= b,
                               }))
            },
            _ => Err(EvalError::UnsupportedOperator { op }),
        }
    }

    #[allow(clippy::float_cmp)]
    fn values_equal(left: &Value, right: &Value) -> EvalResult<bool> {
        match (left, right) {
            (Value::Str(a), Value::Str(b)) => Ok(a == b),
            (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
            (Value::Int(a), Value::Int(b)) => Ok(a == b),
            _ => match (left.as_float(), right.as_float()) {
                (Some(a), Some(b)) => Ok(a == b),
                _ => Err(EvalError::type_mismatch(format!("Cannot compare {} with {}",
                                                          left.type_name(),
                                                          right.type_name()))),
            },
        }
    }
}
