use crate::{
    ast::Operator,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a unary operation on a value.
    ///
    /// `!` is the only unary operator left after lexing; signs are folded into
    /// literals or marked on identifiers before evaluation starts.
    ///
    /// # Parameters
    /// - `op`: The unary operator.
    /// - `operand`: The operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the result.
    ///
    /// # Example
    /// ```
    /// use snx::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_unary(Operator::Not, &Value::Bool(false));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_unary(op: Operator, operand: &Value) -> EvalResult<Value> {
        match (op, operand) {
            (Operator::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (Operator::Not, other) => {
                Err(EvalError::type_mismatch(format!("Operator '!' requires a boolean operand, \
                                                      found {}",
                                                     other.type_name())))
            },
            _ => Err(EvalError::UnsupportedOperator { op }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_requires_a_boolean() {
        assert_eq!(Evaluator::eval_unary(Operator::Not, &Value::Bool(true)),
                   Ok(Value::Bool(false)));
        assert!(matches!(Evaluator::eval_unary(Operator::Not, &Value::Int(0)),
                         Err(EvalError::TypeMismatch { .. })));
        assert_eq!(Evaluator::eval_unary(Operator::Add, &Value::Int(0)),
                   Err(EvalError::UnsupportedOperator { op: Operator::Add }));
    }
}
