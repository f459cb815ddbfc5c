use crate::{
    ast::Operator,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates a binary operation between two values.
    ///
    /// Routes the operation to a specialized handler depending on the
    /// operator. Arithmetic goes through `eval_add` or `eval_arithmetic`,
    /// `%` through `eval_modulo`, equality and ordering through
    /// `eval_comparison`, and the connectives through `eval_logic`.
    ///
    /// An `Error` operand is never combined with anything; it is reported as a
    /// type error naming the operator.
    ///
    /// # Parameters
    /// - `op`: The operator.
    /// - `left`: Left operand.
    /// - `right`: Right operand.
    ///
    /// # Returns
    /// An `EvalResult<Value>` containing the evaluated result.
    ///
    /// # Example
    /// ```
    /// use snx::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_binary(Operator::Add, &Value::Int(3), &Value::from("4"));
    /// assert_eq!(result.unwrap(), Value::Int(7));
    /// ```
    pub fn eval_binary(op: Operator, left: &Value, right: &Value) -> EvalResult<Value> {
        use Operator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul, Not, NotEqual,
            Or, Sub,
        };

        if left.is_error() || right.is_error() {
            return Err(EvalError::type_mismatch(format!("Operator '{op}' cannot be applied \
                                                         to an error value")));
        }

        match op {
            Add => Self::eval_add(left, right),
            Sub | Mul | Div => Self::eval_arithmetic(op, left, right),
            Mod => Self::eval_modulo(left, right),
            Equal | NotEqual | Less | Greater | LessEqual | GreaterEqual => {
                Self::eval_comparison(op, left, right)
            },
            And | Or => Self::eval_logic(op, left, right),
            Not => Err(EvalError::UnsupportedOperator { op }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_operands_are_rejected() {
        let error = Value::Error("Runtime Error: Division by zero".to_string());

        let result = Evaluator::eval_binary(Operator::Add, &error, &Value::Int(1));
        assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));

        let result = Evaluator::eval_binary(Operator::Equal, &Value::Int(1), &error);
        assert!(matches!(result, Err(EvalError::TypeMismatch { .. })));
    }

    #[test]
    fn not_is_not_binary() {
        let result = Evaluator::eval_binary(Operator::Not, &Value::Bool(true), &Value::Bool(true));
        assert_eq!(result, Err(EvalError::UnsupportedOperator { op: Operator::Not }));
    }
}
