use crate::{
    ast::Operator,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates `&&` and `||`.
    ///
    /// Both operands are already evaluated when this is called, so there is
    /// no short-circuiting: `false && 1` is still a type error.
    ///
    /// # Example
    /// ```
    /// use snx::{
    ///     ast::Operator,
    ///     interpreter::{evaluator::core::Evaluator, value::core::Value},
    /// };
    ///
    /// let result = Evaluator::eval_logic(Operator::Or, &Value::Bool(false), &Value::Bool(true));
    /// assert_eq!(result.unwrap(), Value::Bool(true));
    /// ```
    pub fn eval_logic(op: Operator, left: &Value, right: &Value) -> EvalResult<Value> {
        let (Some(a), Some(b)) = (left.as_bool(), right.as_bool()) else {
            return Err(EvalError::type_mismatch(format!("Operator '{op}' requires boolean \
                                                         operands, found {} and {}",
                                                        left.type_name(),
                                                        right.type_name())));
        };

        match op {
            Operator::And => Ok(Value::Bool(a && b)),
            Operator::Or => Ok(Value::Bool(a || b)),
            _ => Err(EvalError::UnsupportedOperator { op }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connectives_need_booleans() {
        let t = Value::Bool(true);
        let f = Value::Bool(false);

        assert_eq!(Evaluator::eval_logic(Operator::And, &t, &f), Ok(f.clone()));
        assert_eq!(Evaluator::eval_logic(Operator::Or, &f, &t), Ok(t.clone()));
        assert!(matches!(Evaluator::eval_logic(Operator::And, &f, &Value::Int(1)),
                         Err(EvalError::TypeMismatch { .. })));
    }
}
