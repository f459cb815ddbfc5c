use crate::{
    ast::Operator,
    error::EvalError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        value::core::Value,
    },
};

impl Evaluator<'_> {
    /// Evaluates `+`.
    ///
    /// Two strings concatenate. Otherwise both sides are coerced; two numbers
    /// add, and if one side is still text the textual forms of both sides are
    /// concatenated.
    ///
    /// # Example
    /// ```
    /// use snx::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let sum = Evaluator::eval_add(&Value::from("foo"), &Value::Int(1)).unwrap();
    /// assert_eq!(sum, Value::from("foo1"));
    ///
    /// let sum = Evaluator::eval_add(&Value::from("3"), &Value::Int(4)).unwrap();
    /// assert_eq!(sum, Value::Int(7));
    /// ```
    pub fn eval_add(left: &Value, right: &Value) -> EvalResult<Value> {
        if let (Value::Str(a), Value::Str(b)) = (left, right) {
            return Ok(Value::Str(format!("{a}{b}")));
        }

        let (l, r) = (left.coerce_numeric(), right.coerce_numeric());
        if l.is_numeric() && r.is_numeric() {
            return Self::eval_numeric(Operator::Add, &l, &r, left.is_float() || right.is_float());
        }

        match (&l, &r) {
            (Value::Str(_), Value::Int(_) | Value::Float(_) | Value::Bool(_) | Value::Str(_))
            | (Value::Int(_) | Value::Float(_) | Value::Bool(_), Value::Str(_)) => {
                Ok(Value::Str(format!("{l}{r}")))
            },
            _ => Err(Self::requires_numbers(Operator::Add, left, right)),
        }
    }

    /// Evaluates `-`, `*` and `/` after coercing both operands.
    ///
    /// # Errors
    /// - `TypeMismatch` if either side is not numeric after coercion.
    /// - `DivisionByZero` for a zero divisor.
    /// - `Overflow` if integer arithmetic leaves the 64-bit range.
    pub fn eval_arithmetic(op: Operator, left: &Value, right: &Value) -> EvalResult<Value> {
        let (l, r) = (left.coerce_numeric(), right.coerce_numeric());
        if !l.is_numeric() || !r.is_numeric() {
            return Err(Self::requires_numbers(op, left, right));
        }
        Self::eval_numeric(op, &l, &r, left.is_float() || right.is_float())
    }

    /// Evaluates `%`.
    ///
    /// Only integers are accepted, and no coercion takes place.
    pub fn eval_modulo(left: &Value, right: &Value) -> EvalResult<Value> {
        match (left, right) {
            (Value::Int(_), Value::Int(0)) => Err(EvalError::ModuloByZero),
            (Value::Int(a), Value::Int(b)) => a.checked_rem(*b)
                                               .map(Value::Int)
                                               .ok_or(EvalError::Overflow),
            _ => Err(EvalError::type_mismatch(format!("Operator '%' requires integer \
                                                       operands, found {} and {}",
                                                      left.type_name(),
                                                      right.type_name()))),
        }
    }

    /// Applies an arithmetic operator to two coerced numeric values.
    ///
    /// Integer operands stay integers through checked arithmetic; a division
    /// that does not come out even produces a `Float`. Otherwise the
    /// computation happens in floating point. The result is a `Float` when
    /// `float` is set, which callers derive from the operands as written
    /// before coercion, or when it has a fractional part. Numeric text such as
    /// `"1.5"` therefore does not force a `Float` result on its own.
    fn eval_numeric(op: Operator,
                    left: &Value,
                    right: &Value,
                    float: bool)
                    -> EvalResult<Value> {
        if let (Value::Int(a), Value::Int(b)) = (left, right) {
            return Self::eval_int(op, *a, *b);
        }

        let (Some(a), Some(b)) = (left.as_float(), right.as_float()) else {
            return Err(Self::requires_numbers(op, left, right));
        };

        let result = match op {
            Operator::Add => a + b,
            Operator::Sub => a - b,
            Operator::Mul => a * b,
            Operator::Div if b == 0.0 => return Err(EvalError::DivisionByZero),
            Operator::Div => a / b,
            _ => return Err(EvalError::UnsupportedOperator { op }),
        };

        Ok(Value::numeric(result, float))
    }

    #[allow(clippy::cast_precision_loss)]
    fn eval_int(op: Operator, a: i64, b: i64) -> EvalResult<Value> {
        let result = match op {
            Operator::Add => a.checked_add(b),
            Operator::Sub => a.checked_sub(b),
            Operator::Mul => a.checked_mul(b),
            Operator::Div if b == 0 => return Err(EvalError::DivisionByZero),
            Operator::Div => match a.checked_rem(b) {
                Some(0) => a.checked_div(b),
                Some(_) => return Ok(Value::Float(a as f64 / b as f64)),
                None => None,
            },
            _ => return Err(EvalError::UnsupportedOperator { op }),
        };

        result.map(Value::Int).ok_or(EvalError::Overflow)
    }

    fn requires_numbers(op: Operator, left: &Value, right: &Value) -> EvalError {
        EvalError::type_mismatch(format!("Operator '{op}' requires numerical operands, found {} \
                                          and {}",
                                         left.type_name(),
                                         right.type_name()))
    }
}
