use std::collections::HashMap;

use crate::{
    error::EvalError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::core::to_postfix,
        value::core::Value,
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `EvalError` describing the failure.
pub type EvalResult<T> = Result<T, EvalError>;

/// Resolves identifiers to values while an expression is evaluated.
///
/// The control-flow engine implements this over its symbol table; callers
/// with no variables use [`NoBindings`].
pub trait Resolve {
    /// Returns the current value bound to `name`.
    ///
    /// # Errors
    /// Returns an error if `name` cannot be resolved.
    fn resolve(&mut self, name: &str) -> EvalResult<Value>;
}

/// A resolver with no names at all.
///
/// Every identifier is rejected as a syntax error, so plain expressions may
/// only contain literals and operators.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoBindings;

impl Resolve for NoBindings {
    fn resolve(&mut self, name: &str) -> EvalResult<Value> {
        Err(EvalError::UnknownIdentifier { name: name.to_string() })
    }
}

impl Resolve for HashMap<String, Value> {
    fn resolve(&mut self, name: &str) -> EvalResult<Value> {
        self.get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownVariable { name: name.to_string() })
    }
}

/// Evaluates expressions against a resolver.
///
/// ## Usage
///
/// An `Evaluator` borrows a resolver for as long as it is used. Each call to
/// [`Evaluator::evaluate`] tokenizes the text, converts it to postfix order
/// and reduces it; nothing is cached between calls, so evaluating the same
/// text twice against the same bindings gives the same result.
pub struct Evaluator<'r> {
    resolver: &'r mut dyn Resolve,
}

impl<'r> Evaluator<'r> {
    /// Creates an evaluator that resolves identifiers through `resolver`.
    pub fn new(resolver: &'r mut dyn Resolve) -> Self {
        Self { resolver }
    }

    /// Evaluates one expression.
    ///
    /// Never fails: any fault is folded into [`Value::Error`], whose message
    /// starts with the error kind label.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use snx::interpreter::{evaluator::core::Evaluator, value::core::Value};
    ///
    /// let mut bindings = HashMap::from([("x".to_string(), Value::Int(4))]);
    /// let mut evaluator = Evaluator::new(&mut bindings);
    ///
    /// assert_eq!(evaluator.evaluate("x * -x"), Value::Int(-16));
    /// assert!(evaluator.evaluate("y").is_error());
    /// ```
    pub fn evaluate(&mut self, text: &str) -> Value {
        self.try_evaluate(text)
            .unwrap_or_else(|error| Value::Error(error.to_string()))
    }

    /// Evaluates one expression, keeping the error structured.
    ///
    /// # Errors
    /// Any lexical, syntactic, type, runtime or name error raised while
    /// evaluating `text`.
    pub fn try_evaluate(&mut self, text: &str) -> EvalResult<Value> {
        let postfix = to_postfix(tokenize(text)?)?;
        self.eval_postfix(postfix)
    }

    /// Reduces a postfix token sequence to a single value.
    ///
    /// Operands are pushed as they are met; identifiers are resolved at that
    /// moment, so resolution happens in source order. Each operator pops its
    /// operands, the right-hand one first, and pushes its result.
    ///
    /// # Errors
    /// - `MissingOperand` if an operator finds too few values on the stack.
    /// - `InvalidExpression` if anything other than exactly one value remains.
    /// - Any error raised by an operator or by the resolver.
    pub fn eval_postfix(&mut self, postfix: Vec<Token>) -> EvalResult<Value> {
        let mut stack: Vec<Value> = Vec::with_capacity(postfix.len());

        for token in postfix {
            match token {
                Token::Int(n) => stack.push(Value::Int(n)),
                Token::Float(r) => stack.push(Value::Float(r)),
                Token::Bool(b) => stack.push(Value::Bool(b)),
                Token::Str(s) => stack.push(Value::Str(s)),
                Token::Identifier { name, negated } => {
                    let value = self.resolver.resolve(&name)?;
                    stack.push(if negated { Self::negate(&value)? } else { value });
                },
                Token::Operator(op) if op.arity() == 1 => {
                    let operand = stack.pop().ok_or(EvalError::MissingOperand { op })?;
                    stack.push(Self::eval_unary(op, &operand)?);
                },
                Token::Operator(op) => {
                    if stack.len() < 2 {
                        return Err(EvalError::MissingOperand { op });
                    }
                    let right = stack.pop().ok_or(EvalError::MissingOperand { op })?;
                    let left = stack.pop().ok_or(EvalError::MissingOperand { op })?;
                    stack.push(Self::eval_binary(op, &left, &right)?);
                },
                Token::LParen | Token::RParen => return Err(EvalError::MismatchedParentheses),
            }
        }

        match (stack.pop(), stack.is_empty()) {
            (Some(value), true) => Ok(value),
            _ => Err(EvalError::InvalidExpression),
        }
    }

    /// Applies a sign written directly in front of an identifier.
    fn negate(value: &Value) -> EvalResult<Value> {
        if let Some(negated) = value.negated() {
            return Ok(negated);
        }

        if value.coerce_numeric().is_numeric() {
            Err(EvalError::Overflow)
        } else {
            Err(EvalError::type_mismatch(format!("Cannot negate a {} value",
                                                 value.type_name())))
        }
    }
}
