use crate::{ast::Operator, error::ErrorKind};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur while evaluating one expression.
pub enum EvalError {
    /// A string literal was opened but never closed.
    UnterminatedString,
    /// A `${` interpolation sequence inside a string literal was never closed.
    UnterminatedInterpolation,
    /// Found a character that does not start any token.
    InvalidCharacter {
        /// The offending character.
        ch: char,
    },
    /// A numeric literal could not be represented.
    InvalidNumber {
        /// The literal text, including any folded sign.
        literal: String,
    },
    /// Found a bare identifier while no bindings were available.
    UnknownIdentifier {
        /// The identifier.
        name: String,
    },
    /// An identifier did not name a live variable.
    UnknownVariable {
        /// The identifier.
        name: String,
    },
    /// A `(` without its `)` or the other way around.
    MismatchedParentheses,
    /// An operator had fewer operands on the stack than it needs.
    MissingOperand {
        /// The operator being applied.
        op: Operator,
    },
    /// Evaluation did not leave exactly one value behind.
    InvalidExpression,
    /// An operator was applied to operands of the wrong kind.
    TypeMismatch {
        /// Details about the mismatch.
        details: String,
    },
    /// Attempted division by zero.
    DivisionByZero,
    /// Attempted modulo by zero.
    ModuloByZero,
    /// An integer literal or integer arithmetic left the 64-bit range.
    Overflow,
    /// An operator reached evaluation with the wrong number of operands.
    UnsupportedOperator {
        /// The operator.
        op: Operator,
    },
}

impl EvalError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::UnterminatedString
            | Self::UnterminatedInterpolation
            | Self::InvalidCharacter { .. }
            | Self::InvalidNumber { .. }
            | Self::UnknownIdentifier { .. }
            | Self::MismatchedParentheses
            | Self::MissingOperand { .. }
            | Self::InvalidExpression => ErrorKind::Syntax,
            Self::TypeMismatch { .. } => ErrorKind::Type,
            Self::DivisionByZero
            | Self::ModuloByZero
            | Self::Overflow
            | Self::UnsupportedOperator { .. } => ErrorKind::Runtime,
            Self::UnknownVariable { .. } => ErrorKind::Name,
        }
    }

    /// Shorthand for a [`EvalError::TypeMismatch`].
    pub fn type_mismatch(details: impl Into<String>) -> Self {
        Self::TypeMismatch { details: details.into() }
    }

    /// Returns the message without the kind label.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::UnterminatedString => "Unterminated string".to_string(),
            Self::UnterminatedInterpolation => {
                "Unterminated string interpolation sequence".to_string()
            },
            Self::InvalidCharacter { ch } => format!("Invalid character '{ch}'"),
            Self::InvalidNumber { literal } => format!("Invalid number literal '{literal}'"),
            Self::UnknownIdentifier { name } => format!("Unknown identifier '{name}'"),
            Self::UnknownVariable { name } => format!("Variable '{name}' used before declaration"),
            Self::MismatchedParentheses => "Mismatched parentheses".to_string(),
            Self::MissingOperand { op } => format!("Insufficient operands for '{op}'"),
            Self::InvalidExpression => "Invalid expression".to_string(),
            Self::TypeMismatch { details } => details.clone(),
            Self::DivisionByZero => "Division by zero".to_string(),
            Self::ModuloByZero => "Modulo by zero".to_string(),
            Self::Overflow => "Integer overflow".to_string(),
            Self::UnsupportedOperator { op } => format!("Internal error: unknown operator '{op}'"),
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl std::error::Error for EvalError {}
