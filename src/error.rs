/// Expression errors.
///
/// Defines every fault that can occur while lexing, converting or evaluating
/// a single expression: malformed tokens, mismatched parentheses, operands
/// of the wrong kind, division by zero and unresolved names.
pub mod eval_error;
/// Statement errors.
///
/// Contains the faults raised by the control-flow engine while executing a
/// listing: illegal redeclarations, unknown names, unmatched blocks, invalid
/// jumps and returns without an active call. Each one carries the line it was
/// raised on.
pub mod script_error;

pub use eval_error::EvalError;
pub use script_error::ScriptError;

/// The category a fault belongs to.
///
/// Every error in the crate reports one of these kinds. The kind decides the
/// label the fault is printed with (`Syntax Error`, `Type Error`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed token stream, unterminated string, mismatched delimiters.
    Syntax,
    /// Operator applied to incompatible operand kinds.
    Type,
    /// Division or modulo by zero, overflow, invalid control transfer.
    Runtime,
    /// Undeclared variable or function.
    Name,
    /// Illegal redeclaration.
    Compilation,
}

impl ErrorKind {
    /// Returns the label used when printing a fault of this kind.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Syntax => "Syntax Error",
            Self::Type => "Type Error",
            Self::Runtime => "Runtime Error",
            Self::Name => "Name Error",
            Self::Compilation => "Compilation Error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
