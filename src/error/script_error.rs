use crate::error::{ErrorKind, EvalError};

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors the control-flow engine can report while running a
/// listing.
pub enum ScriptError {
    /// An embedded expression failed to evaluate.
    Expression {
        /// The underlying expression error.
        error: EvalError,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// Tried to declare a variable whose name is currently live.
    Redeclaration {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to declare a variable with a reserved word as its name.
    ReservedName {
        /// The reserved word.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Assigned to a variable that was never declared.
    UndeclaredVariable {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Called a function that was never registered.
    UnknownFunction {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Attempted to register a function that already exists.
    FunctionAlreadyDefined {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A function declaration appeared inside a block or call.
    NestedFunctionDeclaration {
        /// The name of the function.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A parameter name collides with a live variable.
    ParameterConflict {
        /// The name of the parameter.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call supplied no argument for a parameter, which was bound to `0`.
    MissingArgument {
        /// The parameter name.
        parameter: String,
        /// The line of the call.
        line:      usize,
    },
    /// An argument failed to evaluate and its parameter was bound to `0`.
    ArgumentFailed {
        /// The parameter name.
        parameter: String,
        /// Why the argument failed.
        error:     EvalError,
        /// The line of the call.
        line:      usize,
    },
    /// A block closer appeared with no open block.
    UnexpectedCloser {
        /// The closer text (`}` or `end`).
        closer: &'static str,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// A block opener has no matching closer before the end of the listing.
    UnmatchedBlock {
        /// The line of the opening header.
        line: usize,
    },
    /// A `if` condition produced something other than a boolean.
    ConditionNotBoolean {
        /// The textual form of the value that was produced.
        found: String,
        /// The source line where the error occurred.
        line:  usize,
    },
    /// `return` or a function-body closer with no active call.
    ReturnOutsideFunction {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A jump to a line that is not part of the listing.
    InvalidJump {
        /// The requested line.
        target: usize,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// The shell collaborator could not run a command.
    ShellFailed {
        /// The command text.
        command: String,
        /// Details about the failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// Writing to the output stream failed.
    OutputFailed {
        /// Details about the failure.
        details: String,
        /// The source line where the error occurred.
        line:    usize,
    },
}

impl ScriptError {
    /// Returns the category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Expression { error, .. } => error.kind(),
            Self::Redeclaration { .. }
            | Self::ReservedName { .. }
            | Self::FunctionAlreadyDefined { .. }
            | Self::NestedFunctionDeclaration { .. } => ErrorKind::Compilation,
            Self::UndeclaredVariable { .. } | Self::UnknownFunction { .. } => ErrorKind::Name,
            Self::UnexpectedCloser { .. } | Self::UnmatchedBlock { .. } => ErrorKind::Syntax,
            Self::ConditionNotBoolean { .. } => ErrorKind::Type,
            Self::ParameterConflict { .. }
            | Self::MissingArgument { .. }
            | Self::ArgumentFailed { .. }
            | Self::ReturnOutsideFunction { .. }
            | Self::InvalidJump { .. }
            | Self::ShellFailed { .. }
            | Self::OutputFailed { .. } => ErrorKind::Runtime,
        }
    }

    /// Returns the source line the error was raised on.
    #[must_use]
    pub const fn line(&self) -> usize {
        match self {
            Self::Expression { line, .. }
            | Self::Redeclaration { line, .. }
            | Self::ReservedName { line, .. }
            | Self::UndeclaredVariable { line, .. }
            | Self::UnknownFunction { line, .. }
            | Self::FunctionAlreadyDefined { line, .. }
            | Self::NestedFunctionDeclaration { line, .. }
            | Self::ParameterConflict { line, .. }
            | Self::MissingArgument { line, .. }
            | Self::ArgumentFailed { line, .. }
            | Self::UnexpectedCloser { line, .. }
            | Self::UnmatchedBlock { line }
            | Self::ConditionNotBoolean { line, .. }
            | Self::ReturnOutsideFunction { line }
            | Self::InvalidJump { line, .. }
            | Self::ShellFailed { line, .. }
            | Self::OutputFailed { line, .. } => *line,
        }
    }

    /// Returns `true` if the error stops the run instead of being reported
    /// and skipped.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self,
                 Self::ReturnOutsideFunction { .. }
                 | Self::InvalidJump { .. }
                 | Self::OutputFailed { .. })
    }
}

impl std::fmt::Display for ScriptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} on line {}: ", self.kind(), self.line())?;

        match self {
            Self::Expression { error, .. } => write!(f, "{}.", error.message()),
            Self::Redeclaration { name, .. } => write!(f,
                                                       "Cannot redeclare variable '{name}'. A variable with that name already exists."),
            Self::ReservedName { name, .. } => {
                write!(f, "'{name}' is reserved and cannot be used as a variable name.")
            },
            Self::UndeclaredVariable { name, .. } => {
                write!(f, "Variable '{name}' used before declaration.")
            },
            Self::UnknownFunction { name, .. } => write!(f, "Function '{name}' is not defined."),
            Self::FunctionAlreadyDefined { name, .. } => {
                write!(f, "Function '{name}' is already defined.")
            },
            Self::NestedFunctionDeclaration { name, .. } => write!(f,
                                                                   "Function '{name}' must be declared in the global scope."),
            Self::ParameterConflict { name, .. } => write!(f,
                                                           "Function parameter '{name}' conflicts with an existing variable."),
            Self::MissingArgument { parameter, .. } => {
                write!(f, "No argument for parameter '{parameter}'. Defaulting to 0.")
            },
            Self::ArgumentFailed { parameter, error, .. } => write!(f,
                                                                   "Failed to evaluate argument for parameter '{parameter}' ({}). Defaulting to 0.",
                                                                   error.message()),
            Self::UnexpectedCloser { closer, .. } => {
                write!(f, "Unexpected '{closer}' with no open block.")
            },
            Self::UnmatchedBlock { .. } => write!(f, "Unmatched opening block."),
            Self::ConditionNotBoolean { found, .. } => {
                write!(f, "Condition must be a boolean, found '{found}'.")
            },
            Self::ReturnOutsideFunction { .. } => {
                write!(f, "'return' called outside of a function.")
            },
            Self::InvalidJump { target, .. } => write!(f, "Jump to invalid line {target}."),
            Self::ShellFailed { command, details, .. } => {
                write!(f, "Failed to execute '{command}': {details}.")
            },
            Self::OutputFailed { details, .. } => write!(f, "Failed to write output: {details}."),
        }
    }
}

impl std::error::Error for ScriptError {}
