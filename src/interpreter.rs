/// The control-flow engine that runs scripts line by line.
///
/// The engine owns the numbered listing, the program counter, the scope depth,
/// the active calls, the variables and the functions of one run. It
/// classifies each line as the program counter reaches it and executes it.
///
/// # Responsibilities
/// - Dispatches statements and moves the program counter.
/// - Matches blocks, enters and tears down scopes.
/// - Performs calls and returns against a stack of call frames.
/// - Talks to the outside world only through the `Host` trait.
pub mod engine;
/// The evaluator module computes the value of one expression.
///
/// The evaluator reduces a postfix token sequence with a value stack,
/// applying the operator semantics of the language: coercion of numeric
/// text, integer/float result rules, comparisons and boolean connectives.
///
/// # Responsibilities
/// - Resolves identifiers through a `Resolve` implementation at evaluation
///   time.
/// - Applies operators and reports type and runtime errors.
/// - Folds failures into `Value::Error` at the public boundary.
pub mod evaluator;
/// The lexer module tokenizes expression text.
///
/// The lexer reads one expression and produces literals, identifiers,
/// operators and parentheses. It folds a directly attached sign into the
/// following number when that sign cannot be a binary operator.
///
/// # Responsibilities
/// - Converts expression text into tokens.
/// - Handles numeric, boolean and string literals and all operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module orders expression tokens and classifies script lines.
///
/// # Responsibilities
/// - Converts infix tokens to postfix order (shunting-yard).
/// - Recognizes the statement forms of a line under the active block style.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum and its variants.
/// - Implements the implicit text-to-number coercion.
/// - Renders values as program output.
pub mod value;
