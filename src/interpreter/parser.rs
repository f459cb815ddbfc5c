/// Infix to postfix conversion.
///
/// Implements the Shunting-Yard algorithm over the token stream of one
/// expression, producing the operator sequence the evaluator reduces.
pub mod core;

/// Line classification.
///
/// Recognizes which statement form a line of a listing has under the active
/// block style, extracting names, parameter lists and expression texts.
pub mod statement;
