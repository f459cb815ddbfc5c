/// Core evaluation logic.
///
/// Contains the evaluation entry points, the name-resolution seam used for
/// identifiers, and the postfix reduction loop.
pub mod core;

/// Binary operator evaluation logic.
///
/// Handles the execution of all binary operators: arithmetic with its
/// string-to-number coercion, equality and ordering comparisons, and the
/// boolean connectives.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements logical NOT, the only prefix operator that survives lexing.
pub mod unary;
