/// Runtime value representation.
///
/// Defines the `Value` enum produced by the evaluator and stored in the symbol
/// table, along with the textual form used for printing and concatenation and
/// the string-to-number coercion rule used by the arithmetic operators.
pub mod core;
