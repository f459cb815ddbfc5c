/// Operator dispatch.
pub mod core;

/// `+ - * / %` and the numeric result-kind rules.
pub mod arithmetic;

/// `== != < > <= >=`.
pub mod comparison;

/// `&& ||`.
pub mod logic;
