//! # snx
//!
//! snx is a small line-oriented scripting language and its interpreter.
//! Scripts declare and assign dynamically typed variables, print values, run
//! shell commands, branch with `if`, jump with `GOTO` and call functions
//! declared with `func`. Blocks are closed either by `end` or by braces,
//! switchable in the middle of a script with `STYLE`.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::{
    error::ScriptError,
    interpreter::{
        engine::{
            config::Config,
            core::{Interpreter, Termination},
            host::Host,
        },
        evaluator::core::{Evaluator, NoBindings},
        value::core::Value,
    },
};

/// Defines the syntactic forms of the language.
///
/// This module declares the operator set with its precedence table, the two
/// block styles, and the statement forms a script line can take.
///
/// # Responsibilities
/// - Defines `Operator`, `BlockStyle` and `Statement`.
/// - Keeps the precedence and arity of every operator in one place.
pub mod ast;
/// Provides unified error types for evaluation and execution.
///
/// This module defines all errors that can be raised while evaluating an
/// expression or executing a statement, together with the category each one
/// is reported under.
///
/// # Responsibilities
/// - Defines `EvalError` for expression faults and `ScriptError` for statement
///   faults.
/// - Attaches line numbers and messages for user feedback.
/// - Marks the faults that stop a run.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, postfix conversion, evaluation, values
/// and the control-flow engine.
///
/// # Responsibilities
/// - Coordinates all core components.
/// - Provides entry points for evaluating expressions and running scripts.
pub mod interpreter;
/// General utilities for safe numeric conversion.
pub mod util;

/// Evaluates a single expression with no variables in scope.
///
/// Failures never propagate: they come back as a `Value::Error` whose message
/// starts with the error kind.
///
/// # Examples
/// ```
/// use snx::{evaluate, interpreter::value::core::Value};
///
/// assert_eq!(evaluate("2 + 3 * 4"), Value::Int(14));
/// assert_eq!(evaluate("10 / 4"), Value::Float(2.5));
/// assert_eq!(evaluate("\"foo\" + 1"), Value::from("foo1"));
///
/// let Value::Error(message) = evaluate("7 % 0") else { panic!() };
/// assert_eq!(message, "Runtime Error: Modulo by zero");
/// ```
#[must_use]
pub fn evaluate(text: &str) -> Value {
    Evaluator::new(&mut NoBindings).evaluate(text)
}

/// Runs a whole script against `host`.
///
/// Non-fatal faults are reported through the host as they happen and the run
/// continues.
///
/// # Errors
/// Returns the fatal fault that stopped the run.
///
/// # Examples
/// ```
/// use snx::{
///     interpreter::engine::{config::Config, host::CapturedHost},
///     run_source,
/// };
///
/// let source = "func greet(who)\n  println \"hi ${who}\"\nend\ngreet(\"bob\")";
/// let mut host = CapturedHost::new();
///
/// assert!(run_source(source, Config::default(), &mut host).is_ok());
/// assert_eq!(host.output, "hi bob\n");
///
/// assert!(run_source("GOTO 9", Config::default(), &mut host).is_err());
/// ```
pub fn run_source(source: &str,
                  config: Config,
                  host: &mut dyn Host)
                  -> Result<Termination, ScriptError> {
    Interpreter::new(source, config).run(host)
}
