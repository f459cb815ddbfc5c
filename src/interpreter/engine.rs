/// The interpreter state and the statement dispatch loop.
pub mod core;

/// Locating the closer that matches a block opener.
pub mod block;

/// Function calls and returns.
pub mod call;

/// Run options.
pub mod config;

/// Function registrations.
pub mod functions;

/// Console, input and shell access.
///
/// Everything a running script does outside the interpreter goes through the
/// [`host::Host`] trait, so scripts can be run against real process streams
/// or against in-memory buffers.
pub mod host;

/// `${name}` substitution inside string literals.
pub mod interpolate;

/// The numbered source lines of a script.
pub mod listing;

/// Scoped variable storage.
pub mod symbols;
