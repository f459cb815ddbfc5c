use std::collections::HashMap;

use tracing::{debug, trace, warn};

use crate::{
    ast::{BlockStyle, Statement},
    error::{EvalError, ScriptError},
    interpreter::{
        engine::{
            config::Config,
            functions::{Function, FunctionTable},
            host::Host,
            interpolate::interpolate,
            listing::Listing,
            symbols::SymbolTable,
        },
        evaluator::core::{EvalResult, Evaluator, Resolve},
        parser::statement::{is_reserved, parse_statement},
        value::core::Value,
    },
};

/// How a run finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The program counter moved past the last line.
    EndOfListing,
    /// An `END` line was executed.
    EndCommand,
}

/// What the run loop does after a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Halt,
}

/// An active function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Frame {
    /// The line after the call.
    pub return_to:    usize,
    /// The scope depth to restore on return.
    pub caller_depth: usize,
    /// The scope depth the function body runs at. A closer seen at this depth
    /// closes the body itself.
    pub body_depth:   usize,
}

/// The statement interpreter.
///
/// ## Usage
///
/// An `Interpreter` owns one script and all state of a run over it: the
/// program counter, the scope depth, the active calls, the variables and
/// the functions. Statements are classified one line at a time, as the
/// program counter reaches them, using the block style active at that
/// moment.
///
/// ```
/// use snx::interpreter::engine::{
///     config::Config,
///     core::{Interpreter, Termination},
///     host::CapturedHost,
/// };
///
/// let mut engine = Interpreter::new("var x = 6\nprintln x * 7\nEND\nprintln 0", Config::default());
/// let mut host = CapturedHost::new();
///
/// assert_eq!(engine.run(&mut host), Ok(Termination::EndCommand));
/// assert_eq!(host.output, "42\n");
/// ```
#[derive(Debug, Clone)]
pub struct Interpreter {
    pub(crate) listing:     Listing,
    pub(crate) pc:          usize,
    pub(crate) scope_depth: usize,
    pub(crate) frames:      Vec<Frame>,
    pub(crate) symbols:     SymbolTable,
    pub(crate) functions:   FunctionTable,
    pub(crate) style:       BlockStyle,
    pub(crate) block_ends:  HashMap<(usize, BlockStyle), Option<usize>>,
    config:                 Config,
}

/// Name lookup for expressions evaluated by the interpreter.
///
/// Declared variables resolve to their values; the bare word `input` reads
/// one line from the host.
struct Bindings<'a> {
    symbols: &'a SymbolTable,
    host:    &'a mut dyn Host,
}

impl Resolve for Bindings<'_> {
    fn resolve(&mut self, name: &str) -> EvalResult<Value> {
        if name == "input" {
            let Some(line) = self.host.read_line() else {
                warn!("input exhausted, reading an empty line");
                return Ok(Value::Str(String::new()));
            };
            return Ok(Value::Str(line));
        }

        self.symbols
            .get(name)
            .cloned()
            .ok_or_else(|| EvalError::UnknownVariable { name: name.to_string() })
    }
}

impl Interpreter {
    /// Prepares a run over `source`.
    #[must_use]
    pub fn new(source: &str, config: Config) -> Self {
        Self { listing: Listing::new(source),
               pc: 1,
               scope_depth: 0,
               frames: Vec::new(),
               symbols: SymbolTable::new(),
               functions: FunctionTable::new(),
               style: config.style,
               block_ends: HashMap::new(),
               config }
    }

    /// Runs the script until `END` or the end of the listing.
    ///
    /// Non-fatal faults are handed to `host.report` and execution resumes on
    /// the line after the faulting one.
    ///
    /// # Errors
    /// Returns the fault that stopped the run: a jump to a line that does not
    /// exist, a `return` with no active call, or a failed output write.
    pub fn run(&mut self, host: &mut dyn Host) -> Result<Termination, ScriptError> {
        while self.pc <= self.listing.len() {
            match self.step(host) {
                Ok(Flow::Continue) => {},
                Ok(Flow::Halt) => return Ok(Termination::EndCommand),
                Err(error) if error.is_fatal() => {
                    debug!(line = error.line(), %error, "fatal");
                    return Err(error);
                },
                Err(error) => {
                    host.report(&error);
                    self.pc = self.pc.max(error.line() + 1);
                },
            }
        }

        Ok(Termination::EndOfListing)
    }

    /// Executes the statement at the program counter.
    ///
    /// On success the program counter has been moved to the next statement to
    /// run. On failure it is left on the faulting line, unless the fault
    /// already decided where execution continues.
    pub(crate) fn step(&mut self, host: &mut dyn Host) -> Result<Flow, ScriptError> {
        let line = self.pc;
        let statement = parse_statement(self.listing.get(line).unwrap_or_default(), self.style);
        trace!(line, ?statement, "dispatch");

        match statement {
            Statement::Style(Some(style)) => {
                debug!(line, style = style.name(), "block style");
                self.style = style;
                self.advance()
            },
            Statement::Style(None) => {
                warn!(line, "unknown block style ignored");
                self.advance()
            },
            Statement::Comment | Statement::Blank | Statement::Unrecognized => self.advance(),
            Statement::Terminate => {
                if self.config.announce_end {
                    self.write(Config::END_BANNER, line, host)?;
                }
                debug!(line, "END");
                Ok(Flow::Halt)
            },
            Statement::BlockClose => self.close_block(line),
            Statement::Return => self.return_from_call(line),
            Statement::ReturnValue { expr } => {
                warn!(line, %expr, "return values are not supported; statement ignored");
                self.advance()
            },
            Statement::FunctionDeclaration { name, parameters } => {
                self.declare_function(name, parameters, line, host)
            },
            Statement::Call { name, arguments } => self.call(&name, &arguments, line, host),
            Statement::Goto { target } => self.goto(&target, line),
            Statement::If { condition } => self.branch(&condition, line, host),
            Statement::Declaration { name, expr } => self.declare(&name, &expr, line, host),
            Statement::Assignment { name, expr } => self.assign(&name, &expr, line, host),
            Statement::Print { expr, newline } => {
                let value = self.evaluate(&expr, line, host)?;
                let mut text = value.to_string();
                if newline {
                    text.push('\n');
                }
                self.write(&text, line, host)?;
                self.advance()
            },
            Statement::Exec { expr } => {
                let command = self.evaluate(&expr, line, host)?.to_string();
                match host.execute(&command) {
                    Ok(status) => debug!(line, %command, status, "exec"),
                    Err(error) => {
                        return Err(ScriptError::ShellFailed { command,
                                                              details: error.to_string(),
                                                              line });
                    },
                }
                self.advance()
            },
        }
    }

    /// Evaluates expression text against the live variables.
    pub(crate) fn evaluate(&self,
                           text: &str,
                           line: usize,
                           host: &mut dyn Host)
                           -> Result<Value, ScriptError> {
        let mut bindings = Bindings { symbols: &self.symbols,
                                      host };

        interpolate(text, &mut bindings)
            .and_then(|text| Evaluator::new(&mut bindings).try_evaluate(&text))
            .map_err(|error| ScriptError::Expression { error, line })
    }

    /// Moves the program counter to `target`.
    ///
    /// Any line of the listing and the end of the listing are valid targets.
    pub(crate) fn jump(&mut self, target: usize, line: usize) -> Result<(), ScriptError> {
        if target == 0 || target > self.listing.end() {
            return Err(ScriptError::InvalidJump { target, line });
        }
        trace!(from = line, to = target, "jump");
        self.pc = target;
        Ok(())
    }

    /// Opens one scope level.
    pub(crate) fn enter_scope(&mut self) {
        self.scope_depth += 1;
        trace!(scope = self.scope_depth, "enter scope");
    }

    /// Tears down the innermost scope level and every binding made in it.
    pub(crate) fn leave_scope(&mut self) {
        let removed = self.symbols.remove_scope(self.scope_depth);
        trace!(scope = self.scope_depth, removed, "leave scope");
        self.scope_depth = self.scope_depth.saturating_sub(1);
    }

    fn advance(&mut self) -> Result<Flow, ScriptError> {
        self.pc += 1;
        Ok(Flow::Continue)
    }

    fn write(&self, text: &str, line: usize, host: &mut dyn Host) -> Result<(), ScriptError> {
        host.write_output(text)
            .map_err(|error| ScriptError::OutputFailed { details: error.to_string(),
                                                         line })
    }

    fn close_block(&mut self, line: usize) -> Result<Flow, ScriptError> {
        if let Some(frame) = self.frames.last()
           && frame.body_depth == self.scope_depth
        {
            return self.return_from_call(line);
        }

        if self.scope_depth == 0 {
            return Err(ScriptError::UnexpectedCloser { closer: self.style.closer(),
                                                       line });
        }

        self.leave_scope();
        self.advance()
    }

    fn declare_function(&mut self,
                        name: String,
                        parameters: Vec<String>,
                        line: usize,
                        host: &mut dyn Host)
                        -> Result<Flow, ScriptError> {
        if self.scope_depth != 0 {
            host.report(&ScriptError::NestedFunctionDeclaration { name, line });
        } else if is_reserved(&name) {
            host.report(&ScriptError::ReservedName { name, line });
        } else {
            debug!(line, function = %name, ?parameters, "register");
            let function = Function { name: name.clone(),
                                      parameters,
                                      entry: line };
            if !self.functions.register(function) {
                host.report(&ScriptError::FunctionAlreadyDefined { name, line });
            }
        }

        self.skip_block(line)
    }

    /// Continues after the closer of the block opened on `line`.
    fn skip_block(&mut self, line: usize) -> Result<Flow, ScriptError> {
        match self.find_block_end(line) {
            Some(end) => {
                self.jump(end + 1, line)?;
                Ok(Flow::Continue)
            },
            None => {
                self.pc = self.listing.end();
                Err(ScriptError::UnmatchedBlock { line })
            },
        }
    }

    fn goto(&mut self, target: &str, line: usize) -> Result<Flow, ScriptError> {
        let target = target.parse().unwrap_or(usize::MAX);
        if target > self.listing.len() {
            return Err(ScriptError::InvalidJump { target, line });
        }
        self.jump(target, line)?;
        Ok(Flow::Continue)
    }

    fn branch(&mut self,
              condition: &str,
              line: usize,
              host: &mut dyn Host)
              -> Result<Flow, ScriptError> {
        match self.evaluate(condition, line, host)? {
            Value::Bool(true) => {
                self.enter_scope();
                self.advance()
            },
            Value::Bool(false) => self.skip_block(line),
            other => Err(ScriptError::ConditionNotBoolean { found: other.type_name().to_string(),
                                                            line }),
        }
    }

    fn declare(&mut self,
               name: &str,
               expr: &str,
               line: usize,
               host: &mut dyn Host)
               -> Result<Flow, ScriptError> {
        if is_reserved(name) {
            return Err(ScriptError::ReservedName { name: name.to_string(),
                                                   line });
        }
        if self.symbols.contains(name) {
            return Err(ScriptError::Redeclaration { name: name.to_string(),
                                                    line });
        }

        let value = self.evaluate(expr, line, host)?;
        trace!(line, name, %value, scope = self.scope_depth, "declare");
        self.symbols.declare(name, value, self.scope_depth);
        self.advance()
    }

    fn assign(&mut self,
              name: &str,
              expr: &str,
              line: usize,
              host: &mut dyn Host)
              -> Result<Flow, ScriptError> {
        if !self.symbols.contains(name) {
            return Err(ScriptError::UndeclaredVariable { name: name.to_string(),
                                                         line });
        }

        let value = self.evaluate(expr, line, host)?;
        trace!(line, name, %value, "assign");
        self.symbols.assign(name, value);
        self.advance()
    }

    /// Returns the line the next step will execute.
    #[must_use]
    pub const fn program_counter(&self) -> usize {
        self.pc
    }

    /// Returns the current scope depth.
    #[must_use]
    pub const fn scope_depth(&self) -> usize {
        self.scope_depth
    }

    /// Returns the number of active function calls.
    #[must_use]
    pub fn call_depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns the block style in effect.
    #[must_use]
    pub const fn style(&self) -> BlockStyle {
        self.style
    }

    /// Returns the value of a live variable.
    #[must_use]
    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.symbols.get(name)
    }

    /// Returns the variable storage.
    #[must_use]
    pub const fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Returns a registered function.
    #[must_use]
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::engine::host::CapturedHost;

    fn run_with(source: &str, config: Config) -> (Interpreter, CapturedHost, Termination) {
        let mut engine = Interpreter::new(source, config);
        let mut host = CapturedHost::new();
        let termination = engine.run(&mut host).unwrap();
        (engine, host, termination)
    }

    fn run(source: &str) -> (Interpreter, CapturedHost, Termination) {
        run_with(source, Config::default())
    }

    #[test]
    fn declaration_rejects_live_names() {
        let (engine, host, _) = run("var x = 1\nvar x = 2");

        assert_eq!(engine.variable("x"), Some(&Value::Int(1)));
        assert_eq!(host.error_messages(),
                   vec!["Compilation Error on line 2: Cannot redeclare variable 'x'. A variable \
                         with that name already exists."]);
    }

    #[test]
    fn failed_declaration_creates_no_binding() {
        let (engine, host, _) = run("var x = 1 / 0\nx = 3");

        assert_eq!(engine.variable("x"), None);
        assert_eq!(host.errors.len(), 2);
        assert!(matches!(host.errors[1], ScriptError::UndeclaredVariable { line: 2, .. }));
    }

    #[test]
    fn reserved_words_cannot_be_declared() {
        let (engine, host, _) = run("var print = 1\nvar exec = 2");

        assert!(engine.symbols().is_empty());
        assert!(matches!(host.errors.as_slice(),
                         [ScriptError::ReservedName { line: 1, .. },
                          ScriptError::ReservedName { line: 2, .. }]));
    }

    #[test]
    fn false_condition_skips_without_scope_change() {
        let (engine, host, _) = run("if 1 > 2\n  println \"no\"\nend\nprintln \"yes\"");

        assert_eq!(host.output, "yes\n");
        assert_eq!(engine.scope_depth(), 0);
        assert!(host.errors.is_empty());
    }

    #[test]
    fn block_variables_die_with_their_block() {
        let source = "var a = 1\nif true\n  var b = a + 1\n  a = b\nend\nprintln a\nvar b = 0";
        let (engine, host, _) = run(source);

        assert_eq!(host.output, "2\n");
        assert_eq!(engine.variable("b"), Some(&Value::Int(0)));
        assert!(host.errors.is_empty());
    }

    #[test]
    fn non_boolean_condition_is_a_type_error() {
        let (engine, host, _) = run("if 1\n  println \"in\"\nend");

        assert!(matches!(host.errors[0], ScriptError::ConditionNotBoolean { line: 1, .. }));
        assert_eq!(host.output, "in\n");
        assert_eq!(engine.scope_depth(), 0);
    }

    #[test]
    fn stray_closer_is_a_syntax_error() {
        let (_, host, termination) = run("end\nprintln 1");

        assert_eq!(termination, Termination::EndOfListing);
        assert_eq!(host.output, "1\n");
        assert_eq!(host.error_messages(),
                   vec!["Syntax Error on line 1: Unexpected 'end' with no open block."]);
    }

    #[test]
    fn end_stops_and_optionally_announces() {
        let source = "println 1\nEND\nprintln 2";

        let (_, host, termination) = run(source);
        assert_eq!(termination, Termination::EndCommand);
        assert_eq!(host.output, "1\n");

        let config = Config { announce_end: true,
                              ..Config::default() };
        let (_, host, _) = run_with(source, config);
        assert_eq!(host.output, format!("1\n{}", Config::END_BANNER));
    }

    #[test]
    fn goto_validates_its_target() {
        let mut engine = Interpreter::new("println 1\nGOTO 3", Config::default());
        let mut host = CapturedHost::new();

        assert_eq!(engine.run(&mut host),
                   Err(ScriptError::InvalidJump { target: 3, line: 2 }));
        assert_eq!(host.output, "1\n");
    }

    #[test]
    fn goto_loops() {
        let source = "var i = 0\ni = i + 1\nif i < 3\n  GOTO 2\nend\nprintln i";
        let (_, host, _) = run(source);

        assert_eq!(host.output, "3\n");
    }

    #[test]
    fn unmatched_block_ends_the_run() {
        let (_, host, termination) = run("if false\nprintln 1");

        assert_eq!(termination, Termination::EndOfListing);
        assert!(host.output.is_empty());
        assert!(matches!(host.errors.as_slice(), [ScriptError::UnmatchedBlock { line: 1 }]));
    }

    #[test]
    fn style_switches_take_effect_immediately() {
        let source = "STYLE = brackets\nif true {\n  println \"a\"\n}\nSTYLE = \"end\"\nif \
                      false\n  println \"b\"\nend";
        let (engine, host, _) = run(source);

        assert_eq!(host.output, "a\n");
        assert_eq!(engine.style(), BlockStyle::Terminated);
        assert!(host.errors.is_empty());
    }

    #[test]
    fn input_and_exec_go_through_the_host() {
        let mut engine = Interpreter::new("var name = input\nexec \"echo \" + name",
                                          Config::default());
        let mut host = CapturedHost::with_input(["ada"]);

        engine.run(&mut host).unwrap();
        assert_eq!(host.commands, vec!["echo ada"]);
    }

    #[test]
    fn return_outside_a_call_is_fatal() {
        let mut engine = Interpreter::new("return\nprintln 1", Config::default());
        let mut host = CapturedHost::new();

        assert_eq!(engine.run(&mut host),
                   Err(ScriptError::ReturnOutsideFunction { line: 1 }));
        assert!(host.output.is_empty());
    }

    #[test]
    fn unknown_function_leaves_state_alone() {
        let (engine, host, _) = run("missing(1)\nprintln 2");

        assert_eq!(host.output, "2\n");
        assert_eq!(engine.call_depth(), 0);
        assert!(matches!(host.errors.as_slice(), [ScriptError::UnknownFunction { line: 1, .. }]));
    }

    #[test]
    fn functions_are_global_and_unique() {
        let source = "func f()\nend\nfunc f()\nend\nif true\n  func g()\n  end\nend";
        let (engine, host, _) = run(source);

        assert_eq!(engine.function("f").map(|f| f.entry), Some(1));
        assert!(engine.function("g").is_none());
        assert!(matches!(host.errors.as_slice(),
                         [ScriptError::FunctionAlreadyDefined { line: 3, .. },
                          ScriptError::NestedFunctionDeclaration { line: 6, .. }]));
    }
}
