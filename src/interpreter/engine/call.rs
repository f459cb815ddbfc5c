use tracing::{debug, warn};

use crate::{
    error::ScriptError,
    interpreter::{
        engine::{
            core::{Flow, Frame, Interpreter},
            host::Host,
        },
        value::core::Value,
    },
};

impl Interpreter {
    /// Enters the function `name`, called on `line` with `arguments`.
    ///
    /// Arguments are evaluated in the caller's environment first. The first
    /// call of a chain opens one scope level; calls made from inside a
    /// function share it. Parameters are then declared at the current depth.
    /// A missing, empty or failing argument is reported and binds `0`
    /// instead. A parameter whose name is already live is reported and left
    /// unbound.
    ///
    /// # Errors
    /// `UnknownFunction` if `name` is not registered. Nothing changes in that
    /// case.
    pub(crate) fn call(&mut self,
                       name: &str,
                       arguments: &[String],
                       line: usize,
                       host: &mut dyn Host)
                       -> Result<Flow, ScriptError> {
        let Some(function) = self.functions.get(name).cloned() else {
            return Err(ScriptError::UnknownFunction { name: name.to_string(),
                                                      line });
        };

        if arguments.len() > function.parameters.len() {
            warn!(line,
                  function = name,
                  extra = arguments.len() - function.parameters.len(),
                  "ignoring surplus arguments");
        }

        let mut values = Vec::with_capacity(function.parameters.len());
        for (index, parameter) in function.parameters.iter().enumerate() {
            let value = match arguments.get(index).map(|text| text.trim()) {
                Some(text) if !text.is_empty() => match self.evaluate(text, line, host) {
                    Ok(value) => value,
                    Err(ScriptError::Expression { error, .. }) => {
                        warn!(line, parameter = %parameter, %error,
                              "argument failed to evaluate, defaulting to 0");
                        host.report(&ScriptError::ArgumentFailed { parameter: parameter.clone(),
                                                                   error,
                                                                   line });
                        Value::Int(0)
                    },
                    Err(other) => return Err(other),
                },
                _ => {
                    warn!(line, parameter = %parameter, "missing argument, defaulting to 0");
                    host.report(&ScriptError::MissingArgument { parameter: parameter.clone(),
                                                                line });
                    Value::Int(0)
                },
            };
            values.push(value);
        }

        let caller_depth = self.scope_depth;
        if self.frames.is_empty() {
            self.scope_depth += 1;
        }

        for (parameter, value) in function.parameters.iter().zip(values) {
            if !self.symbols.declare(parameter, value, self.scope_depth) {
                host.report(&ScriptError::ParameterConflict { name: parameter.clone(),
                                                              line });
            }
        }

        self.frames.push(Frame { return_to: line + 1,
                                 caller_depth,
                                 body_depth: self.scope_depth });
        debug!(line,
               function = name,
               depth = self.frames.len(),
               scope = self.scope_depth,
               "call");

        self.jump(function.entry + 1, line)?;
        Ok(Flow::Continue)
    }

    /// Leaves the innermost active call from `line`.
    ///
    /// Every scope opened since the call, including the call's own scope when
    /// it was the first of its chain, is torn down before jumping back to the
    /// line after the call.
    ///
    /// # Errors
    /// `ReturnOutsideFunction` if no call is active.
    pub(crate) fn return_from_call(&mut self, line: usize) -> Result<Flow, ScriptError> {
        let Some(frame) = self.frames.pop() else {
            return Err(ScriptError::ReturnOutsideFunction { line });
        };

        while self.scope_depth > frame.caller_depth {
            self.leave_scope();
        }
        debug!(line,
               to = frame.return_to,
               depth = self.frames.len(),
               scope = self.scope_depth,
               "return");

        self.jump(frame.return_to, line)?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        error::{EvalError, ScriptError},
        interpreter::{
            engine::{config::Config, core::Interpreter, host::CapturedHost},
            value::core::Value,
        },
    };

    fn run(source: &str) -> (Interpreter, CapturedHost) {
        let mut engine = Interpreter::new(source, Config::default());
        let mut host = CapturedHost::new();
        engine.run(&mut host).unwrap();
        (engine, host)
    }

    #[test]
    fn call_scope_is_torn_down_on_return() {
        let source = "\
func f(a)
  var local = a * 2
  println local
end
f(21)
println \"done\"";
        let (engine, host) = run(source);

        assert_eq!(host.output, "42\ndone\n");
        assert_eq!(engine.scope_depth(), 0);
        assert_eq!(engine.call_depth(), 0);
        assert_eq!(engine.variable("a"), None);
        assert_eq!(engine.variable("local"), None);
    }

    #[test]
    fn missing_and_failing_arguments_default_to_zero() {
        let source = "\
func show(a, b, c)
  println a + b + c
end
show(1, 1 / 0)";
        let (_, host) = run(source);

        assert_eq!(host.output, "1\n");
        assert!(matches!(host.errors.as_slice(),
                         [ScriptError::ArgumentFailed { line: 4, error: EvalError::DivisionByZero, .. },
                          ScriptError::MissingArgument { line: 4, .. }]));
        assert_eq!(host.error_messages()[1],
                   "Runtime Error on line 4: No argument for parameter 'c'. Defaulting to 0.");
    }

    #[test]
    fn nested_calls_share_one_scope() {
        let source = "\
func inner(y)
  println y
  return
end
func outer(x)
  inner(x + 1)
  println x + y
end
outer(1)
var y = 0
println y";
        let (engine, host) = run(source);

        assert_eq!(host.output, "2\n3\n0\n");
        assert_eq!(engine.variable("y"), Some(&Value::Int(0)));
    }

    #[test]
    fn parameter_conflicts_are_reported() {
        let source = "\
var a = 5
func f(a)
  println a
end
f(1)";
        let (_, host) = run(source);

        assert_eq!(host.output, "5\n");
        assert!(matches!(host.errors.as_slice(),
                         [ScriptError::ParameterConflict { line: 5, .. }]));
    }

    #[test]
    fn return_unwinds_blocks_opened_in_the_callee() {
        let source = "\
func f()
  if true
    var inside = 1
    return
  end
end
f()
println \"back\"";
        let (engine, host) = run(source);

        assert_eq!(host.output, "back\n");
        assert_eq!(engine.scope_depth(), 0);
        assert_eq!(engine.variable("inside"), None);
    }
}
