use std::fs;

use snx::{
    ast::BlockStyle,
    error::{ErrorKind, ScriptError},
    evaluate,
    interpreter::{
        engine::{config::Config, core::Termination, host::CapturedHost},
        value::core::Value,
    },
    run_source,
};
use walkdir::WalkDir;

#[test]
fn script_fixtures_produce_expected_output() {
    let mut count = 0;
    let root = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/scripts");

    for entry in
        WalkDir::new(root).into_iter()
                          .filter_map(Result::ok)
                          .filter(|e| e.path().extension().is_some_and(|ext| ext == "snx"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = fs::read_to_string(path.with_extension("out"))
            .unwrap_or_else(|e| panic!("Missing expected output for {path:?}: {e}"));
        let expected_errors = fs::read_to_string(path.with_extension("err")).unwrap_or_default();

        let mut host = CapturedHost::new();
        if let Err(e) = run_source(&source, Config::default(), &mut host) {
            panic!("Script {path:?} stopped with a fatal error: {e}");
        }

        assert_eq!(host.output, expected, "output of {path:?}");
        assert_eq!(host.error_messages(),
                   expected_errors.lines().collect::<Vec<_>>(),
                   "errors of {path:?}");
        count += 1;
    }

    assert!(count > 0, "No scripts found in {root}");
}

fn run(src: &str) -> CapturedHost {
    let mut host = CapturedHost::new();
    if let Err(e) = run_source(src, Config::default(), &mut host) {
        panic!("Script failed: {e}");
    }
    host
}

fn assert_output(src: &str, expected: &str) {
    let host = run(src);
    assert!(host.errors.is_empty(), "unexpected errors: {:?}", host.error_messages());
    assert_eq!(host.output, expected);
}

#[test]
fn expression_results() {
    assert_eq!(evaluate("2 + 3 * 4"), Value::Int(14));
    assert_eq!(evaluate("(2 + 3) * 4"), Value::Int(20));
    assert_eq!(evaluate("10 / 4"), Value::Float(2.5));
    assert_eq!(evaluate("10 / 5"), Value::Int(2));
    assert_eq!(evaluate("\"foo\" + 1"), Value::from("foo1"));
    assert_eq!(evaluate("\"3\" + 4"), Value::Int(7));
    assert_eq!(evaluate("true && false"), Value::Bool(false));
    assert_eq!(evaluate("1 < 2 && 2 < 3"), Value::Bool(true));
}

#[test]
fn expression_failures_are_values() {
    let Value::Error(message) = evaluate("7 % 0") else {
        panic!("expected an error value");
    };
    assert!(message.contains("Modulo by zero"));

    assert!(evaluate("1 +").is_error());
    assert!(evaluate("(1").is_error());
    assert!(evaluate("\"open").is_error());
    assert!(evaluate("1 == \"1\"").is_error());
}

#[test]
fn redeclaration_keeps_the_first_value() {
    let host = run("var x = 1\nvar x = 2\nprintln x");

    assert_eq!(host.output, "1\n");
    assert_eq!(host.errors.len(), 1);
    assert_eq!(host.errors[0].kind(), ErrorKind::Compilation);
}

#[test]
fn conditionals_enter_or_skip() {
    assert_output("if 1 > 2\n  println \"a\"\nend\nprintln \"b\"", "b\n");
    assert_output("if 2 > 1\n  println \"a\"\nend\nprintln \"b\"", "a\nb\n");
    assert_output("if true\n  if false\n    println 1\n  end\n  println 2\nend", "2\n");
}

#[test]
fn unknown_function_is_a_name_error() {
    let host = run("nothing(1, 2)\nprintln \"after\"");

    assert_eq!(host.output, "after\n");
    assert_eq!(host.error_messages(),
               vec!["Name Error on line 1: Function 'nothing' is not defined."]);
}

#[test]
fn invalid_goto_is_fatal() {
    let mut host = CapturedHost::new();
    let result = run_source("println 1\nGOTO 40\nprintln 2", Config::default(), &mut host);

    assert_eq!(result, Err(ScriptError::InvalidJump { target: 40, line: 2 }));
    assert_eq!(host.output, "1\n");
}

#[test]
fn goto_zero_is_fatal() {
    let mut host = CapturedHost::new();
    let result = run_source("GOTO 0", Config::default(), &mut host);

    assert!(matches!(result, Err(ScriptError::InvalidJump { target: 0, .. })));
}

#[test]
fn functions_bind_parameters_and_return() {
    let src = "\
func describe(name, age)
  println name + \" is \" + age
  return
  println \"never\"
end
describe(\"ada\", 36)
describe(\"bob\")";
    let host = run(src);

    assert_eq!(host.output, "ada is 36\nbob is 0\n");
    assert_eq!(host.error_messages(),
               ["Runtime Error on line 7: No argument for parameter 'age'. Defaulting to 0."]);
}

#[test]
fn failing_argument_is_reported_and_defaults_to_zero() {
    let host = run("func f(a)\n  println a\nend\nf(1 / 0)");

    assert_eq!(host.output, "0\n");
    assert_eq!(host.error_messages(),
               ["Runtime Error on line 4: Failed to evaluate argument for parameter 'a' \
                 (Division by zero). Defaulting to 0."]);
}

#[test]
fn function_bodies_are_skipped_until_called() {
    assert_output("func f()\n  println \"body\"\nend\nprintln \"top\"", "top\n");
}

#[test]
fn initial_style_comes_from_config() {
    let config = Config { style: BlockStyle::Bracketed,
                          ..Config::default() };
    let mut host = CapturedHost::new();

    run_source("if true {\n  println 1\n}\nprintln 2", config, &mut host).unwrap();
    assert_eq!(host.output, "1\n2\n");
    assert!(host.errors.is_empty());
}

#[test]
fn input_reads_one_line_per_use() {
    let mut host = CapturedHost::with_input(["3", "4"]);
    run_source("var a = input\nvar b = input\nprintln a + b\nprintln a * b",
               Config::default(),
               &mut host).unwrap();

    assert_eq!(host.output, "7\n12\n");
}

#[test]
fn exec_hands_commands_to_the_host() {
    let host = run("var file = \"notes.txt\"\nexec \"touch \" + file");
    assert_eq!(host.commands, vec!["touch notes.txt"]);
}

#[test]
fn interpolation_inserts_values() {
    assert_output("var n = 2.0\nvar s = \"q\\\"\"\nprintln \"n=${n} s=${s}\"",
                  "n=2.0 s=q\"\n");
}

#[test]
fn end_terminates() {
    let mut host = CapturedHost::new();
    let result = run_source("println 1\nEND\nprintln 2", Config::default(), &mut host);

    assert_eq!(result, Ok(Termination::EndCommand));
    assert_eq!(host.output, "1\n");
}

#[test]
fn return_value_is_ignored() {
    let src = "func f()\n  return 5\n  println \"still here\"\nend\nf()";
    assert_output(src, "still here\n");
}
