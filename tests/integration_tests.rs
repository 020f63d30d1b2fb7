//! Integration tests for end-to-end interpretation.
//!
//! These tests drive the public API the way an embedding host would: source
//! text goes through the lexer and parser, and the resulting program is
//! evaluated against an environment the test owns.

use std::path::PathBuf;

use aquamarine::{
    config::Config,
    errors::errors::Error,
    evaluator::evaluator::{eval, Evaluator},
    format_error,
    lexer::lexer::{tokenize, Lexer},
    object::{
        environment::{Env, Environment},
        object::Object,
    },
    parser::parser::parse_program,
};
use pretty_assertions::assert_eq;

fn run_in(source: &str, env: &Env) -> Result<Object, Error> {
    let (program, errors) = parse_program(Lexer::new(source.to_string(), Some("test.aq".into())));
    assert!(errors.is_empty(), "parse errors: {:?}", errors);

    eval(&program, env)
}

fn run(source: &str) -> Object {
    run_in(source, &Environment::new()).expect("no fatal error")
}

#[test]
fn test_fibonacci_program() {
    let source = r#"
        // naive recursion
        let fibonacci = fn(n) {
            if (n < 2) {
                return n;
            }
            fibonacci(n - 1) + fibonacci(n - 2);
        };

        fibonacci(20);
    "#;

    assert_eq!(run(source), Object::Integer(6765));
}

#[test]
fn test_higher_order_functions() {
    let source = "
        let twice = fn(f, x) { f(f(x)) };
        let compose = fn(f, g) { fn(x) { g(f(x)) } };
        let inc = fn(x) { x + 1 };
        let double = fn(x) { x * 2 };

        twice(compose(inc, double), 3);
    ";

    assert_eq!(run(source), Object::Integer(18));
}

#[test]
fn test_closures_capture_independent_scopes() {
    let source = "
        let make = fn(base) { fn(offset) { base + offset } };
        let ten = make(10);
        let hundred = make(100);

        ten(1) + hundred(2);
    ";

    assert_eq!(run(source), Object::Integer(113));
}

#[test]
fn test_strings_and_builtins() {
    let source = r#"
        let greet = fn(name) { "Hello, " + name + "!" };
        let message = greet("Aquamarine");
        if (len(message) == 18) { message } else { "wrong length" }
    "#;

    assert_eq!(run(source), Object::String("Hello, Aquamarine!".to_string()));
}

#[test]
fn test_environment_is_shared_across_programs() {
    let env = Environment::new();

    assert_eq!(run_in("let counter = 41;", &env).unwrap(), Object::Null);
    assert_eq!(
        run_in("let bump = fn(n) { n + 1 };", &env).unwrap(),
        Object::Null
    );
    assert_eq!(run_in("bump(counter)", &env).unwrap(), Object::Integer(42));
}

#[test]
fn test_runtime_error_inside_nested_calls() {
    let source = "
        let inner = fn(x) { x + true };
        let outer = fn(x) { let y = inner(x); y * 2 };
        outer(1);
        99;
    ";

    assert_eq!(
        run(source),
        Object::Error("type mismatch: INTEGER + BOOLEAN".to_string())
    );
}

#[test]
fn test_parse_errors_are_all_reported() {
    let (_, errors) = parse_program(Lexer::new("let x 5;\nlet = 10;\n".to_string(), None));
    let messages: Vec<String> = errors.iter().map(|error| error.to_string()).collect();

    assert_eq!(messages[0], "expected next token to be =, got INT instead");
    assert!(messages.contains(&"expected next token to be IDENT, got = instead".to_string()));
}

#[test]
fn test_parser_accepts_any_token_source() {
    let tokens = tokenize("let a = 3; a * a".to_string(), None);
    let (program, errors) = parse_program(tokens.into_iter());

    assert!(errors.is_empty());
    assert_eq!(eval(&program, &Environment::new()).unwrap(), Object::Integer(9));
}

#[test]
fn test_program_rendering() {
    let source = "let f = fn(a, b) { if (a < b) { return -a; } else { a * (b + 1) } }; f(1, 2)";
    let (program, errors) = parse_program(Lexer::new(source.to_string(), None));
    assert!(errors.is_empty());

    assert_eq!(
        program.to_string(),
        "let f = fn(a, b) { if (a < b) return (-a); else (a * (b + 1)) };f(1, 2)"
    );
}

#[test]
fn test_runaway_recursion_is_fatal() {
    let config = Config {
        max_call_depth: 100,
        ..Config::default()
    };
    let source = "let forever = fn(n) { forever(n + 1) };\nforever(0);";
    let (program, _) = parse_program(Lexer::new(source.to_string(), Some("loop.aq".into())));

    let error = Evaluator::new(&config)
        .eval_program(&program, &Environment::new())
        .unwrap_err();

    assert!(error.is_fatal());
    let rendered = format_error(&error, &PathBuf::from("loop.aq"), source);
    assert!(rendered.starts_with("Error: CallDepthExceeded"));
    assert!(rendered.contains("1 | let forever = fn(n) { forever(n + 1) };"));
    assert!(rendered.ends_with("call depth exceeded: limit is 100\n"));
}
