//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs including:
//! - `let` and `return` statements
//! - Operator precedence and grouping
//! - `if` expressions, function literals and calls
//! - Error collection
//! - Rendering round trips

use pretty_assertions::assert_eq;

use super::parser::parse_program;
use crate::{
    ast::{
        ast::{Expr, Node, Stmt},
        statements::Program,
    },
    errors::errors::Error,
    lexer::lexer::{tokenize, Lexer},
};

fn parse(source: &str) -> (Program, Vec<Error>) {
    parse_program(Lexer::new(source.to_string(), Some("test.aq".to_string())))
}

fn parse_ok(source: &str) -> Program {
    let (program, errors) = parse(source);
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
    assert!(messages.is_empty(), "unexpected parse errors: {:?}", messages);
    program
}

fn single_expr(source: &str) -> Expr {
    let program = parse_ok(source);
    assert_eq!(program.statements.len(), 1);
    match &program.statements[0] {
        Stmt::Expression(stmt) => stmt.expression.clone(),
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_let_statements() {
    let program = parse_ok("let x = 5; let y = 10; let footbar = 838383;");

    assert_eq!(program.statements.len(), 3);
    let expected = [("x", "5"), ("y", "10"), ("footbar", "838383")];
    for (stmt, (name, value)) in program.iter().zip(expected) {
        match stmt {
            Stmt::Let(let_stmt) => {
                assert_eq!(let_stmt.token_literal(), "let");
                assert_eq!(let_stmt.name.value, name);
                assert_eq!(let_stmt.name.token_literal(), name);
                assert_eq!(let_stmt.value.to_string(), value);
            }
            other => panic!("expected let statement, got {:?}", other),
        }
    }
}

#[test]
fn test_let_captures_value_expression() {
    let program = parse_ok("let x = 1 + 2 * 3;");

    match &program.statements[0] {
        Stmt::Let(let_stmt) => assert!(matches!(let_stmt.value, Expr::Infix(_))),
        other => panic!("expected let statement, got {:?}", other),
    }
    assert_eq!(program.to_string(), "let x = (1 + (2 * 3));");
}

#[test]
fn test_let_without_semicolon() {
    let program = parse_ok("let a = 1\nlet b = a");

    assert_eq!(program.statements.len(), 2);
    assert_eq!(program.to_string(), "let a = 1;let b = a;");
}

#[test]
fn test_parse_return_statements() {
    let program = parse_ok("return 5; return 10; return 993322;");

    assert_eq!(program.statements.len(), 3);
    for (stmt, value) in program.iter().zip(["5", "10", "993322"]) {
        match stmt {
            Stmt::Return(ret) => {
                assert_eq!(ret.token_literal(), "return");
                assert_eq!(ret.value.as_ref().map(|v| v.to_string()).as_deref(), Some(value));
            }
            other => panic!("expected return statement, got {:?}", other),
        }
    }
}

#[test]
fn test_return_without_value() {
    let program = parse_ok("return;");

    match &program.statements[0] {
        Stmt::Return(ret) => assert!(ret.value.is_none()),
        other => panic!("expected return statement, got {:?}", other),
    }
    assert_eq!(program.to_string(), "return;");
}

#[test]
fn test_malformed_let_reports_errors() {
    let (program, errors) = parse("let = 5;");

    assert_eq!(
        errors[0].to_string(),
        "expected next token to be IDENT, got = instead"
    );
    assert!(program.iter().all(|stmt| !matches!(stmt, Stmt::Let(_))));
}

#[test]
fn test_collects_multiple_errors() {
    let (_, errors) = parse("let x 5; let = 10; let 838383;");
    let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

    assert!(messages.len() >= 3, "got {:?}", messages);
    assert_eq!(messages[0], "expected next token to be =, got INT instead");
    assert!(messages.contains(&"expected next token to be IDENT, got = instead".to_string()));
    assert!(messages.contains(&"expected next token to be IDENT, got INT instead".to_string()));
}

#[test]
fn test_error_position_points_at_offending_token() {
    let (_, errors) = parse("let = 5;");

    assert_eq!(errors[0].get_position().0, 4);
    assert_eq!(*errors[0].get_position().1, "test.aq");
}

#[test]
fn test_no_prefix_parse_function() {
    let (_, errors) = parse("1 + @;");

    assert_eq!(
        errors[0].to_string(),
        "no prefix parse function for ILLEGAL found"
    );
}

#[test]
fn test_integer_out_of_range() {
    let (_, errors) = parse("99999999999999999999;");

    assert_eq!(
        errors[0].to_string(),
        "could not parse \"99999999999999999999\" as integer"
    );
}

#[test]
fn test_unclosed_group() {
    let (_, errors) = parse("(1 + 2");

    assert_eq!(
        errors[0].to_string(),
        "expected next token to be ), got EOF instead"
    );
}

#[test]
fn test_literal_expressions() {
    match single_expr("foobar;") {
        Expr::Identifier(ident) => assert_eq!(ident.value, "foobar"),
        other => panic!("expected identifier, got {:?}", other),
    }
    match single_expr("5;") {
        Expr::Integer(int) => assert_eq!(int.value, 5),
        other => panic!("expected integer, got {:?}", other),
    }
    match single_expr("false;") {
        Expr::Boolean(boolean) => assert!(!boolean.value),
        other => panic!("expected boolean, got {:?}", other),
    }
    match single_expr("\"hello world\";") {
        Expr::String(string) => assert_eq!(string.value, "hello world"),
        other => panic!("expected string, got {:?}", other),
    }
}

#[test]
fn test_operator_precedence() {
    let cases = [
        ("-a * b", "((-a) * b)"),
        ("!-a", "(!(-a))"),
        ("a + b + c", "((a + b) + c)"),
        ("a + b - c", "((a + b) - c)"),
        ("a * b * c", "((a * b) * c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b / c", "(a + (b / c))"),
        ("a + b * c", "(a + (b * c))"),
        ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
        ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
        ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
        ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
        (
            "3 + 4 * 5 == 3 * 1 + 4 * 5",
            "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
        ),
        ("3 > 5 == false", "((3 > 5) == false)"),
        ("3 < 5 == true", "((3 < 5) == true)"),
    ];

    for (input, expected) in cases {
        assert_eq!(parse_ok(input).to_string(), expected, "input: {}", input);
    }
}

#[test]
fn test_grouped_expressions() {
    let cases = [
        ("(a + b) * c", "((a + b) * c)"),
        ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
        ("(5 + 5) * 2", "((5 + 5) * 2)"),
        ("2 / (5 + 5)", "(2 / (5 + 5))"),
        ("-(5 + 5)", "(-(5 + 5))"),
        ("!(true == true)", "(!(true == true))"),
    ];

    for (input, expected) in cases {
        assert_eq!(parse_ok(input).to_string(), expected, "input: {}", input);
    }
}

#[test]
fn test_call_precedence() {
    let cases = [
        ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
        (
            "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
            "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
        ),
        ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
        ("-f(x)", "(-f(x))"),
    ];

    for (input, expected) in cases {
        assert_eq!(parse_ok(input).to_string(), expected, "input: {}", input);
    }
}

#[test]
fn test_if_expression() {
    match single_expr("if (x < y) { x }") {
        Expr::If(if_expr) => {
            assert_eq!(if_expr.condition.to_string(), "(x < y)");
            assert_eq!(if_expr.consequence.statements.len(), 1);
            assert_eq!(if_expr.consequence.to_string(), "x");
            assert!(if_expr.alternative.is_none());
            assert_eq!(if_expr.to_string(), "if (x < y) x");
        }
        other => panic!("expected if expression, got {:?}", other),
    }
}

#[test]
fn test_if_else_expression() {
    match single_expr("if (x < y) { x } else { y }") {
        Expr::If(if_expr) => {
            assert_eq!(
                if_expr.alternative.as_ref().map(|alt| alt.to_string()).as_deref(),
                Some("y")
            );
            assert_eq!(if_expr.to_string(), "if (x < y) x else y");
        }
        other => panic!("expected if expression, got {:?}", other),
    }
}

#[test]
fn test_if_requires_parenthesised_condition() {
    let (_, errors) = parse("if x { 1 }");

    assert_eq!(
        errors[0].to_string(),
        "expected next token to be (, got IDENT instead"
    );
}

#[test]
fn test_function_literal() {
    match single_expr("fn(x, y) { x + y; }") {
        Expr::Function(function) => {
            let params: Vec<&str> = function.parameters.iter().map(|p| p.value.as_str()).collect();
            assert_eq!(params, vec!["x", "y"]);
            assert_eq!(function.body.statements.len(), 1);
            assert_eq!(function.body.to_string(), "(x + y)");
            assert_eq!(function.to_string(), "fn(x, y) { (x + y) }");
        }
        other => panic!("expected function literal, got {:?}", other),
    }
}

#[test]
fn test_function_parameters() {
    let cases: [(&str, &[&str]); 3] = [
        ("fn() {};", &[]),
        ("fn(x) {};", &["x"]),
        ("fn(x, y, z) {};", &["x", "y", "z"]),
    ];

    for (input, expected) in cases {
        match single_expr(input) {
            Expr::Function(function) => {
                let params: Vec<&str> =
                    function.parameters.iter().map(|p| p.value.as_str()).collect();
                assert_eq!(params, expected.to_vec(), "input: {}", input);
            }
            other => panic!("expected function literal, got {:?}", other),
        }
    }
}

#[test]
fn test_function_parameter_must_be_identifier() {
    let (_, errors) = parse("fn(1) { 1 }");

    assert_eq!(
        errors[0].to_string(),
        "expected next token to be IDENT, got INT instead"
    );
}

#[test]
fn test_call_expression() {
    match single_expr("add(1, 2 * 3, 4 + 5);") {
        Expr::Call(call) => {
            assert_eq!(call.function.to_string(), "add");
            let args: Vec<String> = call.arguments.iter().map(|a| a.to_string()).collect();
            assert_eq!(args, vec!["1", "(2 * 3)", "(4 + 5)"]);
        }
        other => panic!("expected call expression, got {:?}", other),
    }
}

#[test]
fn test_call_on_function_literal() {
    let program = parse_ok("fn(x) { x }(5)");

    assert_eq!(program.to_string(), "fn(x) { x }(5)");
}

#[test]
fn test_errors_inside_blocks_are_collected() {
    let (program, errors) = parse("if (true) { let = 1; 2 }; 3");

    assert!(!errors.is_empty());
    assert_eq!(
        errors[0].to_string(),
        "expected next token to be IDENT, got = instead"
    );
    assert_eq!(program.statements.last().map(|s| s.to_string()).as_deref(), Some("3"));
}

#[test]
fn test_parse_from_token_vector() {
    let tokens = tokenize("let a = 1;".to_string(), None);
    let (program, errors) = parse_program(tokens.into_iter());

    assert!(errors.is_empty());
    assert_eq!(program.token_literal(), "let");
    assert_eq!(program.to_string(), "let a = 1;");
}

#[test]
fn test_empty_program() {
    let program = parse_ok("");

    assert!(program.statements.is_empty());
    assert_eq!(program.token_literal(), "");
}

#[test]
fn test_render_round_trip() {
    let sources = [
        "let x = 5 * (3 + y);",
        "return -a + !b;",
        "add(1, mul(2, 3)) == 7",
        "let f = fn(a, b) { let c = a; return c * b; };",
        "let s = \"say \\\"hi\\\"\\n\";",
        "fn(x) { x }(5) != 5",
        "return;",
    ];

    for source in sources {
        let first = parse_ok(source).to_string();
        let second = parse_ok(&first).to_string();
        assert_eq!(first, second, "source: {}", source);
    }
}
