use std::rc::Rc;

use crate::{
    ast::{
        ast::Expr,
        expressions::{CallExpr, IfExpr},
    },
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    object::{
        environment::Env,
        object::{Function, Object, NULL},
    },
    stack::ensure_sufficient_stack,
};

use super::{builtins::BUILTINS, evaluator::Evaluator};

/// Evaluates an expression in `env`.
///
/// Every operand is checked as soon as it is produced: an error value (or a
/// pending return) is handed back unevaluated instead of being combined.
pub fn eval_expr(evaluator: &mut Evaluator, expr: &Expr, env: &Env) -> Result<Object, Error> {
    ensure_sufficient_stack(|| match expr {
        Expr::Integer(int) => Ok(Object::Integer(int.value)),
        Expr::Boolean(boolean) => Ok(Object::from_native_bool(boolean.value)),
        Expr::String(string) => Ok(Object::String(string.value.clone())),
        Expr::Identifier(ident) => Ok(eval_identifier(&ident.value, env)),
        Expr::Prefix(prefix) => {
            let right = eval_expr(evaluator, &prefix.right, env)?;
            if right.should_propagate() {
                return Ok(right);
            }

            Ok(eval_prefix_expr(&prefix.operator, right))
        }
        Expr::Infix(infix) => {
            let left = eval_expr(evaluator, &infix.left, env)?;
            if left.should_propagate() {
                return Ok(left);
            }

            let right = eval_expr(evaluator, &infix.right, env)?;
            if right.should_propagate() {
                return Ok(right);
            }

            Ok(eval_infix_expr(&infix.operator, left, right))
        }
        Expr::If(if_expr) => eval_if_expr(evaluator, if_expr, env),
        Expr::Function(function) => Ok(Object::Function(Rc::new(Function {
            parameters: function.parameters.clone(),
            body: Rc::clone(&function.body),
            env: Rc::clone(env),
        }))),
        Expr::Call(call) => eval_call_expr(evaluator, call, env),
    })
}

fn eval_identifier(name: &str, env: &Env) -> Object {
    if let Some(value) = env.borrow().get(name) {
        return value;
    }

    // Builtins are only consulted once every scope has missed
    match BUILTINS.get(name) {
        Some(builtin) => Object::Builtin(*builtin),
        None => Object::Error(format!("identifier not found: {}", name)),
    }
}

fn eval_prefix_expr(operator: &Token, right: Object) -> Object {
    match (operator.kind, right) {
        (TokenKind::Bang, right) => Object::from_native_bool(!right.is_truthy()),
        (TokenKind::Minus, Object::Integer(value)) => Object::Integer(value.wrapping_neg()),
        (_, right) => Object::Error(format!(
            "unknown operator: {}{}",
            operator.literal,
            right.obj_type()
        )),
    }
}

fn eval_infix_expr(operator: &Token, left: Object, right: Object) -> Object {
    match (&left, &right) {
        (Object::Integer(l), Object::Integer(r)) => eval_integer_infix_expr(operator, *l, *r),
        (Object::String(l), Object::String(r)) => match operator.kind {
            TokenKind::Plus => Object::String(format!("{}{}", l, r)),
            TokenKind::Equals => Object::from_native_bool(l == r),
            TokenKind::NotEquals => Object::from_native_bool(l != r),
            _ => unknown_infix_operator(operator, &left, &right),
        },
        (Object::Boolean(l), Object::Boolean(r)) => match operator.kind {
            TokenKind::Equals => Object::from_native_bool(l == r),
            TokenKind::NotEquals => Object::from_native_bool(l != r),
            _ => unknown_infix_operator(operator, &left, &right),
        },
        _ if left.obj_type() != right.obj_type() => Object::Error(format!(
            "type mismatch: {} {} {}",
            left.obj_type(),
            operator.literal,
            right.obj_type()
        )),
        _ => unknown_infix_operator(operator, &left, &right),
    }
}

fn eval_integer_infix_expr(operator: &Token, left: i64, right: i64) -> Object {
    match operator.kind {
        TokenKind::Plus => Object::Integer(left.wrapping_add(right)),
        TokenKind::Minus => Object::Integer(left.wrapping_sub(right)),
        TokenKind::Asterisk => Object::Integer(left.wrapping_mul(right)),
        TokenKind::Slash if right == 0 => Object::Error(String::from("division by zero")),
        TokenKind::Slash => Object::Integer(left.wrapping_div(right)),
        TokenKind::Less => Object::from_native_bool(left < right),
        TokenKind::Greater => Object::from_native_bool(left > right),
        TokenKind::Equals => Object::from_native_bool(left == right),
        TokenKind::NotEquals => Object::from_native_bool(left != right),
        _ => Object::Error(format!(
            "unknown operator: INTEGER {} INTEGER",
            operator.literal
        )),
    }
}

fn unknown_infix_operator(operator: &Token, left: &Object, right: &Object) -> Object {
    Object::Error(format!(
        "unknown operator: {} {} {}",
        left.obj_type(),
        operator.literal,
        right.obj_type()
    ))
}

fn eval_if_expr(evaluator: &mut Evaluator, if_expr: &IfExpr, env: &Env) -> Result<Object, Error> {
    let condition = eval_expr(evaluator, &if_expr.condition, env)?;
    if condition.should_propagate() {
        return Ok(condition);
    }

    if condition.is_truthy() {
        evaluator.eval_block(&if_expr.consequence, env)
    } else if let Some(alternative) = &if_expr.alternative {
        evaluator.eval_block(alternative, env)
    } else {
        Ok(NULL)
    }
}

fn eval_call_expr(evaluator: &mut Evaluator, call: &CallExpr, env: &Env) -> Result<Object, Error> {
    let function = eval_expr(evaluator, &call.function, env)?;
    if function.should_propagate() {
        return Ok(function);
    }

    let mut arguments = Vec::with_capacity(call.arguments.len());
    for argument in &call.arguments {
        let value = eval_expr(evaluator, argument, env)?;
        if value.should_propagate() {
            return Ok(value);
        }
        arguments.push(value);
    }

    evaluator.apply_function(function, arguments, call)
}
