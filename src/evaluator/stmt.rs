use crate::{
    ast::ast::Stmt,
    errors::errors::Error,
    object::{
        environment::Env,
        object::{Object, NULL},
    },
};

use super::{evaluator::Evaluator, expr::eval_expr};

pub fn eval_stmt(evaluator: &mut Evaluator, stmt: &Stmt, env: &Env) -> Result<Object, Error> {
    match stmt {
        Stmt::Expression(stmt) => eval_expr(evaluator, &stmt.expression, env),
        Stmt::Let(stmt) => {
            let value = eval_expr(evaluator, &stmt.value, env)?;
            if value.should_propagate() {
                return Ok(value);
            }

            env.borrow_mut().set(stmt.name.value.clone(), value);
            Ok(NULL)
        }
        Stmt::Return(stmt) => {
            let value = match &stmt.value {
                Some(expr) => eval_expr(evaluator, expr, env)?,
                None => NULL,
            };
            if value.should_propagate() {
                return Ok(value);
            }

            Ok(Object::ReturnValue(Box::new(value)))
        }
        Stmt::Block(block) => evaluator.eval_block(block, env),
    }
}
