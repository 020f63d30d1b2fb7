use tracing::trace;

use crate::{
    ast::{expressions::CallExpr, statements::BlockStmt, statements::Program},
    config::Config,
    errors::errors::{Error, ErrorImpl},
    object::{
        environment::{Env, Environment},
        object::{Object, NULL},
    },
};

use super::stmt::eval_stmt;

/// Evaluation state that outlives a single node: the configured limits and
/// how deep the current chain of function applications is.
///
/// `Err` results from the evaluator are fatal and abort the whole run. Faults
/// in the program itself come back as `Ok(Object::Error(..))`.
pub struct Evaluator {
    max_call_depth: usize,
    depth: usize,
}

impl Evaluator {
    pub fn new(config: &Config) -> Self {
        Evaluator {
            max_call_depth: config.max_call_depth,
            depth: 0,
        }
    }

    /// Current number of nested function applications.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Evaluates top-level statements in order.
    ///
    /// A `return` ends the program and its value is unwrapped; an error value
    /// ends the program and is the result.
    pub fn eval_program(&mut self, program: &Program, env: &Env) -> Result<Object, Error> {
        let mut result = NULL;

        for stmt in program.iter() {
            result = eval_stmt(self, stmt, env)?;

            if let Object::ReturnValue(value) = result {
                return Ok(*value);
            }
            if result.is_error() {
                return Ok(result);
            }
        }

        Ok(result)
    }

    /// Evaluates a block in `env`.
    ///
    /// Unlike [`Evaluator::eval_program`] a return value is passed up still
    /// wrapped, so it keeps unwinding through enclosing blocks until the
    /// function call boundary.
    pub fn eval_block(&mut self, block: &BlockStmt, env: &Env) -> Result<Object, Error> {
        let mut result = NULL;

        for stmt in block.iter() {
            result = eval_stmt(self, stmt, env)?;

            if result.should_propagate() {
                return Ok(result);
            }
        }

        Ok(result)
    }

    /// Calls a function or builtin with already-evaluated arguments.
    #[tracing::instrument(level = "trace", skip_all, fields(depth = self.depth))]
    pub fn apply_function(
        &mut self,
        function: Object,
        arguments: Vec<Object>,
        call: &CallExpr,
    ) -> Result<Object, Error> {
        let function = match function {
            Object::Function(function) => function,
            Object::Builtin(builtin) => {
                trace!(name = builtin.name, "calling builtin");
                return Ok((builtin.func)(&arguments));
            }
            other => return Ok(Object::Error(format!("not a function: {}", other.obj_type()))),
        };

        if function.parameters.len() != arguments.len() {
            return Ok(Object::Error(format!(
                "wrong number of arguments: want={}, got={}",
                function.parameters.len(),
                arguments.len()
            )));
        }

        if self.depth >= self.max_call_depth {
            return Err(Error::new(
                ErrorImpl::CallDepthExceeded {
                    limit: self.max_call_depth,
                },
                call.token.span.start.clone(),
            ));
        }

        let env = Environment::new_enclosed(&function.env);
        for (parameter, argument) in function.parameters.iter().zip(arguments) {
            env.borrow_mut().set(parameter.value.clone(), argument);
        }

        self.depth += 1;
        let result = self.eval_block(&function.body, &env);
        self.depth -= 1;

        match result? {
            Object::ReturnValue(value) => Ok(*value),
            value => Ok(value),
        }
    }
}

/// Evaluates a whole program with the default configuration.
pub fn eval(program: &Program, env: &Env) -> Result<Object, Error> {
    Evaluator::new(&Config::default()).eval_program(program, env)
}
