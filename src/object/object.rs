use std::{
    fmt::{Debug, Display, Formatter, Result},
    rc::Rc,
};

use crate::ast::{expressions::Identifier, statements::BlockStmt};

use super::environment::Env;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// Native function callable from scripts. Receives already-evaluated
/// arguments and reports misuse as an `Object::Error`.
pub type BuiltinFunction = fn(&[Object]) -> Object;

/// Runtime Value
///
/// `ReturnValue` and `Error` are control-flow carriers: a return value is
/// unwrapped before a program or call result is observed, and an error stops
/// evaluation of the enclosing block.
#[derive(Debug, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    ReturnValue(Box<Object>),
    Error(String),
    Function(Rc<Function>),
    Builtin(Builtin),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ObjectType {
    Integer,
    Boolean,
    String,
    Null,
    ReturnValue,
    Error,
    Function,
    Builtin,
}

impl Display for ObjectType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let tag = match self {
            ObjectType::Integer => "INTEGER",
            ObjectType::Boolean => "BOOLEAN",
            ObjectType::String => "STRING",
            ObjectType::Null => "NULL",
            ObjectType::ReturnValue => "RETURN_VALUE",
            ObjectType::Error => "ERROR",
            ObjectType::Function => "FUNCTION",
            ObjectType::Builtin => "BUILTIN",
        };
        write!(f, "{}", tag)
    }
}

impl Object {
    pub fn obj_type(&self) -> ObjectType {
        match self {
            Object::Integer(_) => ObjectType::Integer,
            Object::Boolean(_) => ObjectType::Boolean,
            Object::String(_) => ObjectType::String,
            Object::Null => ObjectType::Null,
            Object::ReturnValue(_) => ObjectType::ReturnValue,
            Object::Error(_) => ObjectType::Error,
            Object::Function(_) => ObjectType::Function,
            Object::Builtin(_) => ObjectType::Builtin,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Errors and pending returns must be handed straight back to the caller
    /// without evaluating anything else.
    pub fn should_propagate(&self) -> bool {
        matches!(self, Object::Error(_) | Object::ReturnValue(_))
    }

    /// Only `false` and `null` are falsy. Every other value, `0` and the empty
    /// string included, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Object::Boolean(false) | Object::Null)
    }

    pub fn from_native_bool(value: bool) -> Object {
        if value {
            TRUE
        } else {
            FALSE
        }
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            (Object::Function(a), Object::Function(b)) => Rc::ptr_eq(a, b),
            (Object::Builtin(a), Object::Builtin(b)) => a.name == b.name,
            _ => false,
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Object::Integer(value) => write!(f, "{}", value),
            Object::Boolean(value) => write!(f, "{}", value),
            Object::String(value) => write!(f, "{}", value),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Error(message) => write!(f, "ERROR: {}", message),
            Object::Function(function) => write!(f, "{}", function),
            Object::Builtin(_) => write!(f, "builtin function"),
        }
    }
}

/// Function
/// A closure: parameters and body from the literal, plus the environment
/// that was active when the literal was evaluated.
pub struct Function {
    pub parameters: Vec<Identifier>,
    pub body: Rc<BlockStmt>,
    pub env: Env,
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let params: Vec<String> = self.parameters.iter().map(|p| p.to_string()).collect();
        write!(f, "fn({}) {{ {} }}", params.join(", "), self.body)
    }
}

// The captured environment may contain this function, so it is left out.
impl Debug for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("Function")
            .field("parameters", &self.parameters)
            .field("body", &self.body.to_string())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub func: BuiltinFunction,
}
