//! Native functions available to every program.
//!
//! Builtins are looked up by name only after every scope in the
//! environment chain has missed, so a script may shadow them with `let`.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::object::object::{Builtin, BuiltinFunction, Object, NULL};

lazy_static! {
    pub static ref BUILTINS: HashMap<&'static str, Builtin> = {
        let mut map = HashMap::new();
        register(&mut map, "len", builtin_len);
        register(&mut map, "puts", builtin_puts);
        map
    };
}

fn register(map: &mut HashMap<&'static str, Builtin>, name: &'static str, func: BuiltinFunction) {
    map.insert(name, Builtin { name, func });
}

fn builtin_len(arguments: &[Object]) -> Object {
    if arguments.len() != 1 {
        return Object::Error(format!(
            "wrong number of arguments: want=1, got={}",
            arguments.len()
        ));
    }

    match &arguments[0] {
        Object::String(value) => Object::Integer(value.len() as i64),
        other => Object::Error(format!(
            "argument to `len` not supported, got {}",
            other.obj_type()
        )),
    }
}

fn builtin_puts(arguments: &[Object]) -> Object {
    for argument in arguments {
        println!("{}", argument);
    }

    NULL
}
