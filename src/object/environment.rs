use std::{cell::RefCell, collections::HashMap, fmt::Debug, rc::Rc};

use super::object::Object;

/// Shared handle to an environment. Function values and child scopes hold
/// one each, so a scope lives exactly as long as its longest holder.
pub type Env = Rc<RefCell<Environment>>;

#[derive(Default)]
pub struct Environment {
    variable_lookup: HashMap<String, Object>,
    outer: Option<Env>,
}

impl Environment {
    /// Creates an outermost environment.
    pub fn new() -> Env {
        Rc::new(RefCell::new(Environment::default()))
    }

    /// Creates a child scope whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: &Env) -> Env {
        Rc::new(RefCell::new(Environment {
            variable_lookup: HashMap::new(),
            outer: Some(Rc::clone(outer)),
        }))
    }

    /// Looks `name` up here, then in each enclosing scope in turn.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.variable_lookup.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref().and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds `name` in this scope, shadowing any outer binding.
    pub fn set(&mut self, name: String, value: Object) {
        self.variable_lookup.insert(name, value);
    }

    pub fn outer(&self) -> Option<&Env> {
        self.outer.as_ref()
    }
}

// Bindings can hold closures that capture this very environment, so the
// output stays shallow to avoid walking a cycle.
impl Debug for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.variable_lookup.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("has_outer", &self.outer.is_some())
            .finish()
    }
}
