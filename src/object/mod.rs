//! Runtime value model.
//!
//! Contains the closed set of values the evaluator produces and the
//! chained environment that binds names to them. Environments are shared
//! through `Rc<RefCell<_>>` so a closure keeps its defining scope alive for
//! as long as the closure itself is reachable.

pub mod environment;
pub mod object;
