//! Tree-walking evaluator.
//!
//! This module walks the AST directly against a chained environment and
//! produces runtime values. It handles:
//!
//! - Statement sequencing with early exit on `return` and on error values
//! - Prefix and infix operators over integers, booleans and strings
//! - `if` expressions and truthiness
//! - Closures, function application and builtin functions
//! - Call depth limiting, reported as a fatal error instead of a value

pub mod builtins;
pub mod evaluator;
pub mod expr;
pub mod stmt;
