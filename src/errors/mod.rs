//! Error types shared by every stage of the interpreter.
//!
//! Parse errors and fatal evaluation errors both use the positioned
//! [`errors::Error`] type defined here. It carries:
//!
//! - The specific error variant
//! - The source position the error points at
//! - A name and suggestion used when rendering diagnostics
//!
//! Ordinary runtime failures are not represented here; they are
//! `Object::Error` values produced by the evaluator.

pub mod errors;
