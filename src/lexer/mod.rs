//! Lexical analysis module for the interpreter.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - On-demand tokenization using an ordered table of regex patterns
//! - Recognition of keywords, identifiers, integer and string literals
//! - Token position tracking for error reporting
//! - Comments and whitespace handling
//! - Illegal characters, surfaced as tokens instead of failures

pub mod lexer;
pub mod tokens;
