//! Interpreter configuration.
//!
//! Library callers build a [`Config`] directly (or take the default); the
//! binary fills it in from command-line flags.

/// Nested function applications allowed before evaluation is aborted.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Deepest chain of function applications before a fatal error.
    pub max_call_depth: usize,
    /// Print the parsed program back instead of evaluating it.
    pub echo: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            echo: false,
        }
    }
}
