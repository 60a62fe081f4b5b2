//! Error types for the reasoning core.

use thiserror::Error;

/// Errors surfaced to callers of the reasoning and introspection APIs.
///
/// Iteration and depth caps are not errors: exhausting them yields a
/// best-effort result with `found == false`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ReasoningError {
    #[error("unknown reasoning method: {0}. Supported: forward, backward, abductive")]
    UnknownMethod(String),

    #[error("unknown reflection depth: {0}. Supported: surface, deep, philosophical")]
    UnknownDepth(String),

    #[error("goal must not be empty")]
    EmptyGoal,
}
