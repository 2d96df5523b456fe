// File: crates/graphics-core/src/error.rs
// Summary: Error types shared by scene construction, primitives and the chart widget path.

use thiserror::Error;

/// Failure reported by a [`DataSource`](crate::host::DataSource) while evaluating an expression.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RetrievalError {
    #[error("unknown expression: {0}")]
    UnknownExpression(String),

    #[error("interpretation failed for {expr}: {message}")]
    Interpretation { expr: String, message: String },
}

#[derive(Debug, Error)]
pub enum GraphicsError {
    /// Data retrieval failed; propagated unmodified, never retried.
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    /// A colour constructor was given the wrong number of channels.
    #[error("{head} must have three arguments, got {got}")]
    ColorArity { head: &'static str, got: usize },

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl From<serde_json::Error> for GraphicsError {
    fn from(e: serde_json::Error) -> Self {
        GraphicsError::InvalidOptions(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, GraphicsError>;
