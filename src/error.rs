//! Error types for tree rendering.

use thiserror::Error;

/// Errors surfaced while rendering a value tree.
///
/// Every finite, acyclic input renders without error no matter how exotic
/// its leaves; these variants cover the two pathological shapes plus
/// writer failure.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A shared node already on the active render path was reached again.
    /// Raised instead of recursing until stack exhaustion.
    #[error("cyclic structure at index path \"{path}\"")]
    CyclicStructure {
        /// Dotted index path where the cycle closed.
        path: String,
    },

    /// Nesting exceeded the configured depth limit.
    #[error("input nesting depth {depth} exceeds limit {limit}")]
    InputTooDeep { depth: usize, limit: usize },

    /// The output writer failed.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
