//! Error types for tree selection and resampling.

use tabview_model::ModelError;
use thiserror::Error;

use crate::path::NodePath;

/// Errors raised while turning selected paths into a table or while
/// mutating the workspace through the tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SelectionError {
    /// The path's shape matches none of the selection rules.
    #[error("unsupported selection {path}: {reason}")]
    UnsupportedSelection { path: NodePath, reason: &'static str },

    /// The path does not resolve against the workspace.
    #[error(transparent)]
    Workspace(#[from] ModelError),
}

/// Result type for selection operations.
pub type Result<T> = std::result::Result<T, SelectionError>;

/// Errors raised by resamplers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResampleError {
    #[error("cannot resample a {kind} key axis with {frequency}")]
    UnsupportedKey {
        kind: &'static str,
        frequency: String,
    },

    #[error("invalid frequency '{0}'")]
    InvalidFrequency(String),

    #[error("unknown aggregation '{0}'")]
    UnknownAggregation(String),

    #[error(transparent)]
    Model(#[from] ModelError),
}
