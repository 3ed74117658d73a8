use thiserror::Error;

use crate::key::Key;
use crate::value::ValueKind;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    /// A path step named a child that does not exist.
    #[error("path not found: {path} (no child '{key}')")]
    PathNotFound { path: String, key: String },

    /// A path tried to descend below a value that has no children.
    #[error("cannot index into {kind} at {path}")]
    NotIndexable { path: String, kind: ValueKind },

    #[error("duplicate key {key} in series")]
    DuplicateKey { key: Key },

    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },

    #[error("duplicate cube label '{label}'")]
    DuplicateLabel { label: String },

    #[error("length mismatch for {context}: expected {expected}, found {found}")]
    LengthMismatch {
        context: String,
        expected: usize,
        found: usize,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;

/// Renders a workspace path as `a/b/c`, or `<root>` when empty.
pub fn format_path<K: AsRef<str>>(path: &[K]) -> String {
    if path.is_empty() {
        return "<root>".to_string();
    }
    path.iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("/")
}
