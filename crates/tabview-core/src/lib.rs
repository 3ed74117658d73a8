pub mod arith;
pub mod error;
pub mod path;
pub mod resample;
pub mod resolve;
pub mod session;
pub mod tree;

pub use arith::{combine, combine_workspaces, minus, plus};
pub use error::{ResampleError, Result, SelectionError};
pub use path::{NodePath, PathElement, SEPARATOR, WILDCARD};
pub use resample::{Aggregation, Frequency, FrequencyResampler, ResampleRule, Resampler};
pub use resolve::{
    AmbiguousColumnName, DEFAULT_SEPARATOR, RejectedSelection, Resolution, ResolveOptions,
    resolve, resolve_with,
};
pub use session::Session;
pub use tree::{DEFAULT_EXPAND_DEPTH, NodeId, NodeKind, Tree, TreeNode, TreeOptions};

/// Builds the browsable tree of `workspace`.
pub fn build_tree(workspace: &tabview_model::Workspace) -> Tree {
    Tree::build(workspace)
}
