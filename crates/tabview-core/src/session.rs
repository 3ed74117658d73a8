//! A workspace paired with the tree that browses it.

use tabview_model::{Value, Workspace};
use tracing::debug;

use crate::error::{Result, SelectionError};
use crate::path::NodePath;
use crate::resolve::{Resolution, ResolveOptions, resolve_with};
use crate::tree::Tree;

/// Owns a workspace and keeps its tree in step with every mutation.
///
/// All writes go through the session, so the tree is rebuilt after each one
/// and never describes data that is no longer there.
#[derive(Debug, Clone, Default)]
pub struct Session {
    workspace: Workspace,
    tree: Tree,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_workspace(workspace: Workspace) -> Self {
        let tree = Tree::build(&workspace);
        Self { workspace, tree }
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Stores `value` under `name`. A collection merges into an existing one.
    pub fn add_object(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        debug!(object = %name, kind = %value.kind(), "adding object");
        self.workspace.put(name, value);
        self.tree.rebuild(&self.workspace);
    }

    /// Adds every entry of `collection` at the root, then rebuilds once.
    pub fn add_objects(&mut self, collection: Workspace) {
        debug!(entries = collection.len(), "adding objects");
        self.workspace.merge(collection);
        self.tree.rebuild(&self.workspace);
    }

    /// Removes the data behind a tree node.
    ///
    /// Trailing wildcards are dropped, so `t/*` removes table `t` and `c/m/*`
    /// removes major `m` of cube `c`. Containers left empty are pruned with
    /// it. On error neither the workspace nor the tree change.
    pub fn remove_node(&mut self, path: &NodePath) -> Result<Value> {
        let keys = path
            .trimmed_keys()
            .ok_or_else(|| SelectionError::UnsupportedSelection {
                path: path.clone(),
                reason: "wildcard before a concrete element",
            })?;
        let removed = self.workspace.remove(&keys)?;
        debug!(%path, kind = %removed.kind(), "removed node");
        self.tree.rebuild(&self.workspace);
        Ok(removed)
    }

    pub fn resolve(&self, paths: &[NodePath]) -> Result<Resolution> {
        self.resolve_with(paths, &ResolveOptions::default())
    }

    pub fn resolve_with(&self, paths: &[NodePath], options: &ResolveOptions) -> Result<Resolution> {
        resolve_with(&self.workspace, paths, options)
    }

    /// True when every tree node addresses data present in the workspace.
    pub fn is_consistent(&self) -> bool {
        self.tree.nodes().all(|(_, node)| {
            node.path
                .trimmed_keys()
                .is_some_and(|keys| self.workspace.get(&keys).is_ok())
        })
    }

    pub fn into_workspace(self) -> Workspace {
        self.workspace
    }
}
