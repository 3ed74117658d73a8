//! Browsable projection of a workspace.
//!
//! The tree is an arena of nodes addressed by [`NodeId`]. Parents own the ids
//! of their children; there are no back-pointers. The tree never copies data:
//! each node only records the path that reaches its value in the workspace.

use std::collections::HashMap;

use tabview_model::{Cube, Table, Value, Workspace};
use tracing::debug;

use crate::path::{NodePath, PathElement};

/// Default depth to which [`Tree::render`] expands nodes.
pub const DEFAULT_EXPAND_DEPTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// What a node stands for, which fixes how selecting it resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Series,
    Table,
    TableColumn,
    Cube,
    CubeMajor,
    CubeCell,
    Collection,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Table => "table",
            Self::TableColumn => "column",
            Self::Cube => "cube",
            Self::CubeMajor => "major",
            Self::CubeCell => "cell",
            Self::Collection => "collection",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub path: NodePath,
    pub label: String,
    pub kind: NodeKind,
    /// Zero for root-level nodes.
    pub depth: usize,
    children: Vec<NodeId>,
}

impl TreeNode {
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    /// Nodes deeper than this are folded into their parent's line.
    pub expand_depth: usize,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            expand_depth: DEFAULT_EXPAND_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tree {
    nodes: Vec<TreeNode>,
    roots: Vec<NodeId>,
    by_path: HashMap<NodePath, NodeId>,
}

impl Tree {
    pub fn build(workspace: &Workspace) -> Self {
        let mut tree = Self::default();
        tree.rebuild(workspace);
        tree
    }

    /// Clears the arena and regenerates every node from `workspace`.
    ///
    /// Root entries are visited in name order, so the same workspace always
    /// yields the same ids.
    pub fn rebuild(&mut self, workspace: &Workspace) {
        self.nodes.clear();
        self.roots.clear();
        self.by_path.clear();
        self.add_collection(None, &NodePath::default(), workspace);
        debug!(nodes = self.nodes.len(), roots = self.roots.len(), "tree rebuilt");
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id.0)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(TreeNode::children).unwrap_or_default()
    }

    pub fn find(&self, path: &NodePath) -> Option<NodeId> {
        self.by_path.get(path).copied()
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> {
        self.nodes.iter().enumerate().map(|(idx, node)| (NodeId(idx), node))
    }

    /// Node ids in depth-first pre-order.
    pub fn walk(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<NodeId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        order
    }

    /// Indented outline of the tree.
    ///
    /// Internal nodes print `-` when expanded and `+` (with a child count)
    /// when folded at `expand_depth`.
    pub fn render(&self, options: &TreeOptions) -> String {
        let mut out = String::new();
        for id in self.walk() {
            let Some(node) = self.node(id) else {
                continue;
            };
            if node.depth > options.expand_depth {
                continue;
            }
            let indent = "  ".repeat(node.depth);
            let line = if node.is_leaf() {
                format!("{indent}  {} [{}]", node.label, node.kind.as_str())
            } else if node.depth == options.expand_depth {
                format!(
                    "{indent}+ {} [{}, {} children]",
                    node.label,
                    node.kind.as_str(),
                    node.children.len()
                )
            } else {
                format!("{indent}- {} [{}]", node.label, node.kind.as_str())
            };
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn push(&mut self, parent: Option<NodeId>, path: NodePath, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        let depth = parent
            .and_then(|p| self.node(p))
            .map_or(0, |p| p.depth + 1);
        let label = path.label().unwrap_or_default().to_string();
        self.by_path.insert(path.clone(), id);
        self.nodes.push(TreeNode {
            path,
            label,
            kind,
            depth,
            children: Vec::new(),
        });
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    fn add_collection(&mut self, parent: Option<NodeId>, prefix: &NodePath, workspace: &Workspace) {
        for (name, value) in workspace.iter() {
            let base = prefix.child(PathElement::from(name));
            self.add_value(parent, base, value);
        }
    }

    fn add_value(&mut self, parent: Option<NodeId>, base: NodePath, value: &Value) {
        match value {
            Value::Series(_) => {
                self.push(parent, base, NodeKind::Series);
            }
            Value::Table(table) => self.add_table(parent, &base, table),
            Value::Cube(cube) => self.add_cube(parent, &base, cube),
            Value::Collection(inner) => {
                let id = self.push(parent, base.clone(), NodeKind::Collection);
                self.add_collection(Some(id), &base, inner);
            }
        }
    }

    fn add_table(&mut self, parent: Option<NodeId>, base: &NodePath, table: &Table) {
        let id = self.push(parent, base.child(PathElement::AllChildren), NodeKind::Table);
        for column in table.column_names() {
            self.push(
                Some(id),
                base.child(PathElement::from(column)),
                NodeKind::TableColumn,
            );
        }
    }

    fn add_cube(&mut self, parent: Option<NodeId>, base: &NodePath, cube: &Cube) {
        let cube_path = base
            .child(PathElement::AllChildren)
            .child(PathElement::AllChildren);
        let cube_id = self.push(parent, cube_path, NodeKind::Cube);
        for layer in cube.layers() {
            let major = base.child(PathElement::from(layer.major.as_str()));
            let major_id = self.push(
                Some(cube_id),
                major.child(PathElement::AllChildren),
                NodeKind::CubeMajor,
            );
            for minor in layer.table.column_names() {
                self.push(
                    Some(major_id),
                    major.child(PathElement::from(minor)),
                    NodeKind::CubeCell,
                );
            }
        }
    }
}
