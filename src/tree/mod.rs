//! Defines the static, labelled, rooted tree that every query structure in this crate is built from.
//!
//! A tree can be constructed in three ways:
//!
//! *   From an owned, nested [`Node`] specification with [`LabeledTree::from_node`].
//!     Node ids are assigned in pre-order.
//! *   Incrementally with [`LabeledTree::add_root`] followed by [`LabeledTree::add_child`].
//! *   From `(parent, child)` label pairs given in any order with [`LabeledTree::from_edges`].
//!
//! The core components are:
//! *   [`LabeledTree<L>`]: an arena of nodes ([`ChildVecStore`]) plus an insertion-ordered set of
//!     labels. `TreeNodeId(i)` is the index of both the arena node and its label, so label lookup
//!     is a single hash probe.
//! *   [`TreeNodeId`], [`ParentId`]: typed identifiers for nodes and parent links.
//! *   [`TreeError`]: construction and lookup failures.
//!
//! Labels are the identity key of a node and must be unique across the whole tree.

use std::{
    fmt::{Debug, Display, Write},
    hash::Hash,
    ops::Index,
};

use ahash::{AHashMap, RandomState};
use derive_more::{From, Into};
use indexmap::{Equivalent, IndexSet};
use thiserror::Error;
use tracing::debug;

use child_vec::ChildVecStore;
pub use child_vec::{CVNode, ParentId};
use iterato::{AncestorsIter, PreorderIter};
pub use node::{Children, Node};

pub mod child_vec;
pub mod iterato;
pub mod node;

/// A type-safe identifier for a node within a [`LabeledTree`].
/// Wraps a `usize` index into the underlying node storage vector.
#[derive(
    Clone, Debug, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into, derive_more::Display,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNodeId(pub(crate) usize);

impl TreeNodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Errors that can occur while building or addressing a tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TreeError {
    #[error("Duplicate label: {0}")]
    DuplicateLabel(String),
    #[error("Tree has no root")]
    EmptyTree,
    #[error("Tree already has a root")]
    RootExists,
    #[error("Invalid TreeNodeId: {0:?}")]
    InvalidNodeId(TreeNodeId),
    #[error("{0} edge(s) are not connected to the root")]
    Unreachable(usize),
}

/// A rooted tree with ordered children, where every node carries a unique label.
///
/// The root, if present, is always `TreeNodeId(0)`: children can only be attached to existing
/// nodes, so the first node added is the root.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(bound(
        serialize = "L: serde::Serialize",
        deserialize = "L: serde::Deserialize<'de> + Eq + Hash"
    ))
)]
pub struct LabeledTree<L> {
    pub(crate) nodes: ChildVecStore,
    pub(crate) labels: IndexSet<L, RandomState>,
}

impl<L> Default for LabeledTree<L> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L> Index<TreeNodeId> for LabeledTree<L> {
    type Output = L;
    fn index(&self, index: TreeNodeId) -> &Self::Output {
        &self.labels[index.0]
    }
}

/// Read-only access, available for any label type.
impl<L> LabeledTree<L> {
    pub fn new() -> Self {
        LabeledTree {
            nodes: ChildVecStore::default(),
            labels: IndexSet::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.n_nodes()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn root(&self) -> Option<TreeNodeId> {
        (!self.is_empty()).then_some(TreeNodeId(0))
    }

    pub fn contains(&self, node_id: TreeNodeId) -> bool {
        node_id.0 < self.len()
    }

    /// Returns the label of `node_id`, or `None` if the id does not belong to this tree.
    pub fn label(&self, node_id: TreeNodeId) -> Option<&L> {
        self.labels.get_index(node_id.0)
    }

    /// # Panics
    ///
    /// If `node_id` does not belong to this tree (see [`LabeledTree::contains`]). The same holds
    /// for [`LabeledTree::children`] and [`LabeledTree::depth`].
    pub fn parent(&self, node_id: TreeNodeId) -> ParentId {
        self.nodes[&node_id]
    }

    pub fn children(&self, node_id: TreeNodeId) -> &[TreeNodeId] {
        self.nodes.children(node_id)
    }

    /// Number of edges between `node_id` and the root. Panics on a foreign id.
    pub fn depth(&self, node_id: TreeNodeId) -> usize {
        self.nodes[node_id].depth
    }

    pub fn iter_node_ids(&self) -> impl Iterator<Item = TreeNodeId> + '_ {
        self.nodes.iter_node_id()
    }

    pub fn iter_leaves(&self) -> impl Iterator<Item = TreeNodeId> + '_ {
        self.nodes.iter_leaves()
    }

    /// Returns a pre-order DFS iterator over the subtree rooted at `start`.
    pub fn iter_preorder(&self, start: TreeNodeId) -> PreorderIter<'_> {
        PreorderIter::new(&self.nodes, start)
    }

    /// Returns an iterator from `start` up to the root (inclusive).
    pub fn iter_ancestors(&self, start: TreeNodeId) -> AncestorsIter<'_> {
        AncestorsIter::new(&self.nodes, start)
    }

    /// Labels of the whole tree in pre-order.
    pub fn iter_labels(&self) -> impl Iterator<Item = &L> + '_ {
        self.root()
            .into_iter()
            .flat_map(|root| self.iter_preorder(root))
            .map(|id| &self.labels[id.0])
    }

    /// Draws the tree with one node per line, children indented under their parent.
    ///
    /// `node_display` renders a single node; use [`LabeledTree::draw`] to print labels directly.
    pub fn debug_draw(&self, mut node_display: impl FnMut(TreeNodeId, &L) -> String) -> String {
        let mut output = String::new();
        let Some(root) = self.root() else {
            return output;
        };

        let _ = writeln!(output, "{}", node_display(root, &self[root]));

        // (node, prefix of its line, is it the last child of its parent)
        let mut stack: Vec<(TreeNodeId, String, bool)> = Vec::new();
        let push_children =
            |stack: &mut Vec<(TreeNodeId, String, bool)>, node: TreeNodeId, prefix: &str| {
                let children = self.children(node);
                for (i, &child) in children.iter().enumerate().rev() {
                    stack.push((child, prefix.to_owned(), i == children.len() - 1));
                }
            };
        push_children(&mut stack, root, "");

        while let Some((node_id, prefix, is_last_child)) = stack.pop() {
            let connector = if is_last_child {
                "└── "
            } else {
                "├── "
            };
            let _ = writeln!(
                output,
                "{prefix}{connector}{}",
                node_display(node_id, &self[node_id])
            );
            let child_prefix = format!("{}{}", prefix, if is_last_child { "    " } else { "│   " });
            push_children(&mut stack, node_id, &child_prefix);
        }

        output
    }

    pub fn draw(&self) -> String
    where
        L: Display,
    {
        self.debug_draw(|_, label| label.to_string())
    }
}

/// Label lookup.
impl<L: Eq + Hash> LabeledTree<L> {
    pub fn node_id<Q>(&self, label: &Q) -> Option<TreeNodeId>
    where
        Q: ?Sized + Hash + Equivalent<L>,
    {
        self.labels.get_index_of(label).map(TreeNodeId)
    }

    pub fn contains_label<Q>(&self, label: &Q) -> bool
    where
        Q: ?Sized + Hash + Equivalent<L>,
    {
        self.labels.contains(label)
    }
}

/// Methods for constructing the tree.
impl<L: Eq + Hash + Debug> LabeledTree<L> {
    fn insert_label(&mut self, label: L) -> Result<(), TreeError> {
        if self.labels.contains(&label) {
            return Err(TreeError::DuplicateLabel(format!("{label:?}")));
        }
        self.labels.insert(label);
        Ok(())
    }

    /// Adds the root node. Fails if the tree already has one.
    pub fn add_root(&mut self, label: L) -> Result<TreeNodeId, TreeError> {
        if !self.is_empty() {
            return Err(TreeError::RootExists);
        }
        self.insert_label(label)?;
        Ok(self.nodes.add_root())
    }

    /// Adds a new node as the *last* child of `parent`.
    pub fn add_child(&mut self, parent: TreeNodeId, label: L) -> Result<TreeNodeId, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::InvalidNodeId(parent));
        }
        self.insert_label(label)?;
        Ok(self.nodes.add_child(parent))
    }

    /// Converts a nested [`Node`] specification into a tree, assigning ids in pre-order.
    pub fn from_node(root: Node<L>) -> Result<Self, TreeError> {
        let mut tree = LabeledTree::new();
        let mut stack: Vec<(Node<L>, Option<TreeNodeId>)> = vec![(root, None)];

        while let Some((Node { label, children }, parent)) = stack.pop() {
            let id = match parent {
                None => tree.add_root(label)?,
                Some(parent) => tree.add_child(parent, label)?,
            };
            stack.extend(
                children
                    .into_vec()
                    .into_iter()
                    .rev()
                    .map(|child| (child, Some(id))),
            );
        }

        debug!(nodes = tree.len(), "built tree from node specification");
        Ok(tree)
    }

    /// Builds a tree from `(parent, child)` label pairs, given in any order.
    ///
    /// Children keep the relative order in which their edges appear. Fails with
    /// [`TreeError::DuplicateLabel`] when a label receives two parents (or the root receives one),
    /// and with [`TreeError::Unreachable`] when some edges do not hang below `root`.
    pub fn from_edges(root: L, edges: impl IntoIterator<Item = (L, L)>) -> Result<Self, TreeError> {
        let mut children_of: AHashMap<L, Vec<L>> = AHashMap::new();
        for (parent, child) in edges {
            children_of.entry(parent).or_default().push(child);
        }

        let mut tree = LabeledTree::new();
        let mut stack = vec![tree.add_root(root)?];
        while let Some(id) = stack.pop() {
            let children = children_of.remove(&tree[id]).unwrap_or_default();
            for child in children {
                stack.push(tree.add_child(id, child)?);
            }
        }

        let unreachable: usize = children_of.values().map(Vec::len).sum();
        if unreachable > 0 {
            return Err(TreeError::Unreachable(unreachable));
        }

        debug!(nodes = tree.len(), "built tree from edge list");
        Ok(tree)
    }
}

impl<L: Eq + Hash + Debug> TryFrom<Node<L>> for LabeledTree<L> {
    type Error = TreeError;
    fn try_from(root: Node<L>) -> Result<Self, Self::Error> {
        LabeledTree::from_node(root)
    }
}

#[cfg(test)]
pub(crate) mod test;
