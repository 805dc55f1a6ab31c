//! Lowest-common-ancestor queries over a static [`LabeledTree`].
//!
//! [`LcaEngine`] owns the tree together with the structures derived from it: the [`EulerTour`],
//! a range-minimum index over the tour's depth sequence, and a [`LevelAncestor`] index. Building
//! is a handful of sequential passes; afterwards every query takes `&self`, so an engine can be
//! shared between threads freely.
//!
//! An LCA query resolves both labels to their first occurrence in the tour and asks the index
//! for the shallowest step between them. That step is the lowest common ancestor: the walk
//! between the two occurrences never leaves the subtree of the LCA and passes through the LCA
//! itself.
//!
//! ```
//! use tourlca::{lca::LcaEngine, tree::Node};
//!
//! let engine: LcaEngine<_> = LcaEngine::from_node(
//!     Node::new("A")
//!         .child(Node::new("B").child(Node::new("D")).child(Node::new("E")))
//!         .child(Node::new("C").child(Node::new("F"))),
//! )
//! .unwrap();
//!
//! assert_eq!(engine.query("D", "E"), Ok(&"B"));
//! assert_eq!(engine.query("D", "F"), Ok(&"A"));
//! assert_eq!(engine.distance("D", "F"), Ok(4));
//! ```

use std::{fmt::Debug, hash::Hash};

use indexmap::Equivalent;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    euler::EulerTour,
    level_ancestor::LevelAncestor,
    rmq::{NaiveTable, RangeMinimum, RmqError, SparseTable},
    tree::{LabeledTree, Node, TreeError, TreeNodeId},
};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LcaError {
    #[error("Unknown label: {0}")]
    UnknownLabel(String),
    #[error(transparent)]
    Tree(#[from] TreeError),
    #[error(transparent)]
    Rmq(#[from] RmqError),
}

/// LCA engine generic over the range-minimum strategy `R`.
#[derive(Debug, Clone)]
pub struct LcaEngine<L, R = SparseTable<usize>> {
    tree: LabeledTree<L>,
    tour: EulerTour,
    index: R,
    levels: LevelAncestor,
}

/// LCA engine backed by the quadratic table; only for small trees and cross-checking.
pub type NaiveLcaEngine<L> = LcaEngine<L, NaiveTable<usize>>;

impl<L, R: RangeMinimum<usize>> LcaEngine<L, R> {
    /// Builds the tour, the range-minimum index and the level-ancestor index for `tree`.
    ///
    /// Fails with [`TreeError::EmptyTree`] if the tree has no root.
    pub fn new(tree: LabeledTree<L>) -> Result<Self, LcaError> {
        let tour = EulerTour::build(&tree)?;
        let index = R::build(tour.depth_at_step());
        let levels = LevelAncestor::build(&tree)?;
        debug!(nodes = tree.len(), steps = tour.len(), "built lca engine");
        Ok(LcaEngine {
            tree,
            tour,
            index,
            levels,
        })
    }

    pub fn tree(&self) -> &LabeledTree<L> {
        &self.tree
    }

    pub fn tour(&self) -> &EulerTour {
        &self.tour
    }

    pub fn index(&self) -> &R {
        &self.index
    }

    pub fn level_ancestors(&self) -> &LevelAncestor {
        &self.levels
    }

    pub fn root(&self) -> TreeNodeId {
        self.tour.visit_order()[0]
    }

    fn first_occurrence(&self, node_id: TreeNodeId) -> Result<usize, LcaError> {
        self.tour
            .first_occurrence(node_id)
            .ok_or(LcaError::Tree(TreeError::InvalidNodeId(node_id)))
    }

    /// Lowest common ancestor of two nodes given by id.
    pub fn query_ids(&self, u: TreeNodeId, v: TreeNodeId) -> Result<TreeNodeId, LcaError> {
        let i = self.first_occurrence(u)?;
        let j = self.first_occurrence(v)?;
        let k = self.index.query_min_index(i.min(j), i.max(j))?;
        let lca = self.tour.visit_order()[k];
        trace!(%u, %v, %lca, "lca query");
        Ok(lca)
    }

    /// Number of edges on the path between two nodes given by id.
    pub fn distance_ids(&self, u: TreeNodeId, v: TreeNodeId) -> Result<usize, LcaError> {
        let lca = self.query_ids(u, v)?;
        Ok(self.tree.depth(u) + self.tree.depth(v) - 2 * self.tree.depth(lca))
    }
}

impl<L: Eq + Hash + Debug, R: RangeMinimum<usize>> LcaEngine<L, R> {
    pub fn from_node(root: Node<L>) -> Result<Self, LcaError> {
        Self::new(LabeledTree::from_node(root)?)
    }

    pub fn resolve<Q>(&self, label: &Q) -> Result<TreeNodeId, LcaError>
    where
        Q: ?Sized + Hash + Equivalent<L> + Debug,
    {
        self.tree
            .node_id(label)
            .ok_or_else(|| LcaError::UnknownLabel(format!("{label:?}")))
    }

    /// Label of the lowest common ancestor of `u` and `v`.
    ///
    /// Fails with [`LcaError::UnknownLabel`] if either label is not in the tree.
    pub fn query<Q>(&self, u: &Q, v: &Q) -> Result<&L, LcaError>
    where
        Q: ?Sized + Hash + Equivalent<L> + Debug,
    {
        let lca = self.query_ids(self.resolve(u)?, self.resolve(v)?)?;
        Ok(&self.tree[lca])
    }

    pub fn depth<Q>(&self, u: &Q) -> Result<usize, LcaError>
    where
        Q: ?Sized + Hash + Equivalent<L> + Debug,
    {
        Ok(self.tree.depth(self.resolve(u)?))
    }

    /// Number of edges on the path between `u` and `v`.
    pub fn distance<Q>(&self, u: &Q, v: &Q) -> Result<usize, LcaError>
    where
        Q: ?Sized + Hash + Equivalent<L> + Debug,
    {
        self.distance_ids(self.resolve(u)?, self.resolve(v)?)
    }

    /// Whether `ancestor` lies on the path from `descendant` to the root (a node is its own
    /// ancestor).
    pub fn is_ancestor<Q>(&self, ancestor: &Q, descendant: &Q) -> Result<bool, LcaError>
    where
        Q: ?Sized + Hash + Equivalent<L> + Debug,
    {
        let a = self.resolve(ancestor)?;
        Ok(self.query_ids(a, self.resolve(descendant)?)? == a)
    }

    /// Ancestor of `u` at `depth`; `None` if `u` is shallower than that.
    pub fn level_ancestor<Q>(&self, u: &Q, depth: usize) -> Result<Option<&L>, LcaError>
    where
        Q: ?Sized + Hash + Equivalent<L> + Debug,
    {
        let u = self.resolve(u)?;
        Ok(self.levels.query(u, depth).map(|a| &self.tree[a]))
    }
}

impl<L: Eq + Hash + Debug, R: RangeMinimum<usize>> TryFrom<LabeledTree<L>> for LcaEngine<L, R> {
    type Error = LcaError;
    fn try_from(tree: LabeledTree<L>) -> Result<Self, Self::Error> {
        LcaEngine::new(tree)
    }
}
