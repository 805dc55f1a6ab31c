//! Euler tour of a [`LabeledTree`]: the reduction from ancestor queries to range-minimum queries.
//!
//! The tour records a step every time the depth-first walk is *at* a node: once on entry, and once
//! more after returning from each of its children. For a tree with `n` nodes this gives `2n - 1`
//! steps. Between the first occurrences of two nodes the walk passes through their lowest common
//! ancestor and through no shallower node, which is what [`crate::lca::LcaEngine`] relies on.

use std::hash::Hash;

use indexmap::Equivalent;
use tracing::debug;

use crate::tree::{LabeledTree, TreeError, TreeNodeId};

const UNVISITED: usize = usize::MAX;

/// The three parallel sequences produced by one depth-first pass over a tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerTour {
    /// Node that is current at each step.
    visit_order: Vec<TreeNodeId>,
    /// Depth of `visit_order[step]`.
    depth_at_step: Vec<usize>,
    /// Indexed by node: first step at which it appears.
    first_occurrence: Vec<usize>,
}

impl EulerTour {
    /// Walks `tree` from its root. Children are visited in their stored order.
    pub fn build<L>(tree: &LabeledTree<L>) -> Result<Self, TreeError> {
        let root = tree.root().ok_or(TreeError::EmptyTree)?;
        let n = tree.len();
        let mut tour = EulerTour {
            visit_order: Vec::with_capacity(2 * n - 1),
            depth_at_step: Vec::with_capacity(2 * n - 1),
            first_occurrence: vec![UNVISITED; n],
        };

        // (node, index of the next child to descend into); the stack height is the depth + 1
        let mut stack = vec![(root, 0usize)];
        tour.record(root, 0);

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            if let Some(&child) = tree.children(node).get(next) {
                top.1 += 1;
                tour.record(child, stack.len());
                stack.push((child, 0));
            } else {
                stack.pop();
                if let Some(&(parent, _)) = stack.last() {
                    tour.record(parent, stack.len() - 1);
                }
            }
        }

        debug_assert!(tour.first_occurrence.iter().all(|&s| s != UNVISITED));
        debug!(nodes = n, steps = tour.len(), "built euler tour");
        Ok(tour)
    }

    fn record(&mut self, node: TreeNodeId, depth: usize) {
        let step = self.visit_order.len();
        self.visit_order.push(node);
        self.depth_at_step.push(depth);
        if self.first_occurrence[node.0] == UNVISITED {
            self.first_occurrence[node.0] = step;
        }
    }

    /// Number of steps, `2n - 1`.
    pub fn len(&self) -> usize {
        self.visit_order.len()
    }

    /// Never true for a tour built by [`EulerTour::build`].
    pub fn is_empty(&self) -> bool {
        self.visit_order.is_empty()
    }

    pub fn visit_order(&self) -> &[TreeNodeId] {
        &self.visit_order
    }

    pub fn depth_at_step(&self) -> &[usize] {
        &self.depth_at_step
    }

    pub fn node_at(&self, step: usize) -> Option<TreeNodeId> {
        self.visit_order.get(step).copied()
    }

    /// First step at which `node_id` is visited, `None` for ids outside the tree.
    pub fn first_occurrence(&self, node_id: TreeNodeId) -> Option<usize> {
        self.first_occurrence.get(node_id.0).copied()
    }

    /// First occurrences of all nodes, indexed by node id.
    pub fn first_occurrences(&self) -> &[usize] {
        &self.first_occurrence
    }

    pub fn first_occurrence_of<L, Q>(&self, tree: &LabeledTree<L>, label: &Q) -> Option<usize>
    where
        L: Eq + Hash,
        Q: ?Sized + Hash + Equivalent<L>,
    {
        self.first_occurrence(tree.node_id(label)?)
    }

    /// The visit order resolved to labels of the tree the tour was built from.
    pub fn labels<'a, L>(&'a self, tree: &'a LabeledTree<L>) -> impl Iterator<Item = &'a L> + 'a {
        self.visit_order.iter().map(move |&id| &tree[id])
    }
}

#[cfg(test)]
mod test {
    use ahash::AHashMap;
    use proptest::prelude::*;

    use super::EulerTour;
    use crate::tree::{
        test::{arb_tree, sample_tree},
        LabeledTree, Node, TreeError, TreeNodeId,
    };

    #[test]
    fn sample_tour() {
        let tree = sample_tree();
        let tour = EulerTour::build(&tree).unwrap();

        similar_asserts::assert_eq!(
            tour.labels(&tree).copied().collect::<Vec<_>>(),
            vec!["A", "B", "D", "B", "E", "B", "A", "C", "F", "C", "A"]
        );
        similar_asserts::assert_eq!(
            tour.depth_at_step().to_vec(),
            vec![0, 1, 2, 1, 2, 1, 0, 1, 2, 1, 0]
        );

        let first: AHashMap<&str, usize> = tree
            .iter_node_ids()
            .map(|id| (tree[id], tour.first_occurrence(id).unwrap()))
            .collect();
        let expected: AHashMap<&str, usize> = [
            ("A", 0),
            ("B", 1),
            ("C", 7),
            ("D", 2),
            ("E", 4),
            ("F", 8),
        ]
        .into_iter()
        .collect();
        assert_eq!(first, expected);
        assert_eq!(tour.first_occurrence_of(&tree, "E"), Some(4));
        assert_eq!(tour.first_occurrence_of(&tree, "Z"), None);
        assert_eq!(tour.node_at(7), tree.node_id("C"));
        assert_eq!(tour.node_at(10), tree.root());
        assert_eq!(tour.node_at(11), None);
    }

    #[test]
    fn single_node() {
        let tree = LabeledTree::from_node(Node::new('x')).unwrap();
        let tour = EulerTour::build(&tree).unwrap();

        assert_eq!(tour.len(), 1);
        assert_eq!(tour.visit_order(), &[TreeNodeId(0)]);
        assert_eq!(tour.depth_at_step(), &[0]);
        assert_eq!(tour.first_occurrence(TreeNodeId(0)), Some(0));
        assert_eq!(tour.first_occurrence(TreeNodeId(1)), None);
    }

    #[test]
    fn empty_tree() {
        let tree = LabeledTree::<u8>::new();
        assert_eq!(EulerTour::build(&tree), Err(TreeError::EmptyTree));
    }

    #[test]
    fn path_goes_down_and_back_up() {
        let tree =
            LabeledTree::from_node(Node::new(0).child(Node::new(1).child(Node::new(2)))).unwrap();
        let tour = EulerTour::build(&tree).unwrap();

        assert_eq!(tour.labels(&tree).copied().collect::<Vec<_>>(), vec![0, 1, 2, 1, 0]);
        assert_eq!(tour.depth_at_step(), &[0, 1, 2, 1, 0]);
    }

    proptest! {
        #[test]
        fn tour_invariants(tree in arb_tree(80)) {
            let tour = EulerTour::build(&tree).unwrap();
            let n = tree.len();
            let root = tree.root().unwrap();

            prop_assert_eq!(tour.len(), 2 * n - 1);
            prop_assert_eq!(tour.depth_at_step().len(), 2 * n - 1);
            prop_assert_eq!(tour.visit_order()[0], root);
            prop_assert_eq!(tour.visit_order()[tour.len() - 1], root);

            for pair in tour.depth_at_step().windows(2) {
                prop_assert_eq!(pair[0].abs_diff(pair[1]), 1);
            }

            for id in tree.iter_node_ids() {
                let first = tour.first_occurrence(id).unwrap();
                prop_assert_eq!(tour.visit_order()[first], id);
                prop_assert_eq!(tour.depth_at_step()[first], tree.depth(id));
                prop_assert!(!tour.visit_order()[..first].contains(&id));
            }

            for (step, &id) in tour.visit_order().iter().enumerate() {
                prop_assert_eq!(tour.depth_at_step()[step], tree.depth(id));
            }
        }
    }
}
