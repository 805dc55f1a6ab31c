//! Iterators over a [`ChildVecStore`], shared by [`super::LabeledTree`] and the query structures.

use super::{child_vec::ChildVecStore, ParentId, TreeNodeId};

// --- Ancestors Iterator ---

/// An iterator that traverses upwards from a starting node to its root.
#[derive(Clone)]
pub struct AncestorsIter<'a> {
    store: &'a ChildVecStore,
    /// The next node ID to yield. `None` when the root has been yielded.
    current: Option<TreeNodeId>,
}

impl<'a> AncestorsIter<'a> {
    pub fn new(store: &'a ChildVecStore, start_node: TreeNodeId) -> Self {
        AncestorsIter {
            store,
            current: Some(start_node),
        }
    }
}

impl Iterator for AncestorsIter<'_> {
    type Item = TreeNodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node_to_return = self.current?;
        self.current = match self.store[&node_to_return] {
            ParentId::Root => None,
            ParentId::Node(parent_id) => Some(parent_id),
        };
        Some(node_to_return)
    }
}

// --- Preorder Iterator ---

/// A pre-order DFS iterator state.
#[derive(Clone)]
pub struct PreorderIter<'a> {
    store: &'a ChildVecStore,
    /// Stack for DFS traversal. Stores nodes to visit.
    stack: Vec<TreeNodeId>,
}

impl<'a> PreorderIter<'a> {
    pub fn new(store: &'a ChildVecStore, start: TreeNodeId) -> Self {
        PreorderIter {
            store,
            stack: vec![start],
        }
    }
}

impl Iterator for PreorderIter<'_> {
    type Item = TreeNodeId;
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;

        // Push children in reverse order so the first child is processed next
        self.stack
            .extend(self.store.children(node).iter().rev().copied());

        Some(node)
    }
}
