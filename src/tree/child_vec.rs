use std::ops::Index;

use super::TreeNodeId;

/// Link from a node to its parent.
#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParentId {
    Root,
    Node(TreeNodeId),
}

impl ParentId {
    pub fn is_root(&self) -> bool {
        match self {
            ParentId::Root => true,
            ParentId::Node(_) => false,
        }
    }

    pub fn is_node(&self) -> bool {
        !self.is_root()
    }

    pub fn node(&self) -> Option<TreeNodeId> {
        match self {
            ParentId::Root => None,
            ParentId::Node(n) => Some(*n),
        }
    }
}

/// A node in the ChildVecStore: its parent link, its depth and an ordered vector of children.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CVNode {
    pub parent: ParentId,
    pub depth: usize,
    pub children: Vec<TreeNodeId>,
}

impl CVNode {
    pub fn root() -> Self {
        CVNode {
            parent: ParentId::Root,
            depth: 0,
            children: Vec::new(),
        }
    }

    pub fn child(parent: TreeNodeId, depth: usize) -> Self {
        CVNode {
            parent: ParentId::Node(parent),
            depth,
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena storage for the tree topology. Nodes only ever get appended.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChildVecStore {
    pub(crate) nodes: Vec<CVNode>,
}

impl Index<&TreeNodeId> for ChildVecStore {
    type Output = ParentId;
    fn index(&self, index: &TreeNodeId) -> &Self::Output {
        &self.nodes[index.0].parent
    }
}

impl Index<TreeNodeId> for ChildVecStore {
    type Output = CVNode;
    fn index(&self, index: TreeNodeId) -> &Self::Output {
        &self.nodes[index.0]
    }
}

impl FromIterator<CVNode> for ChildVecStore {
    fn from_iter<I: IntoIterator<Item = CVNode>>(iter: I) -> Self {
        ChildVecStore {
            nodes: iter.into_iter().collect(),
        }
    }
}

impl ChildVecStore {
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn iter_node_id(&self) -> impl Iterator<Item = TreeNodeId> + '_ {
        (0..self.nodes.len()).map(TreeNodeId)
    }

    pub fn add_root(&mut self) -> TreeNodeId {
        let node_id = TreeNodeId(self.nodes.len());
        self.nodes.push(CVNode::root());
        node_id
    }

    /// Adds a new child node as the *last* child of the parent.
    pub fn add_child(&mut self, parent: TreeNodeId) -> TreeNodeId {
        let node_id = TreeNodeId(self.nodes.len());
        let depth = self.nodes[parent.0].depth + 1;
        self.nodes.push(CVNode::child(parent, depth));
        // Add this child to its parent's list.
        self.nodes[parent.0].children.push(node_id);
        node_id
    }

    pub fn children(&self, node_id: TreeNodeId) -> &[TreeNodeId] {
        &self.nodes[node_id.0].children
    }

    pub fn iter_leaves(&self) -> impl Iterator<Item = TreeNodeId> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, node)| {
            if node.is_leaf() {
                Some(TreeNodeId(i))
            } else {
                None
            }
        })
    }
}
