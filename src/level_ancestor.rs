//! Level-ancestor queries: "which ancestor of `u` sits at depth `d`?" in constant time.
//!
//! Preprocessing combines two classic structures:
//!
//! *   **Jump pointers**: every node stores its `2^k`-th ancestors, so one jump covers at least
//!     half of any distance.
//! *   **Ladders**: the tree is split into long paths (each node continues into its tallest child),
//!     and every path is extended upward by as many ancestors as it is long. A node reached by a
//!     `2^k` jump has a descendant `2^k` levels below it, so its path is longer than `2^k` and its
//!     ladder always covers the remaining distance.
//!
//! Build time and space are O(n log n); a query is one jump plus one ladder lookup.

use tracing::debug;

use crate::tree::{LabeledTree, ParentId, TreeError, TreeNodeId};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelAncestor {
    depth: Vec<usize>,
    /// `jumps[v][k]` is the `2^k`-th ancestor of `v`.
    jumps: Vec<Vec<TreeNodeId>>,
    /// Top to bottom.
    ladders: Vec<Vec<TreeNodeId>>,
    /// (ladder, position in that ladder) of the long path through each node.
    ladder_of: Vec<(usize, usize)>,
}

impl LevelAncestor {
    pub fn build<L>(tree: &LabeledTree<L>) -> Result<Self, TreeError> {
        let root = tree.root().ok_or(TreeError::EmptyTree)?;
        let n = tree.len();
        let order: Vec<TreeNodeId> = tree.iter_preorder(root).collect();

        // Height counted in nodes, so a leaf has height 1.
        let mut height = vec![1usize; n];
        let mut long_child: Vec<Option<TreeNodeId>> = vec![None; n];
        for &v in order.iter().rev() {
            for &c in tree.children(v) {
                if height[c.0] + 1 > height[v.0] {
                    height[v.0] = height[c.0] + 1;
                    long_child[v.0] = Some(c);
                }
            }
        }

        let mut ladders = Vec::new();
        let mut ladder_of = vec![(0, 0); n];
        for &head in &order {
            let is_head = match tree.parent(head) {
                ParentId::Root => true,
                ParentId::Node(p) => long_child[p.0] != Some(head),
            };
            if !is_head {
                continue;
            }

            let path: Vec<TreeNodeId> =
                std::iter::successors(Some(head), |v| long_child[v.0]).collect();
            let extension = path.len().min(tree.depth(head));

            let mut ladder: Vec<TreeNodeId> =
                tree.iter_ancestors(head).skip(1).take(extension).collect();
            ladder.reverse();
            for (i, &v) in path.iter().enumerate() {
                ladder_of[v.0] = (ladders.len(), extension + i);
            }
            ladder.extend(path);
            ladders.push(ladder);
        }

        // Pre-order guarantees the ancestors' rows are complete.
        let mut jumps: Vec<Vec<TreeNodeId>> = vec![Vec::new(); n];
        for &v in &order {
            let mut row = Vec::new();
            if let ParentId::Node(parent) = tree.parent(v) {
                row.push(parent);
                while let Some(&up) = jumps[row[row.len() - 1].0].get(row.len() - 1) {
                    row.push(up);
                }
            }
            jumps[v.0] = row;
        }

        debug!(nodes = n, ladders = ladders.len(), "built level ancestor index");
        Ok(LevelAncestor {
            depth: tree.iter_node_ids().map(|id| tree.depth(id)).collect(),
            jumps,
            ladders,
            ladder_of,
        })
    }

    pub fn depth(&self, node_id: TreeNodeId) -> Option<usize> {
        self.depth.get(node_id.0).copied()
    }

    /// The ancestor of `node_id` at `target_depth`.
    ///
    /// Returns `node_id` itself when it already sits at `target_depth`, and `None` when
    /// `target_depth` is deeper than the node or the id is not part of the tree.
    pub fn query(&self, node_id: TreeNodeId, target_depth: usize) -> Option<TreeNodeId> {
        let depth = self.depth(node_id)?;
        if target_depth > depth {
            return None;
        }
        let distance = depth - target_depth;
        if distance == 0 {
            return Some(node_id);
        }

        let k = distance.ilog2() as usize;
        let mid = self.jumps[node_id.0][k];
        let remaining = distance - (1 << k);

        let (ladder, position) = self.ladder_of[mid.0];
        Some(self.ladders[ladder][position - remaining])
    }

    /// The `distance`-th ancestor of `node_id`; `None` above the root.
    pub fn ancestor(&self, node_id: TreeNodeId, distance: usize) -> Option<TreeNodeId> {
        let depth = self.depth(node_id)?;
        self.query(node_id, depth.checked_sub(distance)?)
    }
}
