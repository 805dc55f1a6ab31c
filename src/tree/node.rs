use std::{
    fmt::{self, Debug, Display},
    ops::{Deref, DerefMut},
};

/// Owned, nested specification of a tree: a label and its ordered child subtrees.
///
/// This is the form trees are written in before they are converted into a
/// [`LabeledTree`](super::LabeledTree). Its `Display` implementation writes the bracket notation
/// read by [`parse_tree`](crate::parser::parse_tree), e.g. `A(B(D,E),C(F))`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node<L> {
    pub label: L,
    pub children: Children<L>,
}

/// Ordered child subtrees of a [`Node`]. Dereferences to `Vec<Node<L>>`.
///
/// Dropping releases the whole subtree with an explicit stack, so arbitrarily deep trees can be
/// discarded (including on a construction error) without exhausting the call stack.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Children<L>(Vec<Node<L>>);

impl<L> Children<L> {
    pub fn into_vec(mut self) -> Vec<Node<L>> {
        std::mem::take(&mut self.0)
    }
}

impl<L> Default for Children<L> {
    fn default() -> Self {
        Children(Vec::new())
    }
}

impl<L> Deref for Children<L> {
    type Target = Vec<Node<L>>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<L> DerefMut for Children<L> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<L> From<Vec<Node<L>>> for Children<L> {
    fn from(nodes: Vec<Node<L>>) -> Self {
        Children(nodes)
    }
}

impl<L> FromIterator<Node<L>> for Children<L> {
    fn from_iter<I: IntoIterator<Item = Node<L>>>(iter: I) -> Self {
        Children(iter.into_iter().collect())
    }
}

impl<L: Debug> Debug for Children<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<L> Drop for Children<L> {
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.0);
        // Each popped node goes out of scope with an empty child list.
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children.0);
        }
    }
}

impl<L> Node<L> {
    pub fn new(label: L) -> Self {
        Node {
            label,
            children: Children::default(),
        }
    }

    pub fn with_children(label: L, children: impl IntoIterator<Item = Node<L>>) -> Self {
        Node {
            label,
            children: children.into_iter().collect(),
        }
    }

    /// Builder-style: appends `child` and returns `self`.
    pub fn child(mut self, child: Node<L>) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: Node<L>) {
        self.children.push(child);
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Total number of nodes in this subtree.
    pub fn n_nodes(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

impl<L> From<L> for Node<L> {
    fn from(label: L) -> Self {
        Node::new(label)
    }
}

impl<L: Display> Display for Node<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        let mut stack: Vec<(&Node<L>, usize)> = vec![(self, 0)];

        while let Some(top) = stack.last_mut() {
            let (node, next) = *top;
            if let Some(child) = node.children.get(next) {
                top.1 += 1;
                f.write_str(if next == 0 { "(" } else { "," })?;
                write!(f, "{}", child.label)?;
                stack.push((child, 0));
            } else {
                if !node.is_leaf() {
                    f.write_str(")")?;
                }
                stack.pop();
            }
        }
        Ok(())
    }
}
