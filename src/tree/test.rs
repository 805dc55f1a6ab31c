use proptest::{prelude::*, sample::Index};
use rand::{rngs::SmallRng, Rng, SeedableRng};

use super::{LabeledTree, Node, ParentId, TreeError, TreeNodeId};

/// A has children B, C; B has children D, E; C has child F.
pub(crate) fn sample_tree() -> LabeledTree<&'static str> {
    LabeledTree::from_node(
        Node::new("A")
            .child(Node::with_children("B", ["D", "E"].map(Node::new)))
            .child(Node::new("C").child(Node::new("F"))),
    )
    .unwrap()
}

/// Label of the `i`-th node added by the random tree builders below.
pub(crate) fn label_of(i: usize) -> u32 {
    1_000_000 - i as u32
}

/// Tree where node `i + 1` hangs below `parents[i]`, which must be `<= i`.
pub(crate) fn tree_from_parents(parents: &[usize]) -> LabeledTree<u32> {
    let mut tree = LabeledTree::new();
    tree.add_root(label_of(0)).unwrap();
    for (i, &p) in parents.iter().enumerate() {
        tree.add_child(TreeNodeId(p), label_of(i + 1)).unwrap();
    }
    tree
}

/// Seeded random recursive tree with `n >= 1` nodes.
pub(crate) fn random_tree(n: usize, seed: u64) -> LabeledTree<u32> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let parents: Vec<usize> = (1..n).map(|i| rng.gen_range(0..i)).collect();
    tree_from_parents(&parents)
}

/// Random trees with between 1 and `max_nodes` nodes.
pub(crate) fn arb_tree(max_nodes: usize) -> impl Strategy<Value = LabeledTree<u32>> {
    proptest::collection::vec(any::<Index>(), 0..max_nodes).prop_map(|picks| {
        let parents: Vec<usize> = picks
            .iter()
            .enumerate()
            .map(|(i, pick)| pick.index(i + 1))
            .collect();
        tree_from_parents(&parents)
    })
}

#[test]
fn from_node_assigns_preorder_ids() {
    let tree = sample_tree();

    assert_eq!(tree.len(), 6);
    assert_eq!(tree.root(), Some(TreeNodeId(0)));
    assert_eq!(
        tree.iter_labels().copied().collect::<Vec<_>>(),
        vec!["A", "B", "D", "E", "C", "F"]
    );
    for (i, label) in ["A", "B", "D", "E", "C", "F"].iter().enumerate() {
        assert_eq!(tree.node_id(label), Some(TreeNodeId(i)));
    }
    assert_eq!(tree.node_id("Z"), None);
}

#[test]
fn structure_queries() {
    let tree = sample_tree();
    let b = tree.node_id("B").unwrap();
    let c = tree.node_id("C").unwrap();
    let f = tree.node_id("F").unwrap();

    assert_eq!(
        tree.children(b)
            .iter()
            .map(|&id| tree[id])
            .collect::<Vec<_>>(),
        vec!["D", "E"]
    );
    assert_eq!(tree.parent(f), ParentId::Node(c));
    assert_eq!(tree.parent(TreeNodeId(0)), ParentId::Root);
    assert_eq!(tree.depth(f), 2);
    assert_eq!(
        tree.iter_ancestors(f).map(|id| tree[id]).collect::<Vec<_>>(),
        vec!["F", "C", "A"]
    );
    assert_eq!(
        tree.iter_preorder(b).map(|id| tree[id]).collect::<Vec<_>>(),
        vec!["B", "D", "E"]
    );
    assert_eq!(
        tree.iter_leaves().map(|id| tree[id]).collect::<Vec<_>>(),
        vec!["D", "E", "F"]
    );
    assert_eq!(tree.label(TreeNodeId(6)), None);
}

#[test]
fn duplicate_labels_are_rejected() {
    let err = LabeledTree::from_node(Node::new("A").child(Node::new("B").child(Node::new("A"))))
        .unwrap_err();
    assert_eq!(err, TreeError::DuplicateLabel("\"A\"".into()));

    let mut tree = LabeledTree::new();
    let root = tree.add_root(1).unwrap();
    tree.add_child(root, 2).unwrap();
    assert_eq!(
        tree.add_child(root, 2),
        Err(TreeError::DuplicateLabel("2".into()))
    );
    // The failed insertion leaves the tree untouched.
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.children(root).len(), 1);
}

#[test]
fn duplicate_above_a_deep_chain_is_reported() {
    let mut chain = Node::new(0u32);
    for i in 1..100_000 {
        chain = Node::new(i).child(chain);
    }
    // The duplicate is hit at the third node; the rest of the chain is dropped unconsumed.
    let root = Node::new(99_999).child(Node::new(100_000).child(chain));

    assert_eq!(
        LabeledTree::from_node(root).unwrap_err(),
        TreeError::DuplicateLabel("99999".into())
    );
}

#[test]
fn label_membership_and_parent_links() {
    let tree = sample_tree();
    let d = tree.node_id("D").unwrap();

    assert!(tree.contains_label("D"));
    assert!(!tree.contains_label("Z"));
    assert!(tree.parent(d).is_node());
    assert_eq!(tree.parent(d).node(), tree.node_id("B"));
    assert!(tree.parent(TreeNodeId(0)).is_root());
    assert_eq!(tree.parent(TreeNodeId(0)).node(), None);
    assert!(!tree.contains(TreeNodeId(6)));
}

#[test]
#[should_panic]
fn structural_access_with_foreign_id_panics() {
    let tree = sample_tree();
    tree.depth(TreeNodeId(6));
}

#[test]
fn incremental_construction_errors() {
    let mut tree = LabeledTree::new();
    assert_eq!(
        tree.add_child(TreeNodeId(0), "x"),
        Err(TreeError::InvalidNodeId(TreeNodeId(0)))
    );
    let root = tree.add_root("r").unwrap();
    assert_eq!(tree.add_root("s"), Err(TreeError::RootExists));
    assert_eq!(
        tree.add_child(TreeNodeId(5), "x"),
        Err(TreeError::InvalidNodeId(TreeNodeId(5)))
    );
    assert_eq!(tree.add_child(root, "x"), Ok(TreeNodeId(1)));
}

#[test]
fn from_edges_in_any_order() {
    let tree = LabeledTree::from_edges(
        "A",
        [("C", "F"), ("B", "D"), ("A", "B"), ("B", "E"), ("A", "C")],
    )
    .unwrap();

    assert_eq!(tree.len(), 6);
    assert_eq!(tree[tree.root().unwrap()], "A");
    let b = tree.node_id("B").unwrap();
    assert_eq!(
        tree.children(b)
            .iter()
            .map(|&id| tree[id])
            .collect::<Vec<_>>(),
        vec!["D", "E"]
    );
    assert_eq!(tree.depth(tree.node_id("F").unwrap()), 2);
    assert_eq!(
        tree.draw(),
        sample_tree().draw(),
        "same shape as the node specification"
    );
}

#[test]
fn from_edges_errors() {
    assert_eq!(
        LabeledTree::from_edges(0, [(0, 1), (0, 2), (1, 2)]).unwrap_err(),
        TreeError::DuplicateLabel("2".into())
    );
    assert_eq!(
        LabeledTree::from_edges(0, [(0, 1), (1, 0)]).unwrap_err(),
        TreeError::DuplicateLabel("0".into())
    );
    assert_eq!(
        LabeledTree::from_edges(0, [(0, 1), (5, 6), (6, 5)]).unwrap_err(),
        TreeError::Unreachable(2)
    );
}

#[test]
fn draw() {
    let expected = "\
A
├── B
│   ├── D
│   └── E
└── C
    └── F
";
    similar_asserts::assert_eq!(sample_tree().draw(), expected);
    assert_eq!(LabeledTree::<u8>::new().draw(), "");

    let annotated = sample_tree().debug_draw(|id, label| format!("{id}:{label}"));
    assert_eq!(annotated.lines().last(), Some("    └── 5:F"));
}

#[test]
fn deep_path_does_not_recurse() {
    let parents: Vec<usize> = (0..200_000).collect();
    let tree = tree_from_parents(&parents);
    let last = TreeNodeId(200_000);

    assert_eq!(tree.depth(last), 200_000);
    assert_eq!(tree.iter_preorder(TreeNodeId(0)).count(), 200_001);
    assert_eq!(tree.iter_ancestors(last).count(), 200_001);
}

proptest! {
    #[test]
    fn depth_is_distance_to_root(tree in arb_tree(64)) {
        for id in tree.iter_node_ids() {
            prop_assert_eq!(tree.depth(id) + 1, tree.iter_ancestors(id).count());
        }
    }

    #[test]
    fn preorder_visits_every_node_once(tree in arb_tree(64)) {
        let mut seen: Vec<TreeNodeId> = tree.iter_preorder(TreeNodeId(0)).collect();
        prop_assert_eq!(seen.len(), tree.len());
        seen.sort();
        seen.dedup();
        prop_assert_eq!(seen.len(), tree.len());
    }
}
