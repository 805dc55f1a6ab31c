//! # tourlca
//!
//! Lowest-common-ancestor queries on static rooted trees, answered by reducing them to
//! range-minimum queries over an Euler tour.
//!
//! A tree is built once ([`tree::LabeledTree`], or parsed from bracket notation with
//! [`parser::parse_tree`]) and handed to an [`lca::LcaEngine`], which derives:
//!
//! - the [`euler::EulerTour`] of the tree,
//! - a range-minimum index over the tour's depth sequence ([`rmq::SparseTable`] by default, or
//!   the quadratic [`rmq::NaiveTable`]),
//! - a [`level_ancestor::LevelAncestor`] index for "ancestor at depth `d`" queries.
//!
//! All structures are immutable after construction and every query takes `&self`.

pub mod euler;
pub mod lca;
pub mod level_ancestor;
pub mod parser;
pub mod rmq;
pub mod tree;

pub use lca::{LcaEngine, LcaError, NaiveLcaEngine};
pub use parser::{parse_tree, ParseError};
pub use tree::{LabeledTree, Node, TreeError, TreeNodeId};
