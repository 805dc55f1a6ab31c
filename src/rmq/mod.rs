//! Range-minimum-query indexes.
//!
//! Both strategies answer [`RangeMinimum::query_min_index`] for an inclusive range `[i, j]` with
//! the *smallest* index holding the minimum, so they are interchangeable:
//!
//! *   [`SparseTable`]: O(n log n) build, O(1) query. The default for [`crate::lca::LcaEngine`].
//! *   [`NaiveTable`]: O(n²) build time and space, O(1) query. Only usable for small inputs; kept as
//!     a baseline and as the oracle the sparse table is tested against.

use thiserror::Error;

pub use naive::NaiveTable;
pub use sparse::SparseTable;

pub mod naive;
pub mod sparse;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RmqError {
    #[error("Invalid range [{i}, {j}] for a sequence of length {len}")]
    Range { i: usize, j: usize, len: usize },
}

/// An index over an immutable sequence answering range-minimum queries.
pub trait RangeMinimum<T: Ord + Copy>: Sized {
    /// Preprocesses `values`. The index keeps its own copy of the sequence.
    fn build(values: &[T]) -> Self;

    /// The sequence the index was built from.
    fn values(&self) -> &[T];

    /// Index `k` in `[i, j]` minimising `values[k]`, the smallest such `k` on ties.
    ///
    /// Fails with [`RmqError::Range`] if `i > j` or `j` is out of bounds.
    fn query_min_index(&self, i: usize, j: usize) -> Result<usize, RmqError>;

    fn query_min(&self, i: usize, j: usize) -> Result<T, RmqError> {
        let k = self.query_min_index(i, j)?;
        Ok(self.values()[k])
    }

    fn len(&self) -> usize {
        self.values().len()
    }

    fn is_empty(&self) -> bool {
        self.values().is_empty()
    }
}

pub(crate) fn check_range(i: usize, j: usize, len: usize) -> Result<(), RmqError> {
    if i > j || j >= len {
        return Err(RmqError::Range { i, j, len });
    }
    Ok(())
}

/// Of two candidate indices `a < b`, the one holding the smaller value; `a` on ties.
#[inline]
pub(crate) fn leftmost_min<T: Ord>(values: &[T], a: usize, b: usize) -> usize {
    if values[b] < values[a] {
        b
    } else {
        a
    }
}
