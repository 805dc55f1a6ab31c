use tracing::debug;

use super::{check_range, leftmost_min, RangeMinimum, RmqError};

/// Sparse table: `levels[k][i]` is the position of the minimum of `values[i..i + 2^k]`.
///
/// A query over `[i, j]` covers the range with the two (possibly overlapping) blocks of length
/// `2^k <= j - i + 1` starting at `i` and ending at `j`. Both blocks resolve ties to their
/// leftmost position and the left block wins a tie between them, so the answer is always the
/// smallest index holding the minimum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseTable<T> {
    values: Vec<T>,
    levels: Vec<Vec<usize>>,
}

impl<T> SparseTable<T> {
    /// Number of power-of-two block sizes stored.
    pub fn n_levels(&self) -> usize {
        self.levels.len()
    }
}

impl<T: Ord + Copy> RangeMinimum<T> for SparseTable<T> {
    fn build(values: &[T]) -> Self {
        let n = values.len();
        let mut levels: Vec<Vec<usize>> = Vec::new();
        if n > 0 {
            levels.push((0..n).collect());
        }

        let mut half = 1;
        while 2 * half <= n {
            let prev = &levels[levels.len() - 1];
            let next = (0..=n - 2 * half)
                .map(|i| leftmost_min(values, prev[i], prev[i + half]))
                .collect();
            levels.push(next);
            half *= 2;
        }

        debug!(len = n, levels = levels.len(), "built sparse range-minimum table");
        SparseTable {
            values: values.to_vec(),
            levels,
        }
    }

    fn values(&self) -> &[T] {
        &self.values
    }

    fn query_min_index(&self, i: usize, j: usize) -> Result<usize, RmqError> {
        check_range(i, j, self.values.len())?;
        let k = (j - i + 1).ilog2() as usize;
        let level = &self.levels[k];
        Ok(leftmost_min(&self.values, level[i], level[j + 1 - (1 << k)]))
    }
}
