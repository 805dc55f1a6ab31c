use tracing::{debug, warn};

use super::{check_range, leftmost_min, RangeMinimum, RmqError};

/// Above this many values the quadratic table is large enough to be worth a warning.
pub const NAIVE_WARN_LEN: usize = 4096;

/// Precomputed answer for every pair `i <= j`.
///
/// Row `i` holds the answers for `[i, i]`, `[i, i + 1]`, ..., `[i, n - 1]`, each obtained from
/// the previous one by comparing a single new value. This needs O(n²) time and memory and does
/// not scale past a few thousand values; use [`super::SparseTable`] for anything real.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NaiveTable<T> {
    values: Vec<T>,
    rows: Vec<Vec<usize>>,
}

impl<T: Ord + Copy> RangeMinimum<T> for NaiveTable<T> {
    fn build(values: &[T]) -> Self {
        let n = values.len();
        if n > NAIVE_WARN_LEN {
            warn!(len = n, "building a quadratic range-minimum table");
        }

        let rows = (0..n)
            .map(|i| {
                let mut row = Vec::with_capacity(n - i);
                let mut best = i;
                row.push(best);
                for j in i + 1..n {
                    best = leftmost_min(values, best, j);
                    row.push(best);
                }
                row
            })
            .collect();

        debug!(len = n, "built naive range-minimum table");
        NaiveTable {
            values: values.to_vec(),
            rows,
        }
    }

    fn values(&self) -> &[T] {
        &self.values
    }

    fn query_min_index(&self, i: usize, j: usize) -> Result<usize, RmqError> {
        check_range(i, j, self.values.len())?;
        Ok(self.rows[i][j - i])
    }
}
