//! Reduction engine.
//!
//! A [`Reduction`] describes how to fold rows into a partial result and how
//! to merge two partial results. The same reduction is then driven by either
//! executor in [`executor`], so the arithmetic exists exactly once and only
//! the distribution of work differs between the parallel and sequential
//! paths.

use core::ops::Range;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::matrix::Matrix;

mod engine;
mod executor;

pub use engine::Engine;
pub use executor::{Executor, Parallel, Sequential};

/// A row-wise reduction over a [`Matrix`].
///
/// `merge` must be associative and commutative, and `identity` must be its
/// neutral element. Partials may then be merged in any order and any
/// grouping without changing the final value.
pub trait Reduction: Sync {
    type Output: Send;

    fn identity(&self) -> Self::Output;

    /// Fold row number `index` into `acc`.
    fn fold_row(&self, acc: Self::Output, index: usize, row: &[i32]) -> Self::Output;

    fn merge(&self, a: Self::Output, b: Self::Output) -> Self::Output;
}

/// Sum of a single row, widened so a row cannot overflow.
#[inline]
pub fn row_sum(row: &[i32]) -> i64 {
    row.iter().map(|&v| v as i64).sum()
}

/// Fold the rows in `range` into a single partial result.
///
/// This is the per-worker step of every executor; calling it over any
/// partition of `0..matrix.rows()` and merging the partials yields the same
/// value as one call over the whole range.
pub fn reduce_rows<R: Reduction + ?Sized>(
    reduction: &R,
    matrix: &Matrix,
    range: Range<usize>,
) -> R::Output {
    range.fold(reduction.identity(), |acc, i| {
        reduction.fold_row(acc, i, matrix.row(i))
    })
}

/// Split `0..rows` into at most `parts` contiguous, non-empty blocks of
/// `ceil(rows / parts)` rows each (the last block may be shorter).
///
/// `parts == 0` is treated as 1.
pub fn partition_rows(rows: usize, parts: usize) -> Vec<Range<usize>> {
    if rows == 0 {
        return Vec::new();
    }
    let parts = parts.max(1);
    let block = (rows + parts - 1) / parts;

    (0..rows)
        .step_by(block)
        .map(|start| start..core::cmp::min(start + block, rows))
        .collect()
}

/// Sum of every element.
#[derive(Clone, Copy, Debug, Default)]
pub struct TotalSum;

impl Reduction for TotalSum {
    type Output = i64;

    fn identity(&self) -> i64 {
        0
    }

    fn fold_row(&self, acc: i64, _index: usize, row: &[i32]) -> i64 {
        acc + row_sum(row)
    }

    fn merge(&self, a: i64, b: i64) -> i64 {
        a + b
    }
}

/// The row with the smallest row-sum.
///
/// `index` is `None` only when no row has been seen; `sum` is then
/// `i64::MAX`. Check the index, not the sum, to detect an empty matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinRow {
    pub index: Option<usize>,
    pub sum: i64,
}

impl MinRow {
    pub const NONE: MinRow = MinRow {
        index: None,
        sum: i64::MAX,
    };

    /// 0-based row index, or -1 when there is no row.
    pub fn index_or_sentinel(&self) -> i64 {
        self.index.map_or(-1, |i| i as i64)
    }

    /// Pick the better of two candidates: smaller sum, then smaller index.
    ///
    /// Ordering on `(sum, index)` is total, so the choice does not depend on
    /// argument order.
    pub fn min(self, other: MinRow) -> MinRow {
        match (self.index, other.index) {
            (None, _) => other,
            (_, None) => self,
            (Some(a), Some(b)) => {
                if (other.sum, b) < (self.sum, a) {
                    other
                } else {
                    self
                }
            }
        }
    }
}

impl Default for MinRow {
    fn default() -> Self {
        Self::NONE
    }
}

impl Serialize for MinRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("MinRow", 2)?;
        s.serialize_field("index", &self.index_or_sentinel())?;
        s.serialize_field("sum", &self.sum)?;
        s.end()
    }
}

/// Index and sum of the row with the smallest row-sum; ties go to the
/// lowest index.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinRowSum;

impl Reduction for MinRowSum {
    type Output = MinRow;

    fn identity(&self) -> MinRow {
        MinRow::NONE
    }

    fn fold_row(&self, acc: MinRow, index: usize, row: &[i32]) -> MinRow {
        let sum = row_sum(row);
        // Strict `<` keeps the first row among equal sums.
        if acc.index.is_none() || sum < acc.sum {
            MinRow {
                index: Some(index),
                sum,
            }
        } else {
            acc
        }
    }

    fn merge(&self, a: MinRow, b: MinRow) -> MinRow {
        a.min(b)
    }
}

/// Both reductions over one matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReductionResult {
    pub total_sum: i64,
    pub min_row: MinRow,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(rows: &[&[i32]]) -> Matrix {
        Matrix::from_rows(rows.iter().copied()).unwrap()
    }

    #[test]
    fn test_partition_covers_all_rows() {
        for rows in 0..40 {
            for parts in 0..12 {
                let blocks = partition_rows(rows, parts);
                assert!(blocks.len() <= parts.max(1));
                assert!(blocks.iter().all(|b| !b.is_empty()));

                let mut next = 0;
                for b in &blocks {
                    assert_eq!(b.start, next);
                    next = b.end;
                }
                assert_eq!(next, rows);
            }
        }
    }

    #[test]
    fn test_partition_block_sizes() {
        assert_eq!(partition_rows(10, 4), vec![0..3, 3..6, 6..9, 9..10]);
        assert_eq!(partition_rows(3, 8), vec![0..1, 1..2, 2..3]);
        assert!(partition_rows(0, 4).is_empty());
    }

    #[test]
    fn test_total_sum_rows() {
        let mat = m(&[&[1, 2], &[3, 4]]);
        assert_eq!(reduce_rows(&TotalSum, &mat, 0..2), 10);
        assert_eq!(reduce_rows(&TotalSum, &mat, 1..2), 7);
    }

    #[test]
    fn test_min_row_first_tie_wins() {
        let mat = m(&[&[9, 9], &[5, 5], &[1, 9], &[5, 5]]);
        let min = reduce_rows(&MinRowSum, &mat, 0..4);
        assert_eq!(
            min,
            MinRow {
                index: Some(1),
                sum: 10
            }
        );
    }

    #[test]
    fn test_min_row_merge_is_order_independent() {
        let a = MinRow {
            index: Some(2),
            sum: 10,
        };
        let b = MinRow {
            index: Some(7),
            sum: 10,
        };
        let c = MinRow {
            index: Some(9),
            sum: 4,
        };

        assert_eq!(a.min(b), b.min(a));
        assert_eq!(a.min(b).index, Some(2));
        assert_eq!(a.min(c), c);
        assert_eq!(MinRow::NONE.min(a), a);
        assert_eq!(a.min(MinRow::NONE), a);
    }

    #[test]
    fn test_min_row_sentinel() {
        assert_eq!(MinRow::NONE.index_or_sentinel(), -1);
        assert_eq!(MinRow::NONE.sum, i64::MAX);
        let found = MinRow {
            index: Some(3),
            sum: 1,
        };
        assert_eq!(found.index_or_sentinel(), 3);
    }

    #[test]
    fn test_zero_column_rows() {
        let mat = Matrix::from_rows(vec![Vec::<i32>::new(); 3]).unwrap();
        assert_eq!(reduce_rows(&TotalSum, &mat, 0..3), 0);
        assert_eq!(
            reduce_rows(&MinRowSum, &mat, 0..3),
            MinRow {
                index: Some(0),
                sum: 0
            }
        );
    }
}
