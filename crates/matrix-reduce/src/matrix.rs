//! Rectangular row-major integer matrix and its random generator.

use core::fmt;
use core::ops::RangeInclusive;

use rand::Rng;

use crate::error::{Error, Result};

/// Every generated element is drawn uniformly from this range.
pub const ELEMENT_RANGE: RangeInclusive<i32> = 1..=100;

/// Matrix stored as one contiguous row-major buffer.
///
/// Dimensions are fixed at construction and the contents are never mutated
/// afterwards, so any number of workers may read disjoint rows concurrently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<i32>,
}

impl Matrix {
    /// Generate a `rows x cols` matrix from a non-deterministically seeded RNG.
    pub fn random(rows: usize, cols: usize) -> Result<Self> {
        Self::random_with(rows, cols, &mut rand::thread_rng())
    }

    /// Generate a `rows x cols` matrix, drawing every element from `rng`.
    pub fn random_with<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Result<Self> {
        let len = element_count(rows, cols)?;
        let data = (0..len).map(|_| rng.gen_range(ELEMENT_RANGE)).collect();
        Ok(Self { rows, cols, data })
    }

    /// Build a matrix from explicit rows. All rows must have the same length.
    pub fn from_rows<I, R>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[i32]>,
    {
        let mut data = Vec::new();
        let mut cols = None;
        let mut count = 0;

        for (i, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            let expected = *cols.get_or_insert(row.len());
            if row.len() != expected {
                return Err(Error::RaggedRows {
                    row: i,
                    expected,
                    found: row.len(),
                });
            }
            data.extend_from_slice(row);
            count += 1;
        }

        Ok(Self {
            rows: count,
            cols: cols.unwrap_or(0),
            data,
        })
    }

    /// An `rows x cols` matrix with every element set to `value`.
    pub fn filled(rows: usize, cols: usize, value: i32) -> Result<Self> {
        let len = element_count(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![value; len],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Row `i`. Panics if `i >= self.rows()`.
    #[inline]
    pub fn row(&self, i: usize) -> &[i32] {
        assert!(i < self.rows, "row {} out of bounds ({} rows)", i, self.rows);
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    /// Iterate over rows in order.
    ///
    /// A matrix with rows but zero columns still yields `rows` empty slices.
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[i32]> + '_ {
        (0..self.rows).map(move |i| self.row(i))
    }
}

fn element_count(rows: usize, cols: usize) -> Result<usize> {
    rows.checked_mul(cols).ok_or(Error::TooLarge { rows, cols })
}

/// Renders the matrix the way the demo prints it: each value followed by a
/// tab, one row per line.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for val in row {
                write!(f, "{}\t", val)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_random_dimensions_and_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let m = Matrix::random_with(13, 9, &mut rng).unwrap();

        assert_eq!(m.rows(), 13);
        assert_eq!(m.cols(), 9);
        assert_eq!(m.iter_rows().count(), 13);
        for row in m.iter_rows() {
            assert_eq!(row.len(), 9);
            assert!(row.iter().all(|v| ELEMENT_RANGE.contains(v)));
        }
    }

    #[test]
    fn test_random_uses_whole_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let m = Matrix::random_with(100, 100, &mut rng).unwrap();
        let min = m.iter_rows().flatten().min().copied();
        let max = m.iter_rows().flatten().max().copied();
        assert_eq!(min, Some(1));
        assert_eq!(max, Some(100));
    }

    #[test]
    fn test_random_zero_dims() {
        let m = Matrix::random(0, 5).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.iter_rows().count(), 0);

        let m = Matrix::random(4, 0).unwrap();
        assert_eq!(m.rows(), 4);
        assert!(m.iter_rows().all(|r| r.is_empty()));
    }

    #[test]
    fn test_dimensions_overflow_is_an_error() {
        let err = Matrix::random(usize::MAX / 2 + 1, 2).unwrap_err();
        assert!(matches!(
            err,
            Error::TooLarge { rows, cols: 2 } if rows == usize::MAX / 2 + 1
        ));
        assert!(Matrix::filled(usize::MAX, 3, 1).is_err());

        // Only the product has to fit.
        assert_eq!(Matrix::random(usize::MAX, 0).unwrap().rows(), usize::MAX);
    }

    #[test]
    fn test_from_rows() {
        let m = Matrix::from_rows([[1, 2], [3, 4]]).unwrap();
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.row(1), &[3, 4]);
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        let err = Matrix::from_rows(vec![vec![1, 2, 3], vec![4, 5]]).unwrap_err();
        match err {
            Error::RaggedRows {
                row,
                expected,
                found,
            } => {
                assert_eq!((row, expected, found), (1, 3, 2));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_rows_empty() {
        let m = Matrix::from_rows(Vec::<Vec<i32>>::new()).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.cols(), 0);
    }

    #[test]
    fn test_display_tab_separated() {
        let m = Matrix::from_rows([[1, 2], [30, 4]]).unwrap();
        assert_eq!(m.to_string(), "1\t2\t\n30\t4\t\n");
    }
}
