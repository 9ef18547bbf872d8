use crate::error::ErrorKind;
use itertools::Itertools as _;
use rayon::prelude::*;
use std::fmt;
use thiserror::Error;

const PREVIEW_ROWS: usize = 5;

/// Dense row-major matrix of `f64`.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(MatrixError::ShapeMismatch {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self, MatrixError> {
        let len = rows
            .checked_mul(cols)
            .ok_or(MatrixError::TooLarge { rows, cols })?;
        Ok(Self {
            rows,
            cols,
            data: vec![0.0; len],
        })
    }

    // `rows` is bounded by a slice length and `cols` by an existing matrix.
    fn blank(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a matrix by copying `rows`, which must all have the same length.
    pub fn from_rows<T: AsRef<[f64]>>(rows: &[T]) -> Result<Self, MatrixError> {
        let cols = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(MatrixError::RaggedRows {
                    row: i,
                    expected: cols,
                    actual: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Self {
            rows: rows.len(),
            cols,
            data,
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

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn iter_rows(&self) -> impl '_ + Iterator<Item = &[f64]> + ExactSizeIterator {
        (0..self.rows).map(move |i| self.row(i))
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.iter_rows().map(<[f64]>::to_vec).collect()
    }

    /// Fills a `rows x cols` matrix in row-major order.
    pub(crate) fn from_fn<F>(rows: usize, cols: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Copies the rows at `indices`, in the given order, into a new matrix.
    ///
    /// Panics if an index is out of bounds.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        let mut selected = Self::blank(indices.len(), self.cols);
        if self.cols == 0 {
            return selected;
        }
        for (dst, &i) in selected.data.chunks_exact_mut(self.cols).zip(indices) {
            dst.copy_from_slice(self.row(i));
        }
        selected
    }

    /// Parallel version of [`Matrix::select_rows`] with the same result.
    pub fn par_select_rows(&self, indices: &[usize]) -> Self {
        let mut selected = Self::blank(indices.len(), self.cols);
        if self.cols == 0 {
            return selected;
        }
        selected
            .data
            .par_chunks_exact_mut(self.cols)
            .zip(indices.par_iter())
            .for_each(|(dst, &i)| dst.copy_from_slice(self.row(i)));
        selected
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Matrix({} x {})", self.rows, self.cols)?;
        for row in self.iter_rows().take(PREVIEW_ROWS) {
            writeln!(f, "  [{:.4}]", row.iter().format(", "))?;
        }
        if self.rows > PREVIEW_ROWS {
            writeln!(f, "  ... {} more rows", self.rows - PREVIEW_ROWS)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error("row {row} has {actual} columns, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("a {rows} x {cols} matrix cannot hold {len} values")]
    ShapeMismatch { rows: usize, cols: usize, len: usize },

    #[error("a {rows} x {cols} matrix has more entries than fit in memory")]
    TooLarge { rows: usize, cols: usize },
}

impl MatrixError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::InvalidArgument
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rows_works() -> Result<(), anyhow::Error> {
        let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]])?;
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.row(1), &[3.0, 4.0]);
        assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.iter_rows().len(), 3);
        Ok(())
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![1.0, 2.0], vec![3.0]];
        assert_eq!(
            Matrix::from_rows(&rows),
            Err(MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn shape_must_match_data() {
        let e = Matrix::new(2, 3, vec![0.0; 5]).unwrap_err();
        assert_eq!(e.kind(), ErrorKind::InvalidArgument);
        assert!(Matrix::new(2, 3, vec![0.0; 6]).is_ok());

        // `rows * cols` overflows to zero and must not pass for an empty buffer.
        assert_eq!(
            Matrix::new(1usize << 63, 2, Vec::new()),
            Err(MatrixError::ShapeMismatch {
                rows: 1usize << 63,
                cols: 2,
                len: 0
            })
        );
    }

    #[test]
    fn zeros_rejects_overflowing_shape() -> Result<(), anyhow::Error> {
        let m = Matrix::zeros(2, 3)?;
        assert_eq!(m.as_slice(), &[0.0; 6]);
        assert_eq!(
            Matrix::zeros(usize::MAX, 2),
            Err(MatrixError::TooLarge {
                rows: usize::MAX,
                cols: 2
            })
        );
        Ok(())
    }

    #[test]
    fn empty_matrix() -> Result<(), anyhow::Error> {
        let m = Matrix::from_rows::<Vec<f64>>(&[])?;
        assert!(m.is_empty());
        assert_eq!(m.cols(), 0);
        Ok(())
    }

    #[test]
    fn select_rows_keeps_order() -> Result<(), anyhow::Error> {
        let m = Matrix::from_rows(&[[0.0, 0.5], [1.0, 1.5], [2.0, 2.5], [3.0, 3.5]])?;
        let s = m.select_rows(&[3, 0, 2]);
        assert_eq!(s.to_rows(), vec![vec![3.0, 3.5], vec![0.0, 0.5], vec![2.0, 2.5]]);
        assert_eq!(m.par_select_rows(&[3, 0, 2]), s);
        assert_eq!(m.select_rows(&[]).rows(), 0);
        Ok(())
    }

    #[test]
    fn zero_width_rows_can_be_selected() -> Result<(), anyhow::Error> {
        let m = Matrix::new(3, 0, Vec::new())?;
        assert_eq!(m.select_rows(&[2, 0]).rows(), 2);
        assert_eq!(m.par_select_rows(&[1]).rows(), 1);
        Ok(())
    }

    #[test]
    fn display_previews_rows() -> Result<(), anyhow::Error> {
        let rows = (0..7).map(|i| vec![i as f64, 1.0]).collect::<Vec<_>>();
        let text = Matrix::from_rows(&rows)?.to_string();
        assert!(text.starts_with("Matrix(7 x 2)\n  [0.0000, 1.0000]\n"));
        assert!(text.ends_with("  ... 2 more rows\n"));
        Ok(())
    }
}
