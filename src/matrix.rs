use crate::error::{check_dim, FitError, FitResult};
use crate::math::dot;
use core::ops::Index;
use rayon::prelude::*;

/// View of one row of a column-major matrix: an item every `stride`, from `start`.
pub struct StridedVecView<'a, A: 'a> {
    pub data: &'a [A],
    pub start: usize,
    pub stride: usize,
}

impl<'a, A: 'a> StridedVecView<'a, A> {
    pub fn new(data: &'a [A], start: usize, stride: usize) -> Self {
        Self {
            data,
            start,
            stride,
        }
    }

    /// Number of items in the view.
    pub fn len(&self) -> usize {
        if self.stride == 0 {
            return 0;
        }
        self.data.len() / self.stride
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&'a self) -> impl Iterator<Item = &'a A> {
        (0..self.len()).map(move |pos| &self[pos])
    }
}

impl<'a, A: 'a> Index<usize> for StridedVecView<'a, A> {
    type Output = A;
    fn index(&self, pos: usize) -> &A {
        &self.data[self.start + pos * self.stride]
    }
}

impl<'a> StridedVecView<'a, f64> {
    /// Dot product of the row with `other`. Lengths must match.
    pub fn dot(&self, other: &[f64]) -> FitResult<f64> {
        check_dim("row length", other.len(), self.len())?;
        let mut o = 0.;
        for (pos, &b) in other.iter().enumerate() {
            o += self[pos] * b;
        }
        Ok(o)
    }
}

/// Dense matrix stored column by column.
///
/// Columns are contiguous slices, rows are strided views. This is the layout
/// used for the design matrix: `Xᵗ·v` walks whole columns and `X·theta` walks
/// rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMajorMatrix<A> {
    /// Number of rows in the matrix
    n_rows: usize,
    /// Number of columns in the matrix
    n_cols: usize,
    /// Values, the first column first
    values: Vec<A>,
}

impl<A> ColumnMajorMatrix<A> {
    pub fn from_columns(columns: Vec<Vec<A>>) -> FitResult<Self> {
        let n_cols = columns.len();
        let n_rows = columns.first().map(|c| c.len()).ok_or(FitError::EmptyDataset)?;
        if n_rows == 0 {
            return Err(FitError::EmptyDataset);
        }
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for column in columns {
            check_dim("column length", n_rows, column.len())?;
            values.extend(column);
        }
        Ok(Self {
            n_rows,
            n_cols,
            values,
        })
    }

    /// Build from rows, which must all have the same length.
    pub fn from_rows(rows: Vec<Vec<A>>) -> FitResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map(|r| r.len()).ok_or(FitError::EmptyDataset)?;
        for row in &rows {
            check_dim("row length", n_cols, row.len())?;
        }
        let mut values: Vec<A> = Vec::with_capacity(n_rows * n_cols);
        let mut rows: Vec<_> = rows.into_iter().map(|r| r.into_iter()).collect();
        for _ in 0..n_cols {
            for row in &mut rows {
                if let Some(item) = row.next() {
                    values.push(item)
                }
            }
        }
        assert_eq!(n_rows * n_cols, values.len());
        Ok(Self {
            n_rows,
            n_cols,
            values,
        })
    }

    pub fn from_function(n_rows: usize, n_cols: usize, f: impl Fn(usize, usize) -> A) -> Self {
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for col in 0..n_cols {
            for row in 0..n_rows {
                values.push(f(row, col));
            }
        }
        Self {
            n_rows,
            n_cols,
            values,
        }
    }

    pub fn column(&self, col: usize) -> &[A] {
        let start = col * self.n_rows;
        &self.values[start..start + self.n_rows]
    }

    pub fn row(&self, row: usize) -> StridedVecView<A> {
        assert!(row < self.n_rows);
        StridedVecView::new(&self.values, row, self.n_rows)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }
}

impl<A: Clone> ColumnMajorMatrix<A> {
    /// Keep only the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Self {
        Self::from_function(indices.len(), self.n_cols, |row, col| {
            self[(indices[row], col)].clone()
        })
    }
}

impl ColumnMajorMatrix<f64> {
    /// Copy of the matrix with a leading column of ones (the bias term).
    pub fn with_bias_column(&self) -> Self {
        let mut values = Vec::with_capacity(self.n_rows * (self.n_cols + 1));
        values.extend(std::iter::repeat(1.).take(self.n_rows));
        values.extend_from_slice(&self.values);
        Self {
            n_rows: self.n_rows,
            n_cols: self.n_cols + 1,
            values,
        }
    }

    /// `X·v`, one value per row.
    pub fn dot_vec(&self, v: &[f64]) -> FitResult<Vec<f64>> {
        check_dim("theta", self.n_cols, v.len())?;
        let out = (0..self.n_rows)
            .into_par_iter()
            .map(|row| {
                let mut o = 0.;
                for (col, &b) in v.iter().enumerate() {
                    o += self.values[row + col * self.n_rows] * b;
                }
                o
            })
            .collect();
        Ok(out)
    }

    /// `Xᵗ·v`, one value per column.
    pub fn transpose_dot_vec(&self, v: &[f64]) -> FitResult<Vec<f64>> {
        check_dim("rows", self.n_rows, v.len())?;
        let out = self
            .values
            .par_chunks(self.n_rows.max(1))
            .map(|column| dot(column, v))
            .collect();
        Ok(out)
    }
}

impl<A> Index<(usize, usize)> for ColumnMajorMatrix<A> {
    type Output = A;
    fn index(&self, (row, col): (usize, usize)) -> &A {
        // No need to check for col because it will be out of the buffer
        assert!(row < self.n_rows);
        &self.values[row + col * self.n_rows]
    }
}
