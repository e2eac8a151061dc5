/// Small dense row-major f64 matrix.
/// Holds the reference x target similarity matrix; rows index reference
/// tokens, columns index target tokens. Inventories are tens of elements,
/// so no sparsity or blocking is attempted.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl DenseMatrix {
    /// Build a rows x cols matrix from a cell function.
    pub fn from_fn<F>(rows: usize, cols: usize, mut cell: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(cell(r, c));
            }
        }
        DenseMatrix { data, rows, cols }
    }

    /// All-zero matrix of the same shape.
    pub fn zeros_like(&self) -> Self {
        DenseMatrix {
            data: vec![0.0; self.data.len()],
            rows: self.rows,
            cols: self.cols,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.data[row * self.cols + col] = value;
    }

    /// Copy of the leftmost `cols` columns.
    /// Used to score a prefix of the target inventory without rebuilding
    /// similarities.
    pub fn left_columns(&self, cols: usize) -> Self {
        debug_assert!(cols <= self.cols);
        DenseMatrix::from_fn(self.rows, cols, |r, c| self.at(r, c))
    }

    /// Maximum of one row.
    #[inline]
    pub fn row_max(&self, row: usize) -> f64 {
        (0..self.cols)
            .map(|c| self.at(row, c))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Maximum of one column.
    #[inline]
    pub fn col_max(&self, col: usize) -> f64 {
        (0..self.rows)
            .map(|r| self.at(r, col))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Mean over columns of the per-column maximum.
    pub fn col_max_mean(&self) -> f64 {
        (0..self.cols).map(|c| self.col_max(c)).sum::<f64>() / self.cols as f64
    }

    /// Mean over rows of the per-row maximum.
    pub fn row_max_mean(&self) -> f64 {
        (0..self.rows).map(|r| self.row_max(r)).sum::<f64>() / self.rows as f64
    }

    /// Matrix that is zero everywhere except the given cells, which keep
    /// their current value.
    pub fn retain_cells(&self, cells: &[(usize, usize)]) -> Self {
        let mut out = self.zeros_like();
        for &(r, c) in cells {
            out.set(r, c, self.at(r, c));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> DenseMatrix {
        // 2x3:
        // 0.1 0.9 0.4
        // 0.8 0.2 0.6
        let vals = [[0.1, 0.9, 0.4], [0.8, 0.2, 0.6]];
        DenseMatrix::from_fn(2, 3, |r, c| vals[r][c])
    }

    #[test]
    fn max_means_over_rows_and_columns() {
        let m = sample();
        assert_relative_eq!(m.col_max_mean(), (0.8 + 0.9 + 0.6) / 3.0);
        assert_relative_eq!(m.row_max_mean(), (0.9 + 0.8) / 2.0);
    }

    #[test]
    fn left_columns_takes_a_prefix() {
        let m = sample().left_columns(2);
        assert_eq!((m.rows(), m.cols()), (2, 2));
        assert_relative_eq!(m.at(1, 1), 0.2);
        assert_relative_eq!(m.col_max_mean(), (0.8 + 0.9) / 2.0);
    }

    #[test]
    fn retain_cells_zeroes_everything_else() {
        let m = sample().retain_cells(&[(0, 1), (1, 2)]);
        assert_relative_eq!(m.at(0, 1), 0.9);
        assert_relative_eq!(m.at(1, 2), 0.6);
        assert_relative_eq!(m.at(0, 0), 0.0);
        assert_relative_eq!(m.at(1, 0), 0.0);
    }
}
