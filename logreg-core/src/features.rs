use crate::{Float, LogRegError, Matrix, Result, SparseMatrix, Vector};

/// Operations the estimator needs from a feature matrix.
///
/// Implemented for dense [`Matrix`] and compressed sparse row [`SparseMatrix`],
/// so that training and prediction are written once and work on both. Rows are
/// samples, columns are features.
///
/// Products check their operand lengths and return
/// [`LogRegError::ShapeMismatch`] rather than panicking inside nalgebra.
pub trait FeatureMatrix: Sized {
    /// Number of rows (samples).
    fn n_samples(&self) -> usize;

    /// Number of columns (features).
    fn n_features(&self) -> usize;

    /// Computes `X · w`, a vector of length `n_samples`.
    ///
    /// # Errors
    ///
    /// - [`LogRegError::ShapeMismatch`] if `w.len() != n_features`
    fn matvec(&self, w: &Vector) -> Result<Vector>;

    /// Computes `Xᵀ · v`, a vector of length `n_features`.
    ///
    /// # Errors
    ///
    /// - [`LogRegError::ShapeMismatch`] if `v.len() != n_samples`
    fn t_matvec(&self, v: &Vector) -> Result<Vector>;

    /// Returns a copy with one extra trailing column filled with `value`.
    fn hstack_column(&self, value: Float) -> Result<Self>;

    /// Returns the rows at `indices`, in that order. Indices may repeat.
    ///
    /// # Errors
    ///
    /// - [`LogRegError::ShapeMismatch`] if an index is out of bounds
    fn gather_rows(&self, indices: &[usize]) -> Result<Self>;
}

/// Appends a constant `1.0` column to `x`, the intercept feature.
///
/// The first `d` columns are copied unchanged and the result has `d + 1`
/// columns. Sparse input stays sparse: one stored entry is added per row.
///
/// # Example
///
/// ```rust
/// use logreg_core::{append_bias, Matrix};
///
/// let x = Matrix::from_row_slice(2, 2, &[1.0, 2.0, 3.0, 4.0]);
/// let xb = append_bias(&x).unwrap();
///
/// assert_eq!(xb.ncols(), 3);
/// assert_eq!(xb[(1, 2)], 1.0);
/// ```
pub fn append_bias<X: FeatureMatrix>(x: &X) -> Result<X> {
    x.hstack_column(1.0)
}

fn check_len(expected: usize, got: usize, what: &str) -> Result<()> {
    if expected != got {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} {}", expected, what),
            got: format!("Got {}", got),
        });
    }
    Ok(())
}

fn check_indices(indices: &[usize], n: usize) -> Result<()> {
    if let Some(&bad) = indices.iter().find(|&&i| i >= n) {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("row index < {}", n),
            got: format!("row index = {}", bad),
        });
    }
    Ok(())
}

impl FeatureMatrix for Matrix {
    fn n_samples(&self) -> usize {
        self.nrows()
    }

    fn n_features(&self) -> usize {
        self.ncols()
    }

    fn matvec(&self, w: &Vector) -> Result<Vector> {
        check_len(self.ncols(), w.len(), "features")?;
        Ok(self * w)
    }

    fn t_matvec(&self, v: &Vector) -> Result<Vector> {
        check_len(self.nrows(), v.len(), "samples")?;
        Ok(self.tr_mul(v))
    }

    fn hstack_column(&self, value: Float) -> Result<Self> {
        Ok(self.clone().insert_column(self.ncols(), value))
    }

    fn gather_rows(&self, indices: &[usize]) -> Result<Self> {
        check_indices(indices, self.nrows())?;
        Ok(Matrix::from_fn(indices.len(), self.ncols(), |i, j| {
            self[(indices[i], j)]
        }))
    }
}

impl FeatureMatrix for SparseMatrix {
    fn n_samples(&self) -> usize {
        self.nrows()
    }

    fn n_features(&self) -> usize {
        self.ncols()
    }

    fn matvec(&self, w: &Vector) -> Result<Vector> {
        check_len(self.ncols(), w.len(), "features")?;

        let mut out = Vector::zeros(self.nrows());
        for (i, row) in self.row_iter().enumerate() {
            let mut acc = 0.0;
            for (&j, &v) in row.col_indices().iter().zip(row.values()) {
                acc += v * w[j];
            }
            out[i] = acc;
        }

        Ok(out)
    }

    fn t_matvec(&self, v: &Vector) -> Result<Vector> {
        check_len(self.nrows(), v.len(), "samples")?;

        // Scatter each row into the output instead of transposing the CSR.
        let mut out = Vector::zeros(self.ncols());
        for (i, row) in self.row_iter().enumerate() {
            let vi = v[i];
            for (&j, &x) in row.col_indices().iter().zip(row.values()) {
                out[j] += x * vi;
            }
        }

        Ok(out)
    }

    fn hstack_column(&self, value: Float) -> Result<Self> {
        let n = self.nrows();
        let d = self.ncols();

        let mut row_offsets = Vec::with_capacity(n + 1);
        let mut col_indices = Vec::with_capacity(self.nnz() + n);
        let mut values = Vec::with_capacity(self.nnz() + n);

        row_offsets.push(0);
        for row in self.row_iter() {
            col_indices.extend_from_slice(row.col_indices());
            values.extend_from_slice(row.values());
            // New column has the largest index, so column order stays sorted.
            col_indices.push(d);
            values.push(value);
            row_offsets.push(col_indices.len());
        }

        SparseMatrix::try_from_csr_data(n, d + 1, row_offsets, col_indices, values)
            .map_err(|e| LogRegError::Sparse(e.to_string()))
    }

    fn gather_rows(&self, indices: &[usize]) -> Result<Self> {
        check_indices(indices, self.nrows())?;

        let mut row_offsets = Vec::with_capacity(indices.len() + 1);
        let mut col_indices = Vec::new();
        let mut values = Vec::new();

        row_offsets.push(0);
        for &i in indices {
            let row = self.row(i);
            col_indices.extend_from_slice(row.col_indices());
            values.extend_from_slice(row.values());
            row_offsets.push(col_indices.len());
        }

        SparseMatrix::try_from_csr_data(
            indices.len(),
            self.ncols(),
            row_offsets,
            col_indices,
            values,
        )
        .map_err(|e| LogRegError::Sparse(e.to_string()))
    }
}
