pub type Float = f64;
pub type Matrix = nalgebra::DMatrix<Float>;
pub type Vector = nalgebra::DVector<Float>;
pub type SparseMatrix = nalgebra_sparse::CsrMatrix<Float>;

/// Class label. The binary estimator only accepts `0` and `1`.
pub type Label = usize;
pub type Predictions = Vec<Label>;
