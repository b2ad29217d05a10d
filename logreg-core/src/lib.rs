pub mod error;
pub mod features;
pub mod loss;
pub mod metrics;
pub mod types;
pub mod utils;

pub use types::{Float, Label, Matrix, Predictions, SparseMatrix, Vector};

pub use error::{LogRegError, Result};

pub use features::{append_bias, FeatureMatrix};
