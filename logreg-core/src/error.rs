use thiserror::Error;

#[derive(Debug, Error)]
pub enum LogRegError {
    /// Shape or dimensionality mismatch
    #[error("shape mismatch: {expected}, {got}")]
    ShapeMismatch { expected: String, got: String },

    /// Model used before calling `train`
    #[error("model is not fitted; call `train` first")]
    NotFitted,

    /// The training dataset contains zero samples.
    #[error("training data contains zero samples")]
    EmptyTrainingData,

    /// Invalid Hyperparameter Value
    #[error("invalid hyperparameter `{name}`: {value}")]
    InvalidHyperparameter { name: String, value: String },

    /// Invalid value
    #[error("invalid value: {message}")]
    InvalidValue { message: String },

    /// A compressed sparse row structure was rejected while building a matrix.
    #[error("sparse matrix error: {0}")]
    Sparse(String),
}

pub type Result<T> = std::result::Result<T, LogRegError>;
