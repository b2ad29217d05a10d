#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use logreg_core::{Float, LogRegError, Result};

/// Hyperparameters for [`LogisticRegression::train`](crate::LogisticRegression::train).
///
/// # Fields
///
/// - `learning_rate`: step size applied to the gradient (default `1e-3`)
/// - `reg`: L2 penalty strength, never applied to the bias (default `1e-5`)
/// - `num_iters`: number of SGD steps (default `100`)
/// - `batch_size`: samples drawn per step, with replacement (default `200`)
/// - `verbose`: log progress every 100th iteration (default `false`)
///
/// With the `serde` feature, missing fields in a deserialized document take
/// their default values.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub learning_rate: Float,
    pub reg: Float,
    pub num_iters: usize,
    pub batch_size: usize,
    pub verbose: bool,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 1e-3,
            reg: 1e-5,
            num_iters: 100,
            batch_size: 200,
            verbose: false,
        }
    }
}

impl TrainConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_learning_rate(mut self, learning_rate: Float) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_reg(mut self, reg: Float) -> Self {
        self.reg = reg;
        self
    }

    pub fn with_num_iters(mut self, num_iters: usize) -> Self {
        self.num_iters = num_iters;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Checks the hyperparameters before any training work is done.
    ///
    /// # Errors
    ///
    /// - [`LogRegError::InvalidHyperparameter`] if `learning_rate` is not a
    ///   finite positive number, `reg` is not finite and non-negative, or
    ///   `batch_size == 0`
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(LogRegError::InvalidHyperparameter {
                name: "learning_rate".into(),
                value: format!("{} (must be finite and > 0)", self.learning_rate),
            });
        }

        if !(self.reg.is_finite() && self.reg >= 0.0) {
            return Err(LogRegError::InvalidHyperparameter {
                name: "reg".into(),
                value: format!("{} (must be finite and >= 0)", self.reg),
            });
        }

        if self.batch_size == 0 {
            return Err(LogRegError::InvalidHyperparameter {
                name: "batch_size".into(),
                value: "0".into(),
            });
        }

        Ok(())
    }
}
