use log::debug;
use logreg_core::features;
use logreg_core::loss::{binary_cross_entropy, sigmoid_vec};
use logreg_core::utils::{argmax, sample_with_replacement};
use logreg_core::{FeatureMatrix, Float, Label, LogRegError, Matrix, Predictions, Result, Vector};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::config::TrainConfig;
use crate::observer::{LogProgress, Silent, TrainingObserver};

/// Standard deviation of the initial weights.
const INIT_SCALE: Float = 0.01;

/// Binary **logistic regression** trained with mini-batch stochastic gradient descent.
///
/// The model estimates the probability of the positive class as
///
/// ```text
/// p(y = 1 | x) = σ(x̃ · w),   σ(z) = 1 / (1 + e^(−z))
/// ```
///
/// where `x̃ = [x, 1]` is the input row with a constant bias feature appended,
/// so the last entry of `w` is the intercept.
///
/// # Training objective
///
/// For a mini-batch of `m` augmented rows with labels `y ∈ {0, 1}`:
///
/// ```text
/// L(w) = (1/m) Σ_i [ −y_i ln h_i − (1 − y_i) ln(1 − h_i) ]  +  reg · Σ_{j<d} w_j²
/// ∇L   = (1/m) X̃ᵀ (h − y)                                 +  reg · w_j   (j < d)
/// ```
///
/// with `h = σ(X̃ w)`. The bias `w_d` is never regularized.
///
/// # Lifecycle
///
/// - `weights == None`: untrained. Prediction fails with [`LogRegError::NotFitted`].
/// - `weights == Some(w)`: trained. Further calls to [`train`](LogisticRegression::train)
///   continue from `w` (warm start) as long as the feature count is unchanged.
///
/// # Randomness
///
/// Weight initialization and batch sampling draw from the generator passed to
/// `train`. Seed it (e.g. `StdRng::seed_from_u64`) for reproducible runs.
///
/// # Errors
///
/// - [`LogRegError::EmptyTrainingData`] if `X` has zero rows
/// - [`LogRegError::ShapeMismatch`] if `y.len() != X.nrows()` or the feature count
///   disagrees with already-trained weights
/// - [`LogRegError::InvalidValue`] if a label is not `0` or `1`
/// - [`LogRegError::InvalidHyperparameter`] if the [`TrainConfig`] is invalid
/// - [`LogRegError::NotFitted`] if prediction is requested before training
#[derive(Debug, Clone)]
pub struct LogisticRegression {
    /// Weight vector of length `d + 1`; the last entry is the bias.
    ///
    /// `None` indicates the model is not trained yet.
    weights: Option<Vector>,

    /// Batch loss of every iteration of the most recent `train` call.
    loss_history: Vec<Float>,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self {
            weights: None,
            loss_history: Vec::new(),
        }
    }
}

impl LogisticRegression {
    /// Creates a new, untrained model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Trains the model with mini-batch SGD.
    ///
    /// Progress is logged at `info` level every 100 iterations when
    /// `config.verbose` is set; see [`train_with_observer`](Self::train_with_observer)
    /// to receive every iteration instead.
    ///
    /// # Parameters
    ///
    /// - `x`: Feature matrix of shape `(n × d)`, dense or sparse, without the bias column.
    /// - `y`: `n` labels, each `0` or `1`.
    /// - `config`: Hyperparameters.
    /// - `rng`: Source of randomness for initialization and sampling.
    ///
    /// # Returns
    ///
    /// `&mut self`, so calls can be chained into prediction.
    pub fn train<X, R>(
        &mut self,
        x: &X,
        y: &[Label],
        config: &TrainConfig,
        rng: &mut R,
    ) -> Result<&mut Self>
    where
        X: FeatureMatrix,
        R: Rng + ?Sized,
    {
        if config.verbose {
            self.train_with_observer(x, y, config, rng, &mut LogProgress::default())
        } else {
            self.train_with_observer(x, y, config, rng, &mut Silent)
        }
    }

    /// Trains the model with mini-batch SGD, reporting every iteration to `observer`.
    ///
    /// # Algorithm
    ///
    /// 1. Append the bias column to `x` once.
    /// 2. If there are no weights yet, draw `w ~ 0.01 · N(0, 1)` of length `d + 1`.
    /// 3. Clear the loss history.
    /// 4. For each of `num_iters` steps:
    ///    - sample `batch_size` row indices uniformly **with replacement**
    ///    - compute `(loss, ∇)` on that batch (see [`loss`](Self::loss))
    ///    - record the loss, then update `w ← w − learning_rate · ∇`
    ///    - notify `observer`
    ///
    /// # Complexity
    ///
    /// Let `b = batch_size`, `d = n_features`, `t = num_iters`.
    /// - Time: `O(n d)` for augmentation plus `O(t b d)` for the updates (dense)
    /// - Space: `O(n d)` for the augmented copy of `x`
    pub fn train_with_observer<X, R, O>(
        &mut self,
        x: &X,
        y: &[Label],
        config: &TrainConfig,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<&mut Self>
    where
        X: FeatureMatrix,
        R: Rng + ?Sized,
        O: TrainingObserver + ?Sized,
    {
        config.validate()?;

        let n = x.n_samples();
        if n == 0 {
            return Err(LogRegError::EmptyTrainingData);
        }
        if y.len() != n {
            return Err(LogRegError::ShapeMismatch {
                expected: format!("Expected {} labels", n),
                got: format!("Got {}", y.len()),
            });
        }
        let targets = labels_to_targets(y)?;

        let xb = features::append_bias(x)?;
        let dim = xb.n_features();

        match &self.weights {
            Some(w) if w.len() != dim => {
                return Err(LogRegError::ShapeMismatch {
                    expected: format!("Expected {} features", w.len() - 1),
                    got: format!("Got {}", x.n_features()),
                });
            }
            Some(_) => debug!("warm start: continuing from existing {} weights", dim),
            None => debug!("initializing {} weights", dim),
        }

        debug!(
            "training on {} samples: lr={}, reg={}, iters={}, batch={}",
            n, config.learning_rate, config.reg, config.num_iters, config.batch_size
        );

        self.loss_history = Vec::with_capacity(config.num_iters);
        let w = self
            .weights
            .get_or_insert_with(|| Self::initialize_weights(dim, rng));

        for it in 0..config.num_iters {
            let indices = sample_with_replacement(rng, n, config.batch_size);
            let x_batch = xb.gather_rows(&indices)?;
            let y_batch = Vector::from_iterator(indices.len(), indices.iter().map(|&i| targets[i]));

            let (loss, grad) = loss_and_gradient(&x_batch, &y_batch, w, config.reg)?;
            self.loss_history.push(loss);

            *w -= grad * config.learning_rate;

            observer.on_iteration(it, config.num_iters, loss);
        }

        if let Some(last) = self.loss_history.last() {
            debug!("training finished: final loss {}", last);
        }

        Ok(self)
    }

    /// Computes the regularized cross-entropy loss and its gradient on a batch.
    ///
    /// Uses the current weights; nothing is modified.
    ///
    /// # Parameters
    ///
    /// - `x_batch`: Batch of shape `(m × (d + 1))`, **already bias-augmented**.
    /// - `y_batch`: `m` labels, each `0` or `1`.
    /// - `reg`: L2 strength applied to every weight except the bias.
    ///
    /// # Returns
    ///
    /// `(loss, gradient)` with `gradient.len() == weights.len()`.
    ///
    /// # Numerical notes
    ///
    /// Probabilities are clipped to `[1e-15, 1 − 1e-15]` inside the logarithms
    /// (see [`binary_cross_entropy`]), so saturated logits give a large finite
    /// loss. The gradient uses the unclipped probabilities.
    ///
    /// # Errors
    ///
    /// - [`LogRegError::NotFitted`] if there are no weights yet
    /// - [`LogRegError::EmptyTrainingData`] if the batch is empty
    /// - [`LogRegError::ShapeMismatch`] on label count or width mismatch
    /// - [`LogRegError::InvalidValue`] if a label is not `0` or `1`
    pub fn loss<X: FeatureMatrix>(
        &self,
        x_batch: &X,
        y_batch: &[Label],
        reg: Float,
    ) -> Result<(Float, Vector)> {
        let w = self.weights.as_ref().ok_or(LogRegError::NotFitted)?;
        let targets = labels_to_targets(y_batch)?;
        loss_and_gradient(x_batch, &targets, w, reg)
    }

    /// Returns the logits `X̃ · w`.
    ///
    /// Pass `append_bias = true` for raw feature data; `false` when `x`
    /// already carries the bias column.
    ///
    /// # Errors
    ///
    /// - [`LogRegError::NotFitted`] if the model has not been trained
    /// - [`LogRegError::ShapeMismatch`] if the width disagrees with the weights
    pub fn decision_function<X: FeatureMatrix>(&self, x: &X, append_bias: bool) -> Result<Vector> {
        let w = self.weights.as_ref().ok_or(LogRegError::NotFitted)?;

        if append_bias {
            features::append_bias(x)?.matvec(w)
        } else {
            x.matvec(w)
        }
    }

    /// Predicts class probabilities.
    ///
    /// # Returns
    ///
    /// Matrix of shape `(n × 2)`; row `i` is `[P(y=0), P(y=1)]` for sample `i`.
    ///
    /// # Errors
    ///
    /// Same as [`decision_function`](Self::decision_function).
    pub fn predict_proba<X: FeatureMatrix>(&self, x: &X, append_bias: bool) -> Result<Matrix> {
        let p1 = sigmoid_vec(&self.decision_function(x, append_bias)?);

        Ok(Matrix::from_fn(p1.len(), 2, |i, j| {
            if j == 0 {
                1.0 - p1[i]
            } else {
                p1[i]
            }
        }))
    }

    /// Predicts hard labels for raw feature data `x` (the bias is appended here).
    ///
    /// Each label is the argmax of the row of [`predict_proba`](Self::predict_proba);
    /// an exact tie at `0.5` resolves to class `0`.
    ///
    /// # Errors
    ///
    /// Same as [`decision_function`](Self::decision_function).
    pub fn predict<X: FeatureMatrix>(&self, x: &X) -> Result<Predictions> {
        let proba = self.predict_proba(x, true)?;

        Ok(proba
            .row_iter()
            .map(|row| argmax(&[row[0], row[1]]))
            .collect())
    }

    /// Returns the learned weights (bias last), or `None` if not trained.
    pub fn weights(&self) -> Option<&Vector> {
        self.weights.as_ref()
    }

    /// Returns the per-iteration losses of the most recent `train` call.
    pub fn loss_history(&self) -> &[Float] {
        &self.loss_history
    }

    pub fn is_fitted(&self) -> bool {
        self.weights.is_some()
    }

    fn initialize_weights<R: Rng + ?Sized>(dim: usize, rng: &mut R) -> Vector {
        Vector::from_fn(dim, |_, _| {
            let z: Float = StandardNormal.sample(rng);
            z * INIT_SCALE
        })
    }
}

fn labels_to_targets(y: &[Label]) -> Result<Vector> {
    if let Some(&bad) = y.iter().find(|&&label| label > 1) {
        return Err(LogRegError::InvalidValue {
            message: format!("binary labels must be 0 or 1, got {}", bad),
        });
    }
    Ok(Vector::from_iterator(y.len(), y.iter().map(|&label| label as Float)))
}

fn loss_and_gradient<X: FeatureMatrix>(
    x: &X,
    y: &Vector,
    w: &Vector,
    reg: Float,
) -> Result<(Float, Vector)> {
    let m = x.n_samples();
    if m == 0 {
        return Err(LogRegError::EmptyTrainingData);
    }
    if y.len() != m {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} labels", m),
            got: format!("Got {}", y.len()),
        });
    }

    // --- h = σ(X w) ---
    let h = sigmoid_vec(&x.matvec(w)?);

    // --- data term: mean cross-entropy and Xᵀ(h − y) / m ---
    let mut loss = binary_cross_entropy(&h, y)?;
    let mut grad = x.t_matvec(&(&h - y))? / m as Float;

    // --- L2 on every weight but the last (bias) ---
    let d = w.len().saturating_sub(1);
    let mut penalty = 0.0;
    for j in 0..d {
        penalty += w[j] * w[j];
        grad[j] += reg * w[j];
    }
    loss += reg * penalty;

    Ok((loss, grad))
}
