use crate::{Float, LogRegError, Result, Vector};

/// Lower clipping bound applied to probabilities inside the logarithms of
/// [`binary_cross_entropy`]; the upper bound is `1 - PROBABILITY_EPSILON`.
pub const PROBABILITY_EPSILON: Float = 1e-15;

/// The **logistic sigmoid** link function.
///
/// # Definition
///
/// ```text
/// σ(z) = 1 / (1 + e^(−z))
/// ```
///
/// Maps a logit to a probability. For finite `z` of moderate magnitude the
/// result lies strictly in `(0, 1)`; for very large `|z|` it rounds to `0.0`
/// or `1.0` (`exp` overflowing to `+∞` still yields `0.0`, never `NaN`).
///
/// Inverting it gives the log-odds: `z = ln(σ / (1 − σ))`.
///
/// # Examples
///
/// ```rust
/// use logreg_core::loss::sigmoid;
///
/// assert_eq!(sigmoid(0.0), 0.5);
/// assert!((sigmoid(2.0) + sigmoid(-2.0) - 1.0).abs() < 1e-12);
/// ```
pub fn sigmoid(z: Float) -> Float {
    1.0 / (1.0 + (-z).exp())
}

/// Applies [`sigmoid`] elementwise.
pub fn sigmoid_vec(z: &Vector) -> Vector {
    z.map(sigmoid)
}

/// Mean **binary cross-entropy** between predicted probabilities `h` and
/// targets `y` (each `0.0` or `1.0`).
///
/// # Definition
///
/// ```text
/// L = (1/m) Σ_i [ −y_i · ln(h_i) − (1 − y_i) · ln(1 − h_i) ]
/// ```
///
/// Probabilities are clipped to `[ε, 1 − ε]` with ε = [`PROBABILITY_EPSILON`]
/// before taking logarithms, so a saturated sigmoid yields a large but finite
/// loss instead of `∞` or `NaN`. The result is always `≥ 0`.
///
/// # Errors
///
/// - [`LogRegError::ShapeMismatch`] if `h.len() != y.len()`
/// - [`LogRegError::EmptyTrainingData`] if both are empty
pub fn binary_cross_entropy(h: &Vector, y: &Vector) -> Result<Float> {
    if h.len() != y.len() {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} targets", h.len()),
            got: format!("Got {}", y.len()),
        });
    }
    if h.is_empty() {
        return Err(LogRegError::EmptyTrainingData);
    }

    let mut total = 0.0;
    for (&hi, &yi) in h.iter().zip(y.iter()) {
        let p = hi.clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON);
        total += -yi * p.ln() - (1.0 - yi) * (1.0 - p).ln();
    }

    Ok(total / h.len() as Float)
}
