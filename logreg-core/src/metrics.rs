use crate::{Float, Label, LogRegError, Result};

/// Fraction of positions where `y_pred` equals `y_true`, in `[0, 1]`.
///
/// # Errors
///
/// - [`LogRegError::ShapeMismatch`] if the lengths differ
/// - [`LogRegError::EmptyTrainingData`] if both are empty
pub fn accuracy(y_true: &[Label], y_pred: &[Label]) -> Result<Float> {
    if y_true.len() != y_pred.len() {
        return Err(LogRegError::ShapeMismatch {
            expected: format!("Expected {} predictions", y_true.len()),
            got: format!("Got {}", y_pred.len()),
        });
    }
    if y_true.is_empty() {
        return Err(LogRegError::EmptyTrainingData);
    }

    let correct = y_true
        .iter()
        .zip(y_pred)
        .filter(|(a, b)| a == b)
        .count();

    Ok(correct as Float / y_true.len() as Float)
}
