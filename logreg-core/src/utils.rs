use rand::Rng;

use crate::Float;

/// Index of the largest value, taking the first one on ties.
///
/// `NaN` entries are skipped. Returns `0` for an empty or all-`NaN` slice.
pub fn argmax(values: &[Float]) -> usize {
    let mut best: Option<usize> = None;
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            continue;
        }
        match best {
            Some(b) if v <= values[b] => {}
            _ => best = Some(i),
        }
    }
    best.unwrap_or(0)
}

/// Draws `size` indices uniformly from `0..n`, with replacement.
///
/// `size` may exceed `n`. Returns an empty vector when `size == 0`.
///
/// # Panics
///
/// Panics if `n == 0` and `size > 0`; callers reject empty data first.
pub fn sample_with_replacement<R: Rng + ?Sized>(rng: &mut R, n: usize, size: usize) -> Vec<usize> {
    (0..size).map(|_| rng.random_range(0..n)).collect()
}
