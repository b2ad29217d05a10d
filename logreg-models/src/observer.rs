use log::info;
use logreg_core::Float;

/// Receives the loss after every SGD step.
///
/// Observers only watch; they cannot change the course of training. Any
/// `FnMut(usize, usize, Float)` closure is an observer, which makes it easy to
/// capture the sequence in tests:
///
/// ```ignore
/// let mut seen = Vec::new();
/// model.train_with_observer(&x, &y, &config, &mut rng, &mut |it, _, loss| {
///     seen.push((it, loss))
/// })?;
/// ```
pub trait TrainingObserver {
    /// Called once per iteration, after the weight update.
    ///
    /// - `iteration`: zero-based index of the step
    /// - `num_iters`: total number of steps in this call to `train`
    /// - `loss`: the batch loss recorded for this step
    fn on_iteration(&mut self, iteration: usize, num_iters: usize, loss: Float);
}

impl<F> TrainingObserver for F
where
    F: FnMut(usize, usize, Float),
{
    fn on_iteration(&mut self, iteration: usize, num_iters: usize, loss: Float) {
        self(iteration, num_iters, loss)
    }
}

/// Observer that ignores every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl TrainingObserver for Silent {
    fn on_iteration(&mut self, _iteration: usize, _num_iters: usize, _loss: Float) {}
}

/// Observer that logs the loss at `info` level every `every`-th iteration.
#[derive(Debug, Clone, Copy)]
pub struct LogProgress {
    every: usize,
}

impl Default for LogProgress {
    fn default() -> Self {
        Self { every: 100 }
    }
}

impl LogProgress {
    /// Creates an observer reporting every `every` iterations (`0` is treated as `1`).
    pub fn new(every: usize) -> Self {
        Self {
            every: every.max(1),
        }
    }

    /// Whether `iteration` is one this observer reports.
    pub fn reports(&self, iteration: usize) -> bool {
        iteration % self.every == 0
    }
}

impl TrainingObserver for LogProgress {
    fn on_iteration(&mut self, iteration: usize, num_iters: usize, loss: Float) {
        if self.reports(iteration) {
            info!("iteration {} / {}: loss {}", iteration, num_iters, loss);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_progress_default_every_100() {
        let p = LogProgress::default();
        assert!(p.reports(0));
        assert!(!p.reports(99));
        assert!(p.reports(100));
        assert!(p.reports(300));
    }

    #[test]
    fn test_log_progress_zero_interval() {
        let p = LogProgress::new(0);
        assert!(p.reports(1));
        assert!(p.reports(2));
    }

    #[test]
    fn test_closure_observer_receives_calls() {
        let mut calls = Vec::new();
        {
            let mut obs = |it: usize, total: usize, loss: Float| calls.push((it, total, loss));
            obs.on_iteration(0, 2, 0.7);
            obs.on_iteration(1, 2, 0.6);
        }
        assert_eq!(calls, vec![(0, 2, 0.7), (1, 2, 0.6)]);
    }
}
