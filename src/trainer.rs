use log::info;

use crate::{
    error::{RegressionError, Result},
    model::ModelResult,
    regression,
};

/// Smallest window that can be fitted.
pub const MIN_WINDOW: usize = 2;

/// What the trainer does after every fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrainMode {
    /// Fit only.
    Fit,
    /// Fit, then predict the response for `target` with the fresh model.
    FitAndPredict { target: f64 },
}

/// Outcome of fitting one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationReport {
    /// 1-based iteration number, always `window - 1`.
    pub iteration: usize,
    /// Number of points the model was fitted on.
    pub window: usize,
    pub model: ModelResult,
    /// Floored prediction, only in [`TrainMode::FitAndPredict`].
    pub prediction: Option<i64>,
}

/// Fits the data over growing prefixes, from [`MIN_WINDOW`] points up to all of them.
///
/// Yields one report per window in ascending order. The first error ends
/// the iteration; no further windows are fitted after it.
pub struct Trainer<'a> {
    x: &'a [f64],
    y: &'a [f64],
    mode: TrainMode,
    window: usize,
    failed: bool,
}

impl<'a> Trainer<'a> {
    /// Creates a new `Trainer`.
    ///
    /// # Args
    /// * `x` - Predictor values.
    /// * `y` - Response values, index-aligned with `x`.
    /// * `mode` - Whether to predict after every fit.
    ///
    /// # Errors
    /// Returns `RegressionError::LengthMismatch` if `x` and `y` differ in
    /// length. Nothing is fitted in that case.
    pub fn new(x: &'a [f64], y: &'a [f64], mode: TrainMode) -> Result<Self> {
        if x.len() != y.len() {
            return Err(RegressionError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        Ok(Self {
            x,
            y,
            mode,
            window: MIN_WINDOW,
            failed: false,
        })
    }

    /// Number of windows still to be fitted.
    pub fn remaining(&self) -> usize {
        if self.failed {
            return 0;
        }
        (self.x.len() + 1).saturating_sub(self.window)
    }

    fn step(&self, window: usize) -> Result<IterationReport> {
        let iteration = window - 1;
        let model = regression::fit(&self.x[..window], &self.y[..window])?;

        info!(
            iteration = iteration,
            slope = model.slope,
            intercept = model.intercept,
            r_squared = model.r_squared;
            "iteration {iteration}: slope={} intercept={} r_squared={}",
            model.slope,
            model.intercept,
            model.r_squared
        );

        let prediction = match self.mode {
            TrainMode::Fit => None,
            TrainMode::FitAndPredict { target } => {
                let predicate = model.predict(target);
                info!(iteration = iteration, predicate = predicate; "predicate: {predicate}");
                Some(predicate)
            }
        };

        Ok(IterationReport {
            iteration,
            window,
            model,
            prediction,
        })
    }
}

impl Iterator for Trainer<'_> {
    type Item = Result<IterationReport>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.window > self.x.len() {
            return None;
        }

        let window = self.window;
        self.window += 1;

        let report = self.step(window);
        self.failed = report.is_err();
        Some(report)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

/// Runs every window to completion and collects the reports.
///
/// # Errors
/// Returns `RegressionError::LengthMismatch` before fitting anything if the
/// sequences differ in length, or the first fitting error otherwise.
pub fn run_training(x: &[f64], y: &[f64], mode: TrainMode) -> Result<Vec<IterationReport>> {
    Trainer::new(x, y, mode)?.collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::error::Axis;

    #[test]
    fn yields_one_report_per_window() {
        let x = [1.0, 2.0, 4.0, 7.0, 11.0];
        let y = [3.0, 1.0, 4.0, 1.0, 5.0];

        let reports = run_training(&x, &y, TrainMode::Fit).unwrap();

        assert_eq!(reports.len(), x.len() - 1);
        for (i, report) in reports.iter().enumerate() {
            assert_eq!(report.iteration, i + 1);
            assert_eq!(report.window, i + 2);
            assert_eq!(report.prediction, None);
        }
    }

    #[test]
    fn predicts_after_every_fit() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];

        let reports = run_training(&x, &y, TrainMode::FitAndPredict { target: 10.5 }).unwrap();

        assert_eq!(reports.len(), 3);
        let last = reports.last().unwrap();
        assert_abs_diff_eq!(last.model.slope, 2.0, epsilon = 1e-9);
        assert_abs_diff_eq!(last.model.intercept, 0.0, epsilon = 1e-9);
        assert!(reports.iter().all(|r| r.prediction == Some(21)));
    }

    #[test]
    fn mismatched_lengths_fail_before_fitting() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y = [1.0, 2.0, 3.0, 4.0];

        assert_eq!(
            Trainer::new(&x, &y, TrainMode::Fit).err(),
            Some(RegressionError::LengthMismatch { x: 5, y: 4 })
        );
    }

    #[test]
    fn stops_at_the_first_degenerate_window() {
        let x = [1.0, 1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0, 4.0];

        let mut trainer = Trainer::new(&x, &y, TrainMode::Fit).unwrap();

        assert_eq!(
            trainer.next(),
            Some(Err(RegressionError::DegenerateVariance {
                of: Axis::X,
                window: 2
            }))
        );
        assert_eq!(trainer.next(), None);
        assert_eq!(trainer.remaining(), 0);
    }

    #[test]
    fn fewer_than_two_points_yield_nothing() {
        assert!(run_training(&[1.0], &[2.0], TrainMode::Fit).unwrap().is_empty());
        assert!(run_training(&[], &[], TrainMode::Fit).unwrap().is_empty());
    }

    #[test]
    fn remaining_counts_down() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 2.0];
        let mut trainer = Trainer::new(&x, &y, TrainMode::Fit).unwrap();

        assert_eq!(trainer.remaining(), 2);
        trainer.next();
        assert_eq!(trainer.remaining(), 1);
        trainer.next();
        assert_eq!(trainer.remaining(), 0);
        assert!(trainer.next().is_none());
    }
}
