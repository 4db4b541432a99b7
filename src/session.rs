use log::{debug, warn};

use crate::{
    dataset::Dataset,
    error::Result,
    model::{self, ModelResult},
    trainer::{IterationReport, TrainMode, Trainer},
};

/// Holds the dataset and the most recently fitted model for one run of the program.
///
/// The model is replaced by every successful fit and only ever read by
/// [`Session::predict`].
pub struct Session {
    dataset: Dataset,
    model: Option<ModelResult>,
}

impl Session {
    /// Creates a new `Session` with no model.
    pub fn new(dataset: Dataset) -> Self {
        Self {
            dataset,
            model: None,
        }
    }

    /// The last fitted model, if any.
    pub fn model(&self) -> Option<&ModelResult> {
        self.model.as_ref()
    }

    /// Fits every window of the dataset, storing each fresh model as it is produced.
    ///
    /// # Returns
    /// The per-iteration reports in ascending order.
    ///
    /// # Errors
    /// Returns the first fitting error. Models of windows fitted before the
    /// failing one stay stored. A zero-variance prefix of k points implies a
    /// zero-variance prefix of 2, so a failing run fails at its first window
    /// and leaves the model as it was before the run.
    pub fn train(&mut self, mode: TrainMode) -> Result<Vec<IterationReport>> {
        let trainer = Trainer::new(self.dataset.x(), self.dataset.y(), mode)?;
        debug!("training over {} window(s)", trainer.remaining());

        let mut reports = Vec::with_capacity(trainer.remaining());
        for report in trainer {
            let report = report.inspect_err(|e| warn!("training aborted: {e}"))?;
            self.model = Some(report.model);
            reports.push(report);
        }

        Ok(reports)
    }

    /// Predicts with the stored model.
    ///
    /// # Errors
    /// Returns `RegressionError::NoModel` if nothing has been trained yet.
    pub fn predict(&self, x: f64) -> Result<i64> {
        model::predict_with_model(self.model.as_ref(), x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegressionError;

    #[test]
    fn predicting_before_training_fails() {
        let session = Session::new(Dataset::sample());
        assert_eq!(session.predict(1.0), Err(RegressionError::NoModel));
    }

    #[test]
    fn training_keeps_the_last_window() {
        let mut session = Session::new(Dataset::sample());

        let reports = session.train(TrainMode::Fit).unwrap();

        assert_eq!(reports.len(), 15);
        assert_eq!(session.model(), Some(&reports[14].model));
    }

    #[test]
    fn failed_run_stores_nothing() {
        let dataset = Dataset::new(vec![1.0, 2.0, 3.0, 4.0], vec![2.0, 2.0, 2.0, 5.0]).unwrap();
        let mut session = Session::new(dataset);

        // Window 2 has constant y.
        assert!(session.train(TrainMode::Fit).is_err());
        assert!(session.model().is_none());
    }

    #[test]
    fn retraining_replaces_the_model() {
        let mut session = Session::new(Dataset::new(vec![1.0, 2.0], vec![1.0, 2.0]).unwrap());
        session.train(TrainMode::Fit).unwrap();
        let first = *session.model().unwrap();

        session.train(TrainMode::FitAndPredict { target: 3.0 }).unwrap();

        assert_eq!(session.model(), Some(&first));
        assert_eq!(session.predict(3.0), Ok(3));
    }
}
