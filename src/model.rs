use crate::{
    error::{RegressionError, Result},
    regression,
};

/// A fitted line together with its coefficient of determination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelResult {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
}

impl ModelResult {
    /// Floored value of the fitted line at `x`.
    pub fn predict(&self, x: f64) -> i64 {
        regression::predict_floored(self.slope, self.intercept, x)
    }
}

/// Predicts with the most recently fitted model, if there is one.
///
/// # Args
/// * `model` - The stored model, `None` if nothing has been trained yet.
/// * `x` - The predictor value.
///
/// # Returns
/// `floor(slope * x + intercept)`.
///
/// # Errors
/// Returns `RegressionError::NoModel` if `model` is `None`.
pub fn predict_with_model(model: Option<&ModelResult>, x: f64) -> Result<i64> {
    model
        .map(|model| model.predict(x))
        .ok_or(RegressionError::NoModel)
}
