//! Ordinary least squares over one predictor.
//!
//! Apart from debug logging every function here is pure: it takes slices of
//! the current window and returns a value or a [`RegressionError`]. A zero denominator is always
//! reported as [`RegressionError::DegenerateVariance`] instead of being
//! allowed to turn into `inf` or `NaN`.

use log::debug;

use crate::{
    error::{Axis, RegressionError, Result},
    model::ModelResult,
};

/// Arithmetic mean of `values`.
///
/// # Errors
/// Returns `RegressionError::EmptyInput` if `values` is empty.
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(RegressionError::EmptyInput);
    }

    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Least squares slope `Σ(xi - x̄)(yi - ȳ) / Σ(xi - x̄)²`.
///
/// # Args
/// * `x` - Predictor values of the window.
/// * `y` - Response values of the window, index-aligned with `x`.
/// * `x_mean` - Mean of `x`.
/// * `y_mean` - Mean of `y`.
///
/// # Errors
/// * `RegressionError::LengthMismatch` if the slices differ in length.
/// * `RegressionError::DegenerateVariance` if all `x` are identical.
pub fn fit_slope(x: &[f64], y: &[f64], x_mean: f64, y_mean: f64) -> Result<f64> {
    check_lengths(x, y)?;

    let (covariance, x_spread) = x
        .iter()
        .zip(y)
        .fold((0.0_f64, 0.0_f64), |(cov, spread), (xi, yi)| {
            let dx = xi - x_mean;
            (cov + dx * (yi - y_mean), spread + dx * dx)
        });
    debug!(
        window = x.len(),
        covariance_sum = covariance,
        spread_sum = x_spread;
        "window {}: covariance_sum={covariance} spread_sum={x_spread}",
        x.len()
    );

    if x_spread == 0.0 || is_constant(x) {
        return Err(RegressionError::DegenerateVariance {
            of: Axis::X,
            window: x.len(),
        });
    }

    Ok(covariance / x_spread)
}

/// Intercept of the fitted line, `ȳ - slope·x̄`.
pub fn fit_intercept(slope: f64, x_mean: f64, y_mean: f64) -> f64 {
    y_mean - slope * x_mean
}

/// Raw value of the line at `x`.
pub fn predict(slope: f64, intercept: f64, x: f64) -> f64 {
    slope * x + intercept
}

/// Value of the line at `x`, floored to a whole count for reporting.
///
/// Only displayed predictions go through here; the coefficient of
/// determination works on [`predict`].
pub fn predict_floored(slope: f64, intercept: f64, x: f64) -> i64 {
    predict(slope, intercept, x).floor() as i64
}

/// Coefficient of determination `Σ(ŷi - ȳ)² / Σ(yi - ȳ)²`.
///
/// `ŷi` is the unfloored prediction for `xi`.
///
/// # Errors
/// * `RegressionError::LengthMismatch` if the slices differ in length.
/// * `RegressionError::DegenerateVariance` if all `y` are identical.
pub fn r_squared(slope: f64, intercept: f64, y_mean: f64, x: &[f64], y: &[f64]) -> Result<f64> {
    check_lengths(x, y)?;

    let explained: f64 = x
        .iter()
        .map(|&xi| (predict(slope, intercept, xi) - y_mean).powi(2))
        .sum();
    let total: f64 = y.iter().map(|yi| (yi - y_mean).powi(2)).sum();

    if total == 0.0 || is_constant(y) {
        return Err(RegressionError::DegenerateVariance {
            of: Axis::Y,
            window: y.len(),
        });
    }

    Ok(explained / total)
}

/// Fits a line through every point of `x` and `y`.
///
/// # Errors
/// Propagates the errors of [`mean`], [`fit_slope`] and [`r_squared`].
pub fn fit(x: &[f64], y: &[f64]) -> Result<ModelResult> {
    check_lengths(x, y)?;

    let x_mean = mean(x)?;
    let y_mean = mean(y)?;

    let slope = fit_slope(x, y, x_mean, y_mean)?;
    let intercept = fit_intercept(slope, x_mean, y_mean);
    let r_squared = r_squared(slope, intercept, y_mean, x, y)?;

    Ok(ModelResult {
        slope,
        intercept,
        r_squared,
    })
}

fn check_lengths(x: &[f64], y: &[f64]) -> Result<()> {
    if x.len() != y.len() {
        return Err(RegressionError::LengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    Ok(())
}

// A sum of identical values can leave rounding residue in the mean, so the
// spread is not guaranteed to be exactly zero.
fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}
