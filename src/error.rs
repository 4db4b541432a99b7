use std::fmt;

/// The result type used by the regression core.
pub type Result<T> = std::result::Result<T, RegressionError>;

/// Which of the two sequences a variance check refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Errors produced while fitting or querying a regression model.
#[derive(Debug, Clone, PartialEq)]
pub enum RegressionError {
    /// The predictor and response sequences have different lengths.
    LengthMismatch { x: usize, y: usize },

    /// A mean was requested over zero elements.
    EmptyInput,

    /// Every value of one axis inside the window is identical, so a
    /// denominator of the fit is zero.
    DegenerateVariance {
        /// The axis with zero variance.
        of: Axis,
        /// Number of points in the window being fitted.
        window: usize,
    },

    /// A prediction was requested before any model was fitted.
    NoModel,
}

impl fmt::Display for RegressionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegressionError::LengthMismatch { x, y } => {
                write!(f, "length mismatch: x has {x} values, y has {y}")
            }
            RegressionError::EmptyInput => write!(f, "cannot take the mean of an empty sequence"),
            RegressionError::DegenerateVariance { of, window } => write!(
                f,
                "degenerate variance: all {of} values are identical in a window of {window}"
            ),
            RegressionError::NoModel => write!(f, "no model has been trained yet"),
        }
    }
}

impl std::error::Error for RegressionError {}
