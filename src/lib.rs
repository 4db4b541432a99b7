//! Simple linear regression fitted over a growing window of paired data.
//!
//! The [`regression`] module holds the pure least squares math, the
//! [`trainer`] drives it over prefixes of 2..=N points and the [`session`]
//! keeps the most recent fit around for predictions. [`cli`] is a thin
//! menu on top.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod regression;
pub mod session;
pub mod trainer;

pub use dataset::Dataset;
pub use error::{RegressionError, Result};
pub use model::{predict_with_model, ModelResult};
pub use session::Session;
pub use trainer::{run_training, IterationReport, TrainMode, Trainer};
