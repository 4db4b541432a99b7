use std::{error::Error, fmt, fs, io, path::Path};

use serde::Deserialize;

use crate::error::RegressionError;

/// Population per region, used as the predictor of the built-in sample.
const POPULATION: [f64; 16] = [
    2908457.0, 2090836.0, 2151836.0, 1020767.0, 2508464.0, 3364176.0, 5324519.0, 1002575.0,
    2128483.0, 1193348.0, 2298811.0, 4593358.0, 1265415.0, 1445478.0, 3469464.0, 1717970.0,
];

/// Marriages per region, index-aligned with [`POPULATION`].
const MARRIAGES: [f64; 16] = [
    13599.0, 10294.0, 10911.0, 4875.0, 11405.0, 17361.0, 24924.0, 4822.0, 11287.0, 6135.0,
    11461.0, 22765.0, 6051.0, 6978.0, 17437.0, 8183.0,
];

/// Errors produced while loading a dataset file.
#[derive(Debug)]
pub enum DatasetError {
    /// The file could not be read.
    Io(io::Error),
    /// The file is not a valid `{"x": [...], "y": [...]}` document.
    Parse(serde_json::Error),
    /// The document parsed but its sequences are unusable.
    Invalid(RegressionError),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "io error: {e}"),
            DatasetError::Parse(e) => write!(f, "invalid dataset JSON: {e}"),
            DatasetError::Invalid(e) => write!(f, "invalid dataset: {e}"),
        }
    }
}

impl Error for DatasetError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            DatasetError::Parse(e) => Some(e),
            DatasetError::Invalid(e) => Some(e),
        }
    }
}

impl From<io::Error> for DatasetError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<RegressionError> for DatasetError {
    fn from(value: RegressionError) -> Self {
        Self::Invalid(value)
    }
}

#[derive(Deserialize)]
struct RawDataset {
    x: Vec<f64>,
    y: Vec<f64>,
}

/// Two index-aligned sequences of equal length.
///
/// The `i`-th value of `x` is the predictor for the `i`-th value of `y`.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Args
    /// * `x` - The predictor values.
    /// * `y` - The response values.
    ///
    /// # Errors
    /// Returns `RegressionError::LengthMismatch` if `x` and `y` differ in length.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, RegressionError> {
        if x.len() != y.len() {
            return Err(RegressionError::LengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }

        Ok(Self { x, y })
    }

    /// The built-in sample: population against marriages for 16 regions.
    pub fn sample() -> Self {
        Self {
            x: POPULATION.to_vec(),
            y: MARRIAGES.to_vec(),
        }
    }

    /// Parses a dataset from a JSON document of the form `{"x": [...], "y": [...]}`.
    ///
    /// # Errors
    /// Returns `DatasetError::Parse` on malformed JSON and
    /// `DatasetError::Invalid` when the sequences differ in length.
    pub fn from_json(content: &str) -> Result<Self, DatasetError> {
        let RawDataset { x, y } = serde_json::from_str(content)?;
        Ok(Self::new(x, y)?)
    }

    /// Reads and parses a dataset file.
    ///
    /// # Errors
    /// Returns `DatasetError::Io` if the file cannot be read, otherwise the
    /// errors of [`Dataset::from_json`].
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Number of paired points.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_sequences_of_different_length() {
        let err =
            Dataset::new(vec![1.0, 2.0, 3.0, 4.0, 5.0], vec![1.0, 2.0, 3.0, 4.0]).unwrap_err();
        assert_eq!(err, RegressionError::LengthMismatch { x: 5, y: 4 });
    }

    #[test]
    fn sample_is_aligned() {
        let sample = Dataset::sample();
        assert_eq!(sample.len(), 16);
        assert_eq!(sample.x().len(), sample.y().len());
    }

    #[test]
    fn parses_json_document() {
        let dataset = Dataset::from_json(r#"{"x": [1, 2.5], "y": [3, 4]}"#).unwrap();
        assert_eq!(dataset.x(), &[1.0, 2.5]);
        assert_eq!(dataset.y(), &[3.0, 4.0]);
    }

    #[test]
    fn json_with_mismatched_lengths_is_invalid() {
        let err = Dataset::from_json(r#"{"x": [1, 2], "y": [3]}"#).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::Invalid(RegressionError::LengthMismatch { x: 2, y: 1 })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = Dataset::from_json(r#"{"x": [1, 2]"#).unwrap_err();
        assert!(matches!(err, DatasetError::Parse(_)));
    }
}
