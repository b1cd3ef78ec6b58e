use std::{error, fmt, io};

#[derive(Debug, Clone, PartialEq)]
/// Error raised while loading data or fitting a model.
///
/// Numeric trouble (divergence, NaN) is not an error: it flows through the
/// cost history and the parameters.
pub enum FitError {
    /// Lengths of features, parameters or targets disagree.
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
    /// A computation needs at least one row.
    EmptyDataset,
    /// The optimization method name is neither `batch` nor `sgd`.
    InvalidStrategyName(String),
    /// The test fraction leaves one of the partitions empty.
    InvalidSplit { test_fraction: f64, n_rows: usize },
    /// A named column is absent from the CSV header.
    MissingColumn(String),
    /// A cell could not be read as a number.
    Parse {
        row: usize,
        column: String,
        value: String,
    },
    /// Error coming from the underlying reader, writer or decoder.
    Io(String),
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FitError::DimensionMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "dimension mismatch on {}: expected {}, found {}",
                what, expected, found
            ),
            FitError::EmptyDataset => f.write_str("the dataset has no rows"),
            FitError::InvalidStrategyName(name) => write!(
                f,
                "unknown optimization method '{}', expected 'batch' or 'sgd'",
                name
            ),
            FitError::InvalidSplit {
                test_fraction,
                n_rows,
            } => write!(
                f,
                "test fraction {} cannot split {} rows into two non-empty sets",
                test_fraction, n_rows
            ),
            FitError::MissingColumn(column) => write!(f, "column '{}' not found", column),
            FitError::Parse { row, column, value } => write!(
                f,
                "row {}: cannot parse '{}' in column '{}' as a number",
                row, value, column
            ),
            FitError::Io(msg) => f.write_str(msg),
        }
    }
}

impl error::Error for FitError {}

impl From<io::Error> for FitError {
    fn from(err: io::Error) -> Self {
        FitError::Io(err.to_string())
    }
}

impl From<csv::Error> for FitError {
    fn from(err: csv::Error) -> Self {
        FitError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FitError {
    fn from(err: serde_json::Error) -> Self {
        FitError::Io(err.to_string())
    }
}

pub type FitResult<T> = Result<T, FitError>;

/// Check that `found` equals `expected`, naming the offending quantity.
pub(crate) fn check_dim(what: &'static str, expected: usize, found: usize) -> FitResult<()> {
    if expected != found {
        return Err(FitError::DimensionMismatch {
            what,
            expected,
            found,
        });
    }
    Ok(())
}
