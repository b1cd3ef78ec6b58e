use crate::error::check_dim;
use crate::{ColumnMajorMatrix, FitError, FitResult};
use log::{debug, info};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Store the raw data: features without the bias column, and the target.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    /// Predictor for the learning
    pub features: ColumnMajorMatrix<f64>,
    /// Target, used for the learning
    pub target: Vec<f64>,
}

impl Dataset {
    pub fn new(features: ColumnMajorMatrix<f64>, target: Vec<f64>) -> FitResult<Self> {
        check_dim("target", features.n_rows(), target.len())?;
        Ok(Dataset { features, target })
    }

    /// Dataset with a single feature.
    pub fn from_feature(feature: Vec<f64>, target: Vec<f64>) -> FitResult<Self> {
        Self::new(ColumnMajorMatrix::from_columns(vec![feature])?, target)
    }

    /// Read a CSV with a header line and keep the two named numeric columns.
    pub fn from_csv_reader<R: Read>(
        reader: R,
        feature_column: &str,
        target_column: &str,
    ) -> FitResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| FitError::MissingColumn(name.to_string()))
        };
        let feature_idx = position(feature_column)?;
        let target_idx = position(target_column)?;
        debug!(
            "Columns '{}' at {} and '{}' at {}",
            feature_column, feature_idx, target_column, target_idx
        );

        let mut feature = Vec::new();
        let mut target = Vec::new();
        for (n_row, record) in reader.records().enumerate() {
            let record = record?;
            // Row numbers are 1-based, the header excluded
            let parse = |idx: usize, column: &str| -> FitResult<f64> {
                let value = record.get(idx).unwrap_or("");
                value.parse().map_err(|_| FitError::Parse {
                    row: n_row + 1,
                    column: column.to_string(),
                    value: value.to_string(),
                })
            };
            feature.push(parse(feature_idx, feature_column)?);
            target.push(parse(target_idx, target_column)?);
        }
        if target.is_empty() {
            return Err(FitError::EmptyDataset);
        }
        info!(
            "Loaded {} rows ('{}' -> '{}')",
            target.len(),
            feature_column,
            target_column
        );
        Self::from_feature(feature, target)
    }

    pub fn from_csv_path<P: AsRef<Path>>(
        path: P,
        feature_column: &str,
        target_column: &str,
    ) -> FitResult<Self> {
        let file = File::open(path.as_ref()).map_err(|err| {
            FitError::Io(format!("cannot open {}: {}", path.as_ref().display(), err))
        })?;
        Self::from_csv_reader(file, feature_column, target_column)
    }

    pub fn n_rows(&self) -> usize {
        self.target.len()
    }

    /// Values of the first feature.
    pub fn feature(&self) -> &[f64] {
        self.features.column(0)
    }

    /// Features with a leading column of ones, ready for training.
    pub fn design_matrix(&self) -> ColumnMajorMatrix<f64> {
        self.features.with_bias_column()
    }

    /// Rows in the given order.
    pub fn select(&self, indices: &[usize]) -> Dataset {
        Dataset {
            features: self.features.select_rows(indices),
            target: indices.iter().map(|&i| self.target[i]).collect(),
        }
    }

    /// Shuffle the rows with `rng` and hold out `ceil(test_fraction * n_rows)`
    /// of them. Returns `(train, test)`.
    ///
    /// The same generator state always gives the same partitions.
    pub fn train_test_split(
        &self,
        test_fraction: f64,
        rng: &mut impl Rng,
    ) -> FitResult<(Dataset, Dataset)> {
        let n_rows = self.n_rows();
        let invalid = FitError::InvalidSplit {
            test_fraction,
            n_rows,
        };
        if !(test_fraction > 0. && test_fraction < 1.) {
            return Err(invalid);
        }
        let n_test = (test_fraction * n_rows as f64).ceil() as usize;
        if n_test == 0 || n_test >= n_rows {
            return Err(invalid);
        }

        let mut indices: Vec<usize> = (0..n_rows).collect();
        indices.shuffle(rng);
        let (test_indices, train_indices) = indices.split_at(n_test);
        debug!(
            "Split {} rows into {} train and {} test",
            n_rows,
            train_indices.len(),
            test_indices.len()
        );
        Ok((self.select(train_indices), self.select(test_indices)))
    }
}
