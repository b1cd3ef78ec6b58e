use crate::{ColumnMajorMatrix, FitResult, StridedVecView};

/// `X·theta` for bias augmented rows.
pub fn predict(theta: &[f64], x: &ColumnMajorMatrix<f64>) -> FitResult<Vec<f64>> {
    x.dot_vec(theta)
}

/// Trained parameters, the intercept first.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LinearModel {
    theta: Vec<f64>,
}

impl LinearModel {
    pub fn new(theta: Vec<f64>) -> Self {
        Self { theta }
    }

    pub fn theta(&self) -> &[f64] {
        &self.theta
    }

    /// First parameter, None for an empty model.
    pub fn intercept(&self) -> Option<f64> {
        self.theta.first().cloned()
    }

    /// Prediction for one bias augmented row.
    pub fn predict(&self, features: &StridedVecView<f64>) -> FitResult<f64> {
        features.dot(&self.theta)
    }

    /// Predictions for bias augmented rows.
    pub fn par_predict(&self, x: &ColumnMajorMatrix<f64>) -> FitResult<Vec<f64>> {
        predict(&self.theta, x)
    }

    /// Predictions for raw rows: the bias column is added first.
    pub fn predict_features(&self, features: &ColumnMajorMatrix<f64>) -> FitResult<Vec<f64>> {
        predict(&self.theta, &features.with_bias_column())
    }
}
