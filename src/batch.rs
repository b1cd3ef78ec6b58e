use crate::cost::residuals;
use crate::{
    ColumnMajorMatrix, FitResult, Optimizer, Termination, DEFAULT_LEARNING_RATE,
    DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BatchParams {
    pub learning_rate: f64,
    pub max_iterations: usize,
    /// Stop once two consecutive costs differ by less than this.
    pub tolerance: f64,
}

impl BatchParams {
    pub fn new() -> Self {
        BatchParams {
            learning_rate: DEFAULT_LEARNING_RATE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl Default for BatchParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Gradient descent on the full dataset.
///
/// Every step uses the gradient of the cost over all rows, so the run is
/// deterministic.
#[derive(Debug, Clone)]
pub struct BatchGradientDescent {
    params: BatchParams,
}

impl BatchGradientDescent {
    pub fn new(params: &BatchParams) -> Self {
        Self {
            params: params.clone(),
        }
    }

    /// Gradient of the cost: `1/m * Xᵗ·(X·theta - y)`.
    pub fn gradient(theta: &[f64], x: &ColumnMajorMatrix<f64>, y: &[f64]) -> FitResult<Vec<f64>> {
        let errors = residuals(theta, x, y)?;
        let m = y.len() as f64;
        let mut gradient = x.transpose_dot_vec(&errors)?;
        for g in gradient.iter_mut() {
            *g /= m;
        }
        Ok(gradient)
    }
}

impl Optimizer for BatchGradientDescent {
    fn step(
        &mut self,
        theta: &mut [f64],
        x: &ColumnMajorMatrix<f64>,
        y: &[f64],
    ) -> FitResult<()> {
        let gradient = Self::gradient(theta, x, y)?;
        for (t, g) in theta.iter_mut().zip(gradient) {
            *t -= self.params.learning_rate * g;
        }
        Ok(())
    }

    fn n_iterations(&self) -> usize {
        self.params.max_iterations
    }

    fn termination(&self) -> Termination {
        Termination::CostDelta {
            tolerance: self.params.tolerance,
        }
    }

    fn name(&self) -> &'static str {
        "batch gradient descent"
    }
}
