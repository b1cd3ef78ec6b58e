use crate::cost::check_problem;
use crate::{
    ColumnMajorMatrix, FitResult, Optimizer, Termination, DEFAULT_LEARNING_RATE,
    DEFAULT_SGD_ITERATIONS,
};
use rand::Rng;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SgdParams {
    pub learning_rate: f64,
    pub iterations: usize,
}

impl SgdParams {
    pub fn new() -> Self {
        SgdParams {
            learning_rate: DEFAULT_LEARNING_RATE,
            iterations: DEFAULT_SGD_ITERATIONS,
        }
    }
}

impl Default for SgdParams {
    fn default() -> Self {
        Self::new()
    }
}

/// Gradient descent on one uniformly drawn row per step.
///
/// The row index comes from the generator given at construction, so a seeded
/// generator gives a reproducible run. The training loop still records the
/// cost over the whole dataset after each step.
pub struct StochasticGradientDescent<R: Rng> {
    params: SgdParams,
    rng: R,
}

impl<R: Rng> StochasticGradientDescent<R> {
    pub fn new(params: &SgdParams, rng: R) -> Self {
        Self {
            params: params.clone(),
            rng,
        }
    }
}

impl<R: Rng> Optimizer for StochasticGradientDescent<R> {
    fn step(
        &mut self,
        theta: &mut [f64],
        x: &ColumnMajorMatrix<f64>,
        y: &[f64],
    ) -> FitResult<()> {
        check_problem(theta, x, y)?;
        let n_row = self.rng.gen_range(0..x.n_rows());
        let row = x.row(n_row);
        let error = row.dot(theta)? - y[n_row];
        for (col, t) in theta.iter_mut().enumerate() {
            *t -= self.params.learning_rate * row[col] * error;
        }
        Ok(())
    }

    fn n_iterations(&self) -> usize {
        self.params.iterations
    }

    fn termination(&self) -> Termination {
        Termination::FixedIterations
    }

    fn name(&self) -> &'static str {
        "stochastic gradient descent"
    }
}
