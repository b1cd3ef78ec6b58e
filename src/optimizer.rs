use crate::cost::{check_problem, compute_cost};
use crate::{ColumnMajorMatrix, FitResult, LinearModel};
use log::{debug, info};
use std::time::Instant;

/// Log the cost every this many iterations.
static LOG_EVERY: usize = 100;

/// When the training loop stops before its iteration budget is spent.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub enum Termination {
    /// Always run the full number of iterations.
    FixedIterations,
    /// Stop once two consecutive costs differ by less than `tolerance`.
    CostDelta { tolerance: f64 },
}

impl Termination {
    /// Whether the recorded costs allow the loop to stop now.
    pub fn should_stop(&self, cost_history: &[f64]) -> bool {
        match *self {
            Termination::FixedIterations => false,
            Termination::CostDelta { tolerance } => match cost_history {
                [.., previous, current] => (current - previous).abs() < tolerance,
                _ => false,
            },
        }
    }
}

/// An iterative optimizer of the linear regression parameters.
///
/// `step` applies one update to `theta` in place. The training loop around it
/// is shared: see [`train`].
pub trait Optimizer {
    fn step(&mut self, theta: &mut [f64], x: &ColumnMajorMatrix<f64>, y: &[f64])
        -> FitResult<()>;

    /// Iteration budget of a training run.
    fn n_iterations(&self) -> usize;

    fn termination(&self) -> Termination;

    fn name(&self) -> &'static str;
}

/// Result of a training run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TrainOutcome {
    pub theta: Vec<f64>,
    /// Full dataset cost after each update
    pub cost_history: Vec<f64>,
    /// True when the termination policy stopped the loop early
    pub converged: bool,
}

impl TrainOutcome {
    pub fn final_cost(&self) -> Option<f64> {
        self.cost_history.last().cloned()
    }

    pub fn n_iterations(&self) -> usize {
        self.cost_history.len()
    }

    pub fn into_model(self) -> LinearModel {
        LinearModel::new(self.theta)
    }
}

/// Run `optimizer` from `theta` until its termination policy or its iteration
/// budget stops it, recording the full dataset cost after every update.
///
/// `x` must already carry the bias column.
pub fn train(
    optimizer: &mut impl Optimizer,
    x: &ColumnMajorMatrix<f64>,
    y: &[f64],
    mut theta: Vec<f64>,
) -> FitResult<TrainOutcome> {
    check_problem(&theta, x, y)?;

    let n_iterations = optimizer.n_iterations();
    let termination = optimizer.termination();
    let train_start_time = Instant::now();
    info!(
        "Training with {} on {} rows, at most {} iterations",
        optimizer.name(),
        x.n_rows(),
        n_iterations
    );

    let mut cost_history = Vec::with_capacity(n_iterations);
    let mut converged = false;
    for iter_cnt in 0..n_iterations {
        optimizer.step(&mut theta, x, y)?;
        let cost = compute_cost(&theta, x, y)?;
        cost_history.push(cost);
        if iter_cnt % LOG_EVERY == 0 {
            debug!("Iter {}, cost {:.10}, theta {:?}", iter_cnt, cost, theta);
        }

        if termination.should_stop(&cost_history) {
            converged = true;
            break;
        }
    }

    info!(
        "Training with {} finished after {} iterations{}. Elapsed: {:.3} secs",
        optimizer.name(),
        cost_history.len(),
        if converged { " (converged)" } else { "" },
        train_start_time.elapsed().as_secs_f64()
    );
    Ok(TrainOutcome {
        theta,
        cost_history,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FitError;

    /// Moves theta a fixed amount towards the target each step.
    struct ConstantStep {
        n_iterations: usize,
        termination: Termination,
    }

    impl Optimizer for ConstantStep {
        fn step(
            &mut self,
            theta: &mut [f64],
            _x: &ColumnMajorMatrix<f64>,
            _y: &[f64],
        ) -> FitResult<()> {
            theta[0] += 0.5;
            Ok(())
        }

        fn n_iterations(&self) -> usize {
            self.n_iterations
        }

        fn termination(&self) -> Termination {
            self.termination
        }

        fn name(&self) -> &'static str {
            "constant step"
        }
    }

    fn problem() -> (ColumnMajorMatrix<f64>, Vec<f64>) {
        let x = ColumnMajorMatrix::from_rows(vec![vec![1.], vec![1.]]).unwrap();
        (x, vec![2., 2.])
    }

    #[test]
    fn test_should_stop() {
        let policy = Termination::CostDelta { tolerance: 0.1 };
        assert!(!policy.should_stop(&[]));
        assert!(!policy.should_stop(&[1.]));
        assert!(!policy.should_stop(&[1., 0.5]));
        assert!(policy.should_stop(&[1., 0.5, 0.45]));
        assert!(!Termination::FixedIterations.should_stop(&[1., 1., 1.]));
    }

    #[test]
    fn test_driver_fixed_iterations() {
        let (x, y) = problem();
        let mut optimizer = ConstantStep {
            n_iterations: 3,
            termination: Termination::FixedIterations,
        };
        let outcome = train(&mut optimizer, &x, &y, vec![0.]).unwrap();
        assert_eq!(outcome.theta, vec![1.5]);
        // cost = (theta - 2)^2 / 2
        assert_eq!(outcome.cost_history, vec![1.125, 0.5, 0.125]);
        assert!(!outcome.converged);
        assert_eq!(outcome.final_cost(), Some(0.125));
    }

    #[test]
    fn test_driver_stops_on_cost_delta() {
        let (x, y) = problem();
        let mut optimizer = ConstantStep {
            n_iterations: 10,
            // costs 1.125, 0.5, 0.125, 0: first delta under 0.2 is the last one
            termination: Termination::CostDelta { tolerance: 0.2 },
        };
        let outcome = train(&mut optimizer, &x, &y, vec![0.]).unwrap();
        assert_eq!(outcome.n_iterations(), 4);
        assert!(outcome.converged);
    }

    #[test]
    fn test_driver_checks_dimensions() {
        let (x, y) = problem();
        let mut optimizer = ConstantStep {
            n_iterations: 1,
            termination: Termination::FixedIterations,
        };
        let err = train(&mut optimizer, &x, &y, vec![0., 0.]).unwrap_err();
        assert_eq!(
            err,
            FitError::DimensionMismatch {
                what: "theta",
                expected: 1,
                found: 2
            }
        );
    }
}
