use crate::{
    min_max, rmse, train, BatchGradientDescent, BatchParams, Dataset, FitError, FitResult,
    LinearModel,
    PlotKind, PlotSink, SgdParams, Series, StochasticGradientDescent, Strategy, TrainOutcome,
    DEFAULT_FEATURE_COLUMN, DEFAULT_SEED, DEFAULT_TARGET_COLUMN, DEFAULT_TEST_FRACTION,
};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;

/// Everything a run needs besides the data and the strategy.
///
/// Every field has a default, so a JSON configuration only lists what it
/// changes:
///
/// ```json
/// { "test_fraction": 0.3, "batch": { "learning_rate": 0.05 } }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    pub feature_column: String,
    pub target_column: String,
    /// Share of the rows held out for the test set
    pub test_fraction: f64,
    /// Seeds both the split and the stochastic sampling
    pub seed: u64,
    pub batch: BatchParams,
    pub sgd: SgdParams,
}

impl RunConfig {
    pub fn new() -> Self {
        RunConfig {
            feature_column: DEFAULT_FEATURE_COLUMN.to_string(),
            target_column: DEFAULT_TARGET_COLUMN.to_string(),
            test_fraction: DEFAULT_TEST_FRACTION,
            seed: DEFAULT_SEED,
            batch: BatchParams::new(),
            sgd: SgdParams::new(),
        }
    }

    pub fn from_json_str(json: &str) -> FitResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> FitResult<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary of a run.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Report {
    pub strategy: Strategy,
    pub theta: Vec<f64>,
    pub cost_history: Vec<f64>,
    pub converged: bool,
    pub train_rows: usize,
    pub test_rows: usize,
    pub final_cost: Option<f64>,
    pub test_rmse: f64,
}

/// Outcome of [`run_named`].
#[derive(Debug, Clone, PartialEq)]
pub enum RunStatus {
    Trained(Report),
    /// The method name was not recognized and nothing was fitted.
    Skipped(String),
}

fn fit(
    strategy: Strategy,
    config: &RunConfig,
    train_set: &Dataset,
    rng: &mut SmallRng,
) -> FitResult<TrainOutcome> {
    let x = train_set.design_matrix();
    let theta = vec![0.; x.n_cols()];
    match strategy {
        Strategy::Batch => train(
            &mut BatchGradientDescent::new(&config.batch),
            &x,
            &train_set.target,
            theta,
        ),
        Strategy::Sgd => train(
            &mut StochasticGradientDescent::new(&config.sgd, rng),
            &x,
            &train_set.target,
            theta,
        ),
    }
}

/// Split the data, fit with `strategy`, evaluate on the test rows and send
/// the plots to `sink`.
pub fn run(
    strategy: Strategy,
    config: &RunConfig,
    dataset: &Dataset,
    sink: &mut impl PlotSink,
) -> FitResult<Report> {
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let (train_set, test_set) = dataset.train_test_split(config.test_fraction, &mut rng)?;

    let outcome = fit(strategy, config, &train_set, &mut rng)?;
    let model = LinearModel::new(outcome.theta.clone());
    let yhat_test = model.par_predict(&test_set.design_matrix())?;
    let test_rmse = rmse(&test_set.target, &yhat_test);
    info!(
        "{}: theta {:?}, RMSE test {:.8}",
        strategy,
        model.theta(),
        test_rmse
    );

    let labels = (
        config.feature_column.as_str(),
        config.target_column.as_str(),
    );
    sink.plot(&Series::new(
        PlotKind::Scatter,
        "test data",
        labels,
        test_set.feature().to_vec(),
        test_set.target.clone(),
    )?)?;
    if let Some((low, high)) = min_max(test_set.feature()) {
        let ends = Dataset::from_feature(vec![low, high], vec![0., 0.])?;
        sink.plot(&Series::new(
            PlotKind::Line,
            "regression line",
            labels,
            vec![low, high],
            model.predict_features(&ends.features)?,
        )?)?;
    }
    sink.plot(&Series::new(
        PlotKind::Line,
        "cost history",
        ("iteration", "cost"),
        (1..=outcome.cost_history.len()).map(|i| i as f64).collect(),
        outcome.cost_history.clone(),
    )?)?;

    Ok(Report {
        strategy,
        final_cost: outcome.final_cost(),
        theta: outcome.theta,
        cost_history: outcome.cost_history,
        converged: outcome.converged,
        train_rows: train_set.n_rows(),
        test_rows: test_set.n_rows(),
        test_rmse,
    })
}

/// Like [`run`], with the strategy given by name.
///
/// An unknown name is not an error: the run is skipped, with a message for
/// the user, and `sink` receives nothing.
pub fn run_named(
    method: &str,
    config: &RunConfig,
    dataset: &Dataset,
    sink: &mut impl PlotSink,
) -> FitResult<RunStatus> {
    match method.parse::<Strategy>() {
        Ok(strategy) => Ok(RunStatus::Trained(run(strategy, config, dataset, sink)?)),
        Err(err @ FitError::InvalidStrategyName(_)) => {
            warn!("{}", err);
            Ok(RunStatus::Skipped(format!("{}. Nothing was trained.", err)))
        }
        Err(err) => Err(err),
    }
}
