//! Fit median house value against median income.
//!
//! # Usage
//!
//! ```bash
//! rlinreg --data housing.csv --method batch --plot plots.csv
//! ```
//!
//! The CSV needs a header line with the feature and target columns
//! (`MedInc` and `MedHouseVal` unless the configuration says otherwise).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};
use rlinreg::{run_named, CsvPlotSink, Dataset, PlotSink, Report, RunConfig, RunStatus, Series};

/// Univariate linear regression by gradient descent.
#[derive(Parser, Debug)]
#[command(name = "rlinreg")]
#[command(about = "Fit median house value from median income with batch or stochastic gradient descent")]
struct Args {
    /// Path to the CSV dataset
    #[arg(long)]
    data: PathBuf,

    /// Optimization method: batch or sgd
    #[arg(short, long, default_value = "batch")]
    method: String,

    /// JSON run configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Learning rate, for both methods
    #[arg(long)]
    learning_rate: Option<f64>,

    /// Maximum number of batch iterations
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Batch convergence tolerance on the cost change
    #[arg(long)]
    tolerance: Option<f64>,

    /// Number of stochastic iterations
    #[arg(long)]
    iterations: Option<usize>,

    /// Share of rows held out for testing
    #[arg(long)]
    test_fraction: Option<f64>,

    /// Random seed for the split and the stochastic sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Write the plot series to this CSV file
    #[arg(long)]
    plot: Option<PathBuf>,
}

impl Args {
    /// Configuration file (or defaults), then command line overrides.
    fn run_config(&self) -> anyhow::Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_path(path)
                .with_context(|| format!("Failed to read configuration {}", path.display()))?,
            None => RunConfig::default(),
        };
        if let Some(learning_rate) = self.learning_rate {
            config.batch.learning_rate = learning_rate;
            config.sgd.learning_rate = learning_rate;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.batch.max_iterations = max_iterations;
        }
        if let Some(tolerance) = self.tolerance {
            config.batch.tolerance = tolerance;
        }
        if let Some(iterations) = self.iterations {
            config.sgd.iterations = iterations;
        }
        if let Some(test_fraction) = self.test_fraction {
            config.test_fraction = test_fraction;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        Ok(config)
    }
}

fn print_report(report: &Report) {
    println!("Method: {}", report.strategy);
    println!(
        "Rows: {} train, {} test",
        report.train_rows, report.test_rows
    );
    println!("Theta: {:?}", report.theta);
    println!(
        "Iterations: {}{}",
        report.cost_history.len(),
        if report.converged { " (converged)" } else { "" }
    );
    if let Some(cost) = report.final_cost {
        println!("Final cost: {:.8}", cost);
    }
    println!("RMSE test: {:.8}", report.test_rmse);
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = args.run_config()?;
    info!("Configuration: {:?}", config);
    let dataset = Dataset::from_csv_path(&args.data, &config.feature_column, &config.target_column)
        .with_context(|| format!("Failed to load {}", args.data.display()))?;

    // Series are kept in memory so that a skipped run leaves no plot file.
    let mut series: Vec<Series> = Vec::new();
    let report = match run_named(&args.method, &config, &dataset, &mut series)? {
        RunStatus::Trained(report) => report,
        RunStatus::Skipped(message) => {
            println!("{}", message);
            return Ok(());
        }
    };
    if let Some(path) = &args.plot {
        let mut sink = CsvPlotSink::from_path(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        for s in &series {
            sink.plot(s)?;
        }
        info!("Plot series written to {}", path.display());
    }
    if report.cost_history.iter().any(|c| !c.is_finite()) {
        warn!("The cost is not finite: try a smaller learning rate");
    }
    print_report(&report);
    Ok(())
}
