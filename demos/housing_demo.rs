//! Fit both methods on synthetic housing data and write the predictions.
//!
//! ```bash
//! cargo run --example housing_demo
//! ```

use rand::prelude::{Rng, SeedableRng, SmallRng};
use rlinreg::{rmse, run, CsvPlotSink, Dataset, LinearModel, RunConfig, Strategy};
use std::error::Error;
use std::fs::File;
use std::time::Instant;

/// Incomes between 0.5 and 15 (tens of thousands), values capped at 5 like the census table.
fn synthetic_housing(n_rows: usize, rng: &mut impl Rng) -> Result<Dataset, Box<dyn Error>> {
    let income: Vec<f64> = (0..n_rows).map(|_| rng.gen_range(0.5..15.)).collect();
    let value = income
        .iter()
        .map(|x| (0.45 + 0.42 * x + rng.gen_range(-0.6..0.6)).max(0.15).min(5.))
        .collect();
    Ok(Dataset::from_feature(income, value)?)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = SmallRng::seed_from_u64(20_640);
    let dataset = synthetic_housing(20_640, &mut rng)?;

    let mut config = RunConfig::default();
    config.batch.learning_rate = 0.02;
    config.batch.max_iterations = 5000;
    config.batch.tolerance = 1e-7;
    config.sgd.iterations = 5000;
    config.sgd.learning_rate = 0.002;
    println!("Config {:?}", config);

    let file = File::create("housing_demo.csv")?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(&["method", "income", "true_val", "yhat"])?;

    for &strategy in &[Strategy::Batch, Strategy::Sgd] {
        let train_start_time = Instant::now();
        let plot_path = format!("housing_demo_{}_plots.csv", strategy);
        let mut sink = CsvPlotSink::from_path(&plot_path)?;
        let report = run(strategy, &config, &dataset, &mut sink)?;
        println!(
            "{}: {} iterations in {:.2} secs, theta {:?}, RMSE test {:.6}",
            strategy,
            report.cost_history.len(),
            train_start_time.elapsed().as_secs_f64(),
            report.theta,
            report.test_rmse
        );
        println!("Plots written to {}", plot_path);

        let model = LinearModel::new(report.theta);
        if let Some(intercept) = model.intercept() {
            println!("{}: intercept {:.6}", strategy, intercept);
        }
        let yhat = model.predict_features(&dataset.features)?;
        println!(
            "{}: RMSE on the whole table {:.6}",
            strategy,
            rmse(&dataset.target, &yhat)
        );
        for ((income, true_val), yhat) in dataset.feature().iter().zip(&dataset.target).zip(&yhat) {
            wtr.write_record(&[
                strategy.as_str(),
                &income.to_string(),
                &true_val.to_string(),
                &yhat.to_string(),
            ])?;
        }
    }
    wtr.flush()?;
    println!("Predictions written to housing_demo.csv");
    Ok(())
}
