use rlinreg::{
    run, run_named, train, BatchGradientDescent, BatchParams, CsvPlotSink, Dataset, FitError,
    NoPlot, RunConfig, RunStatus, Strategy,
};

/// Housing-like table: house value grows with income, plus a small wobble.
fn housing_csv(n_rows: usize) -> String {
    let mut csv = String::from("MedInc,HouseAge,MedHouseVal\n");
    for i in 0..n_rows {
        let income = 1. + (i % 97) as f64 * 0.08;
        let wobble = ((i * 37) % 11) as f64 / 100. - 0.05;
        let value = 0.45 + 0.42 * income + wobble;
        csv.push_str(&format!("{:.4},{},{:.4}\n", income, i % 50, value));
    }
    csv
}

fn housing(n_rows: usize) -> Dataset {
    Dataset::from_csv_reader(housing_csv(n_rows).as_bytes(), "MedInc", "MedHouseVal").unwrap()
}

#[test_log::test]
fn batch_run_recovers_the_trend() {
    let dataset = housing(500);
    let mut config = RunConfig::default();
    config.batch.learning_rate = 0.05;
    config.batch.max_iterations = 5000;
    config.batch.tolerance = 1e-10;

    let report = run(Strategy::Batch, &config, &dataset, &mut NoPlot).unwrap();
    assert_eq!(report.train_rows + report.test_rows, 500);
    assert_eq!(report.test_rows, 100);
    assert!((report.theta[0] - 0.45).abs() < 0.05, "{:?}", report.theta);
    assert!((report.theta[1] - 0.42).abs() < 0.02, "{:?}", report.theta);
    assert!(report.test_rmse < 0.05, "rmse {}", report.test_rmse);
}

#[test_log::test]
fn same_seed_gives_identical_batch_theta() {
    let dataset = housing(200);
    let config = RunConfig::default();
    let first = run(Strategy::Batch, &config, &dataset, &mut NoPlot).unwrap();
    let second = run(Strategy::Batch, &config, &dataset, &mut NoPlot).unwrap();
    assert_eq!(first.theta, second.theta);
    assert_eq!(first.cost_history, second.cost_history);
}

#[test_log::test]
fn sgd_run_has_fixed_history() {
    let dataset = housing(200);
    let mut config = RunConfig::default();
    config.sgd.iterations = 2000;
    let report = run(Strategy::Sgd, &config, &dataset, &mut NoPlot).unwrap();
    assert_eq!(report.cost_history.len(), 2000);
    assert!(report.cost_history[1999] < report.cost_history[0]);
}

#[test]
fn plot_csv_has_every_series() {
    let dataset = housing(50);
    let mut sink = CsvPlotSink::new(Vec::new()).unwrap();
    let report = run(Strategy::Batch, &RunConfig::default(), &dataset, &mut sink).unwrap();
    let written = String::from_utf8(sink.into_inner().unwrap()).unwrap();

    let count = |series: &str| {
        written
            .lines()
            .filter(|l| l.starts_with(&format!("{},", series)))
            .count()
    };
    assert_eq!(count("test data"), report.test_rows);
    assert_eq!(count("regression line"), 2);
    assert_eq!(count("cost history"), report.cost_history.len());
}

#[test_log::test]
fn unknown_strategy_is_reported() {
    assert_eq!(
        "momentum".parse::<Strategy>(),
        Err(FitError::InvalidStrategyName("momentum".to_string()))
    );

    let dataset = housing(40);
    let mut sink = CsvPlotSink::new(Vec::new()).unwrap();
    let status = run_named("momentum", &RunConfig::default(), &dataset, &mut sink).unwrap();
    match status {
        RunStatus::Skipped(message) => {
            assert!(message.contains("'momentum'"), "{}", message);
            assert!(message.ends_with("Nothing was trained."), "{}", message);
        }
        RunStatus::Trained(report) => panic!("unexpected training: {:?}", report),
    }
    // Only the header line
    let written = String::from_utf8(sink.into_inner().unwrap()).unwrap();
    assert_eq!(written.lines().count(), 1);
}

#[test]
fn four_point_line_through_the_public_api() {
    let dataset = Dataset::from_feature(vec![1., 2., 3., 4.], vec![3., 5., 7., 9.]).unwrap();
    let params = BatchParams {
        learning_rate: 0.1,
        max_iterations: 500,
        tolerance: 1e-6,
    };
    let outcome = train(
        &mut BatchGradientDescent::new(&params),
        &dataset.design_matrix(),
        &dataset.target,
        vec![0., 0.],
    )
    .unwrap();
    assert!((outcome.theta[0] - 1.).abs() < 0.05);
    assert!((outcome.theta[1] - 2.).abs() < 0.05);
    assert!(outcome.final_cost().unwrap() < 0.01);

    let model = outcome.into_model();
    let prediction = model.predict_features(&Dataset::from_feature(vec![5.], vec![0.]).unwrap().features);
    assert!((prediction.unwrap()[0] - 11.).abs() < 0.2);
}
