//! Benchmark pass tests: stage sequence, degradation, timeouts.

use std::time::Duration;

use sample_store_core::backend::{self, Backend, OrderedIndexBackend};
use sample_store_core::config::BenchConfig;
use sample_store_core::record::Record;
use sample_store_core::runner::{BenchmarkRunner, Dataset};
use sample_store_core::timing::Stage;

use super::helpers::{small_dataset, FailAt, FaultyBackend, StallingBackend};

#[tokio::test]
async fn test_full_pass_records_every_stage() {
    let dataset = small_dataset(1);
    let runner = BenchmarkRunner::default();
    let record = runner.run_pass(&OrderedIndexBackend, &dataset).await;

    assert_eq!(record.name, "ordered");
    assert!(record.is_complete());
    let stages: Vec<Stage> = record.stages.iter().map(|s| s.stage).collect();
    assert_eq!(stages, Stage::ALL.to_vec());

    let seed = dataset.seed().len();
    let points = dataset.points().len();
    let sizes: Vec<usize> = record.stages.iter().map(|s| s.size).collect();
    assert_eq!(
        sizes,
        vec![0, seed, seed + points, seed + points, seed + points, seed]
    );
    assert!(record.stages.iter().all(|s| s.elapsed_ms >= 0.0));
}

#[tokio::test]
async fn test_every_backend_completes() {
    let dataset = small_dataset(2);
    let backends = backend::create_all(backend::available()).unwrap();
    let records = BenchmarkRunner::default().run_all(&backends, &dataset).await;

    assert_eq!(records.len(), backends.len());
    for (record, name) in records.iter().zip(backend::available()) {
        assert_eq!(&record.name, name);
        assert!(record.is_complete(), "{name} did not complete");
        assert_eq!(record.final_size(), Some(dataset.seed().len()));
    }
}

#[tokio::test]
async fn test_prepare_failure_degrades_only_that_backend() {
    let dataset = small_dataset(3);
    let backends: Vec<Box<dyn Backend>> = vec![
        Box::new(FaultyBackend {
            name: "broken",
            fail_at: FailAt::Prepare,
        }),
        Box::new(OrderedIndexBackend),
    ];
    let records = BenchmarkRunner::default().run_all(&backends, &dataset).await;

    assert_eq!(records[0].name, "broken");
    assert!(records[0].is_degraded());
    assert_eq!(records[0].to_map().len(), 1);

    assert_eq!(records[1].name, "ordered");
    assert!(records[1].is_complete());
}

#[tokio::test]
async fn test_mid_pass_failure_drops_partial_timings() {
    let dataset = small_dataset(4);
    let runner = BenchmarkRunner::default();

    for fail_at in [FailAt::Insert, FailAt::Range] {
        let backend = FaultyBackend {
            name: "flaky",
            fail_at,
        };
        let record = runner.run_pass(&backend, &dataset).await;
        assert!(record.is_degraded(), "{fail_at:?}");
        assert_eq!(record.elapsed_ms(Stage::Prepare), None);
    }
}

#[tokio::test]
async fn test_stage_timeout_degrades_backend() {
    let dataset = small_dataset(5);
    let runner =
        BenchmarkRunner::default().with_stage_timeout(Some(Duration::from_millis(20)));
    let backends: Vec<Box<dyn Backend>> =
        vec![Box::new(StallingBackend), Box::new(OrderedIndexBackend)];

    let records = runner.run_all(&backends, &dataset).await;
    assert!(records[0].is_degraded());
    assert!(records[1].is_complete());
}

#[tokio::test]
async fn test_stage_timeout_from_config() {
    let config = BenchConfig {
        stage_timeout_ms: Some(20),
        ..Default::default()
    };
    let record = BenchmarkRunner::new(&config)
        .run_pass(&StallingBackend, &small_dataset(6))
        .await;
    assert!(record.is_degraded());
}

#[test]
fn test_dataset_filters_out_of_bounds() {
    let seed = vec![
        Record::new(-0.5),
        Record::new(0.0),
        Record::new(5.0),
        Record::new(10.0),
        Record::new(10.01),
        Record::new(f64::NAN),
    ];
    let points = vec![Record::new(3.0), Record::new(42.0)];
    let dataset = Dataset::new(seed, points, 0.0, 10.0);

    let ps: Vec<f64> = dataset.seed().iter().map(|r| r.p).collect();
    assert_eq!(ps, vec![0.0, 5.0, 10.0]);
    assert_eq!(dataset.points().len(), 1);
}
