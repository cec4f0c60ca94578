//! One benchmark pass per backend over a fixed dataset.
//!
//! Stages run strictly in sequence: prepare, bulk insert of the seed set,
//! point-wise insert, find and remove over the query points, and one
//! inclusive range query. A failing stage ends that backend's pass and
//! leaves a name-only record; the remaining backends still run.

use std::hint::black_box;
use std::time::Duration;

use crate::backend::{Backend, BackendHandle};
use crate::config::BenchConfig;
use crate::error::{BenchError, BenchResult};
use crate::record::Record;
use crate::timing::{timed, Stage, TimingRecord};

/// Seed set and query points for one dataset size.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    seed: Vec<Record>,
    points: Vec<Record>,
}

impl Dataset {
    /// Builds a dataset, dropping any record whose `p` is NaN or lies
    /// outside `[lower, upper]`.
    pub fn new(seed: Vec<Record>, points: Vec<Record>, lower: f64, upper: f64) -> Self {
        let in_bounds = |record: &Record| lower <= record.p && record.p <= upper;
        let (seed_total, points_total) = (seed.len(), points.len());

        let seed: Vec<Record> = seed.into_iter().filter(in_bounds).collect();
        let points: Vec<Record> = points.into_iter().filter(in_bounds).collect();

        let dropped = (seed_total - seed.len()) + (points_total - points.len());
        if dropped > 0 {
            tracing::warn!(
                "Dropped {} records outside [{}, {}]",
                dropped,
                lower,
                upper
            );
        }
        Self { seed, points }
    }

    /// Records loaded by the bulk stage.
    pub fn seed(&self) -> &[Record] {
        &self.seed
    }

    /// Records driven through the point-wise stages.
    pub fn points(&self) -> &[Record] {
        &self.points
    }
}

/// Drives backends through the fixed stage sequence.
#[derive(Debug, Clone)]
pub struct BenchmarkRunner {
    range_from: f64,
    range_to: f64,
    stage_timeout: Option<Duration>,
}

impl Default for BenchmarkRunner {
    fn default() -> Self {
        Self::new(&BenchConfig::default())
    }
}

impl BenchmarkRunner {
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            range_from: config.range_from,
            range_to: config.range_to,
            stage_timeout: config.stage_timeout_ms.map(Duration::from_millis),
        }
    }

    /// Sets the per-stage timeout.
    pub fn with_stage_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.stage_timeout = timeout;
        self
    }

    /// Runs every backend in order, one pass each.
    pub async fn run_all(
        &self,
        backends: &[Box<dyn Backend>],
        dataset: &Dataset,
    ) -> Vec<TimingRecord> {
        let mut records = Vec::with_capacity(backends.len());
        for backend in backends {
            records.push(self.run_pass(backend.as_ref(), dataset).await);
        }
        records
    }

    /// Runs one backend through every stage.
    ///
    /// Never fails: a stage error is logged and yields a name-only record.
    pub async fn run_pass(&self, backend: &dyn Backend, dataset: &Dataset) -> TimingRecord {
        let name = backend.name();
        tracing::info!(
            "Running {} with {} seed records, {} query points",
            name,
            dataset.seed().len(),
            dataset.points().len()
        );

        let mut record = TimingRecord::named(name);
        match self.try_pass(backend, dataset, &mut record).await {
            Ok(()) => {
                tracing::info!(
                    "Finished {} (final size {})",
                    name,
                    record.final_size().unwrap_or(0)
                );
                record
            }
            Err(e) => {
                tracing::error!("Backend {} failed, skipping remaining stages: {}", name, e);
                TimingRecord::named(name)
            }
        }
    }

    async fn try_pass(
        &self,
        backend: &dyn Backend,
        dataset: &Dataset,
        record: &mut TimingRecord,
    ) -> BenchResult<()> {
        let name = backend.name();

        let (mut handle, ms) = timed(name, Stage::Prepare, self.stage_timeout, backend.prepare())
            .await?;
        self.finish_stage(name, Stage::Prepare, ms, handle.as_ref(), record)
            .await?;

        let (_, ms) = timed(
            name,
            Stage::Bulk,
            self.stage_timeout,
            handle.bulk_insert(dataset.seed()),
        )
        .await?;
        self.finish_stage(name, Stage::Bulk, ms, handle.as_ref(), record)
            .await?;

        let (_, ms) = timed(name, Stage::Insert, self.stage_timeout, async {
            for point in dataset.points() {
                handle.insert(point).await?;
            }
            Ok::<_, BenchError>(())
        })
        .await?;
        self.finish_stage(name, Stage::Insert, ms, handle.as_ref(), record)
            .await?;

        let (found, ms) = timed(name, Stage::FindOne, self.stage_timeout, async {
            let mut found = 0usize;
            for point in dataset.points() {
                if black_box(handle.find_one(point.p).await?).is_some() {
                    found += 1;
                }
            }
            Ok::<_, BenchError>(found)
        })
        .await?;
        tracing::debug!("{}: {} of {} points found", name, found, dataset.points().len());
        self.finish_stage(name, Stage::FindOne, ms, handle.as_ref(), record)
            .await?;

        let (matches, ms) = timed(
            name,
            Stage::Range,
            self.stage_timeout,
            handle.range(self.range_from, self.range_to),
        )
        .await?;
        tracing::debug!(
            "{}: {} records in [{}, {}]",
            name,
            black_box(matches).len(),
            self.range_from,
            self.range_to
        );
        self.finish_stage(name, Stage::Range, ms, handle.as_ref(), record)
            .await?;

        let (_, ms) = timed(name, Stage::Remove, self.stage_timeout, async {
            for point in dataset.points() {
                handle.remove(point.p).await?;
            }
            Ok::<_, BenchError>(())
        })
        .await?;
        self.finish_stage(name, Stage::Remove, ms, handle.as_ref(), record)
            .await?;

        Ok(())
    }

    /// Records a completed stage together with the size it left behind.
    async fn finish_stage(
        &self,
        name: &str,
        stage: Stage,
        elapsed_ms: f64,
        handle: &dyn BackendHandle,
        record: &mut TimingRecord,
    ) -> BenchResult<()> {
        let size = handle.size().await?;
        tracing::debug!("{} {}: {:.3}ms, size {}", name, stage, elapsed_ms, size);
        record.push(stage, elapsed_ms, size);
        Ok(())
    }
}
