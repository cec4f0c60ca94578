//! Stage names, per-stage timings and the timing wrapper.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{BenchError, BenchResult};

/// One named phase of a benchmark pass, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "prepare()")]
    Prepare,
    #[serde(rename = "bulk()")]
    Bulk,
    #[serde(rename = "insert()")]
    Insert,
    #[serde(rename = "findOne()")]
    FindOne,
    #[serde(rename = "range()")]
    Range,
    #[serde(rename = "remove()")]
    Remove,
}

impl Stage {
    /// All stages in run order.
    pub const ALL: [Stage; 6] = [
        Stage::Prepare,
        Stage::Bulk,
        Stage::Insert,
        Stage::FindOne,
        Stage::Range,
        Stage::Remove,
    ];

    /// Column label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Stage::Prepare => "prepare()",
            Stage::Bulk => "bulk()",
            Stage::Insert => "insert()",
            Stage::FindOne => "findOne()",
            Stage::Range => "range()",
            Stage::Remove => "remove()",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Elapsed time of one stage and the backend size right after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageTiming {
    pub stage: Stage,
    pub elapsed_ms: f64,
    pub size: usize,
}

/// Timings of one backend pass.
///
/// A record with no stages is a degraded pass: the backend failed and
/// only its name survives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    pub name: String,
    pub stages: Vec<StageTiming>,
}

impl TimingRecord {
    /// Creates a record holding only the backend name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stages: Vec::new(),
        }
    }

    pub fn push(&mut self, stage: Stage, elapsed_ms: f64, size: usize) {
        self.stages.push(StageTiming {
            stage,
            elapsed_ms,
            size,
        });
    }

    /// Elapsed milliseconds for `stage`, if it ran.
    pub fn elapsed_ms(&self, stage: Stage) -> Option<f64> {
        self.stages
            .iter()
            .find(|timing| timing.stage == stage)
            .map(|timing| timing.elapsed_ms)
    }

    /// Backend size after the last recorded stage.
    pub fn final_size(&self) -> Option<usize> {
        self.stages.last().map(|timing| timing.size)
    }

    /// True if every stage was recorded.
    pub fn is_complete(&self) -> bool {
        Stage::ALL
            .iter()
            .all(|stage| self.elapsed_ms(*stage).is_some())
    }

    pub fn is_degraded(&self) -> bool {
        self.stages.is_empty()
    }

    /// Flat report shape: `{ "name": .., "prepare()": ms, "bulk()": ms, .. }`.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("name".to_string(), Value::from(self.name.clone()));
        for timing in &self.stages {
            map.insert(timing.stage.label().to_string(), Value::from(timing.elapsed_ms));
        }
        map
    }
}

/// Converts a duration to fractional milliseconds.
pub fn as_millis_f64(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Runs `operation` to completion and returns its output with the elapsed
/// wall-clock milliseconds.
///
/// With a `timeout`, an operation still running when it expires is dropped
/// and reported as `StageTimeout`.
pub async fn timed<T, Fut>(
    backend: &str,
    stage: Stage,
    timeout: Option<Duration>,
    operation: Fut,
) -> BenchResult<(T, f64)>
where
    Fut: Future<Output = BenchResult<T>>,
{
    let start = Instant::now();
    let value = match timeout {
        Some(limit) => tokio::time::timeout(limit, operation)
            .await
            .map_err(|_| BenchError::StageTimeout {
                backend: backend.to_string(),
                stage: stage.label().to_string(),
                timeout_ms: limit.as_millis() as u64,
            })??,
        None => operation.await?,
    };
    Ok((value, as_millis_f64(start.elapsed())))
}
