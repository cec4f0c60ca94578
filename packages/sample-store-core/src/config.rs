//! Benchmark configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, BenchResult};

/// Most decimal places an `f64` in the sample bounds can carry.
pub const MAX_PRECISION: u32 = 15;

/// Benchmark configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Dataset size multipliers, one full comparison per entry
    pub sizes: Vec<usize>,
    /// Number of query points used by the point-wise stages
    pub query_points: usize,
    /// Smallest admissible `p`
    pub lower_bound: f64,
    /// Largest admissible `p`
    pub upper_bound: f64,
    /// Lower end of the range stage query (inclusive)
    pub range_from: f64,
    /// Upper end of the range stage query (inclusive)
    pub range_to: f64,
    /// Decimal places kept on generated samples
    pub precision: u32,
    /// Seed for the data generator
    pub seed: u64,
    /// Per-stage timeout in milliseconds (None = wait forever)
    pub stage_timeout_ms: Option<u64>,
    /// Backends to compare, in run order
    pub backends: Vec<String>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            sizes: vec![1, 2, 5, 10],
            query_points: 1000,
            lower_bound: 0.0,
            upper_bound: 10.0,
            range_from: 4.0,
            range_to: 6.0,
            precision: 4,
            seed: 42,
            stage_timeout_ms: None,
            backends: crate::backend::available()
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }
}

impl BenchConfig {
    /// Loads configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> BenchResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: BenchConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Checks the configuration for values that would make a run meaningless.
    pub fn validate(&self) -> BenchResult<()> {
        if self.sizes.is_empty() {
            return Err(BenchError::InvalidConfig("no dataset sizes".to_string()));
        }
        if self.sizes.contains(&0) {
            return Err(BenchError::InvalidConfig(
                "dataset size multiplier must be greater than 0".to_string(),
            ));
        }
        if self.lower_bound.is_nan() || self.upper_bound.is_nan() || self.lower_bound > self.upper_bound
        {
            return Err(BenchError::InvalidConfig(format!(
                "lower bound {} exceeds upper bound {}",
                self.lower_bound, self.upper_bound
            )));
        }
        if self.range_from.is_nan() || self.range_to.is_nan() || self.range_from > self.range_to {
            return Err(BenchError::InvalidConfig(format!(
                "range start {} exceeds range end {}",
                self.range_from, self.range_to
            )));
        }
        if self.precision > MAX_PRECISION {
            return Err(BenchError::InvalidConfig(format!(
                "precision {} exceeds {} decimal places",
                self.precision, MAX_PRECISION
            )));
        }
        if self.stage_timeout_ms == Some(0) {
            return Err(BenchError::InvalidConfig(
                "stage timeout must be greater than 0".to_string(),
            ));
        }
        if self.backends.is_empty() {
            return Err(BenchError::InvalidConfig("no backends selected".to_string()));
        }
        for name in &self.backends {
            if !crate::backend::available().contains(&name.as_str()) {
                return Err(BenchError::UnknownBackend(name.clone()));
            }
        }
        Ok(())
    }
}
