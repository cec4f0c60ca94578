//! Synthetic sample generation.
//!
//! The seed set is three normal clusters scaled by the size multiplier;
//! query points are uniform over the bounds. Values are clamped to the
//! bounds and rounded to the configured precision.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sample_store_core::config::{BenchConfig, MAX_PRECISION};
use sample_store_core::record::Record;

/// A normal cluster and how many samples it contributes per unit of size.
#[derive(Debug, Clone, Copy)]
pub struct Cluster {
    pub mean: f64,
    pub std_dev: f64,
    pub per_unit: usize,
}

pub const CLUSTERS: [Cluster; 3] = [
    Cluster {
        mean: 2.5,
        std_dev: 1.0,
        per_unit: 300,
    },
    Cluster {
        mean: 5.0,
        std_dev: 0.5,
        per_unit: 400,
    },
    Cluster {
        mean: 7.5,
        std_dev: 1.0,
        per_unit: 300,
    },
];

/// Seeded sample generator. Each instance owns its random state.
pub struct SampleGenerator {
    rng: StdRng,
    lower: f64,
    upper: f64,
    scale: f64,
    next_id: u64,
}

impl SampleGenerator {
    pub fn new(config: &BenchConfig) -> Self {
        Self {
            rng: StdRng::seed_from_u64(config.seed),
            lower: config.lower_bound,
            upper: config.upper_bound,
            scale: 10f64.powi(config.precision.min(MAX_PRECISION) as i32),
            next_id: 0,
        }
    }

    /// Standard normal sample via Box-Muller.
    fn standard_normal(&mut self) -> f64 {
        // 1 - [0, 1) keeps ln() finite
        let u1: f64 = 1.0 - self.rng.gen::<f64>();
        let u2: f64 = self.rng.gen();
        (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
    }

    fn finish(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.lower, self.upper);
        (clamped * self.scale).round() / self.scale
    }

    fn record(&mut self, p: f64) -> Record {
        let record = Record::new(p).with_field("id", self.next_id);
        self.next_id += 1;
        record
    }

    /// Seed set for size multiplier `times`, clusters concatenated.
    pub fn seed_set(&mut self, times: usize) -> Vec<Record> {
        let total: usize = CLUSTERS.iter().map(|c| c.per_unit * times).sum();
        let mut records = Vec::with_capacity(total);
        for cluster in CLUSTERS {
            for _ in 0..cluster.per_unit * times {
                let value = cluster.mean + cluster.std_dev * self.standard_normal();
                let p = self.finish(value);
                records.push(self.record(p));
            }
        }
        records
    }

    /// `count` uniform query points.
    pub fn query_points(&mut self, count: usize) -> Vec<Record> {
        (0..count)
            .map(|_| {
                let value = if self.lower < self.upper {
                    self.rng.gen_range(self.lower..=self.upper)
                } else {
                    self.lower
                };
                let p = self.finish(value);
                self.record(p)
            })
            .collect()
    }
}
