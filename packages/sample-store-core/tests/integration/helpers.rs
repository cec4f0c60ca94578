//! Shared fixtures: seeded record generation and test-only backends.

use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sample_store_core::backend::{Backend, BackendHandle};
use sample_store_core::error::{BenchError, BenchResult};
use sample_store_core::record::Record;
use sample_store_core::runner::Dataset;

/// Records with `p` drawn from a small grid so duplicates are common.
pub fn grid_records(rng: &mut StdRng, count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| {
            let p = rng.gen_range(0..=40) as f64 / 4.0;
            Record::new(p).with_field("id", i)
        })
        .collect()
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn small_dataset(seed: u64) -> Dataset {
    let mut rng = seeded(seed);
    let seed_records = grid_records(&mut rng, 200);
    let points = grid_records(&mut rng, 50);
    Dataset::new(seed_records, points, 0.0, 10.0)
}

/// Stage at which a [`FaultyBackend`] fails.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FailAt {
    Prepare,
    Insert,
    Range,
}

/// Backend that errors at a chosen stage and otherwise does nothing.
pub struct FaultyBackend {
    pub name: &'static str,
    pub fail_at: FailAt,
}

#[async_trait]
impl Backend for FaultyBackend {
    fn name(&self) -> &str {
        self.name
    }

    async fn prepare(&self) -> BenchResult<Box<dyn BackendHandle>> {
        if self.fail_at == FailAt::Prepare {
            return Err(BenchError::backend(self.name, "prepare()", "cannot allocate"));
        }
        Ok(Box::new(FaultyHandle {
            name: self.name,
            fail_at: self.fail_at,
            len: 0,
        }))
    }
}

struct FaultyHandle {
    name: &'static str,
    fail_at: FailAt,
    len: usize,
}

#[async_trait]
impl BackendHandle for FaultyHandle {
    async fn bulk_insert(&mut self, records: &[Record]) -> BenchResult<()> {
        self.len += records.len();
        Ok(())
    }

    async fn insert(&mut self, _record: &Record) -> BenchResult<()> {
        if self.fail_at == FailAt::Insert {
            return Err(BenchError::backend(self.name, "insert()", "write rejected"));
        }
        self.len += 1;
        Ok(())
    }

    async fn find_one(&self, _p: f64) -> BenchResult<Option<Record>> {
        Ok(None)
    }

    async fn range(&self, _from: f64, _to: f64) -> BenchResult<Vec<Record>> {
        if self.fail_at == FailAt::Range {
            return Err(BenchError::backend(self.name, "range()", "scan aborted"));
        }
        Ok(Vec::new())
    }

    async fn remove(&mut self, _p: f64) -> BenchResult<Option<Record>> {
        Ok(None)
    }

    async fn size(&self) -> BenchResult<usize> {
        Ok(self.len)
    }
}

/// Backend whose bulk load never finishes in reasonable time.
pub struct StallingBackend;

#[async_trait]
impl Backend for StallingBackend {
    fn name(&self) -> &str {
        "stalling"
    }

    async fn prepare(&self) -> BenchResult<Box<dyn BackendHandle>> {
        Ok(Box::new(StallingHandle))
    }
}

struct StallingHandle;

#[async_trait]
impl BackendHandle for StallingHandle {
    async fn bulk_insert(&mut self, _records: &[Record]) -> BenchResult<()> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }

    async fn insert(&mut self, _record: &Record) -> BenchResult<()> {
        Ok(())
    }

    async fn find_one(&self, _p: f64) -> BenchResult<Option<Record>> {
        Ok(None)
    }

    async fn range(&self, _from: f64, _to: f64) -> BenchResult<Vec<Record>> {
        Ok(Vec::new())
    }

    async fn remove(&mut self, _p: f64) -> BenchResult<Option<Record>> {
        Ok(None)
    }

    async fn size(&self) -> BenchResult<usize> {
        Ok(0)
    }
}
