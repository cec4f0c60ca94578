//! Unsorted baseline: records kept in arrival order, every query scans.

use async_trait::async_trait;
use ordered_float::OrderedFloat;

use super::{Backend, BackendHandle};
use crate::error::BenchResult;
use crate::record::Record;

#[derive(Debug, Default, Clone, Copy)]
pub struct ScanBackend;

impl ScanBackend {
    pub const NAME: &'static str = "scan";
}

#[async_trait]
impl Backend for ScanBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn prepare(&self) -> BenchResult<Box<dyn BackendHandle>> {
        Ok(Box::new(ScanHandle {
            records: Vec::new(),
        }))
    }
}

struct ScanHandle {
    records: Vec<Record>,
}

#[async_trait]
impl BackendHandle for ScanHandle {
    async fn bulk_insert(&mut self, records: &[Record]) -> BenchResult<()> {
        self.records.extend_from_slice(records);
        Ok(())
    }

    async fn insert(&mut self, record: &Record) -> BenchResult<()> {
        self.records.push(record.clone());
        Ok(())
    }

    async fn find_one(&self, p: f64) -> BenchResult<Option<Record>> {
        Ok(self.records.iter().find(|record| record.p == p).cloned())
    }

    async fn range(&self, from: f64, to: f64) -> BenchResult<Vec<Record>> {
        let mut matches: Vec<Record> = self
            .records
            .iter()
            .filter(|record| from <= record.p && record.p <= to)
            .cloned()
            .collect();
        // Stable: ties stay in arrival order
        matches.sort_by_key(|record| OrderedFloat(record.p));
        Ok(matches)
    }

    async fn remove(&mut self, p: f64) -> BenchResult<Option<Record>> {
        Ok(self
            .records
            .iter()
            .position(|record| record.p == p)
            .map(|idx| self.records.remove(idx)))
    }

    async fn size(&self) -> BenchResult<usize> {
        Ok(self.records.len())
    }
}
