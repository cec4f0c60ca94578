//! Reference backend over [`OrderedIndex`].

use async_trait::async_trait;

use super::{Backend, BackendHandle};
use crate::error::BenchResult;
use crate::index::OrderedIndex;
use crate::record::Record;

/// Reference backend: the in-process ordered index.
#[derive(Debug, Default, Clone, Copy)]
pub struct OrderedIndexBackend;

impl OrderedIndexBackend {
    pub const NAME: &'static str = "ordered";
}

#[async_trait]
impl Backend for OrderedIndexBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn prepare(&self) -> BenchResult<Box<dyn BackendHandle>> {
        Ok(Box::new(OrderedIndexHandle {
            index: OrderedIndex::new(Record::key as fn(&Record) -> f64),
        }))
    }
}

struct OrderedIndexHandle {
    index: OrderedIndex<Record>,
}

#[async_trait]
impl BackendHandle for OrderedIndexHandle {
    async fn bulk_insert(&mut self, records: &[Record]) -> BenchResult<()> {
        self.index.bulk_insert(records.iter().cloned());
        Ok(())
    }

    async fn insert(&mut self, record: &Record) -> BenchResult<()> {
        self.index.insert(record.clone());
        Ok(())
    }

    async fn find_one(&self, p: f64) -> BenchResult<Option<Record>> {
        Ok(self.index.get(p).cloned())
    }

    async fn range(&self, from: f64, to: f64) -> BenchResult<Vec<Record>> {
        Ok(self.index.get_range(from, to, true).cloned().collect())
    }

    async fn remove(&mut self, p: f64) -> BenchResult<Option<Record>> {
        Ok(self.index.delete(p))
    }

    async fn size(&self) -> BenchResult<usize> {
        Ok(self.index.count())
    }
}
