//! Skip list backend over `crossbeam_skiplist::SkipMap`.
//!
//! O(log n) inserts and deletes with the same `(p, seq)` ordering as the
//! reference index.

use async_trait::async_trait;
use crossbeam_skiplist::SkipMap;

use super::{Backend, BackendHandle};
use crate::error::BenchResult;
use crate::index::EntryKey;
use crate::record::Record;

#[derive(Debug, Default, Clone, Copy)]
pub struct SkipListBackend;

impl SkipListBackend {
    pub const NAME: &'static str = "skiplist";
}

#[async_trait]
impl Backend for SkipListBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn prepare(&self) -> BenchResult<Box<dyn BackendHandle>> {
        Ok(Box::new(SkipListHandle {
            map: SkipMap::new(),
            next_seq: 0,
        }))
    }
}

struct SkipListHandle {
    map: SkipMap<EntryKey, Record>,
    next_seq: u64,
}

#[async_trait]
impl BackendHandle for SkipListHandle {
    async fn bulk_insert(&mut self, records: &[Record]) -> BenchResult<()> {
        for record in records {
            self.insert(record).await?;
        }
        Ok(())
    }

    async fn insert(&mut self, record: &Record) -> BenchResult<()> {
        let key = EntryKey::new(record.p, self.next_seq);
        self.next_seq += 1;
        self.map.insert(key, record.clone());
        Ok(())
    }

    async fn find_one(&self, p: f64) -> BenchResult<Option<Record>> {
        Ok(self
            .map
            .range(EntryKey::first(p)..=EntryKey::last(p))
            .next()
            .map(|entry| entry.value().clone()))
    }

    async fn range(&self, from: f64, to: f64) -> BenchResult<Vec<Record>> {
        let (low, high) = (EntryKey::first(from), EntryKey::last(to));
        if low > high {
            return Ok(Vec::new());
        }
        Ok(self
            .map
            .range(low..=high)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn remove(&mut self, p: f64) -> BenchResult<Option<Record>> {
        let key = match self.map.range(EntryKey::first(p)..=EntryKey::last(p)).next() {
            Some(entry) => *entry.key(),
            None => return Ok(None),
        };
        Ok(self.map.remove(&key).map(|entry| entry.value().clone()))
    }

    async fn size(&self) -> BenchResult<usize> {
        Ok(self.map.len())
    }
}
