//! `BTreeMap` backend keyed by `(p, seq)`.

use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{Backend, BackendHandle};
use crate::error::BenchResult;
use crate::index::EntryKey;
use crate::record::Record;

/// Balanced-tree backend from the standard collections.
#[derive(Debug, Default, Clone, Copy)]
pub struct BTreeBackend;

impl BTreeBackend {
    pub const NAME: &'static str = "btree";
}

#[async_trait]
impl Backend for BTreeBackend {
    fn name(&self) -> &str {
        Self::NAME
    }

    async fn prepare(&self) -> BenchResult<Box<dyn BackendHandle>> {
        Ok(Box::new(BTreeHandle {
            map: BTreeMap::new(),
            next_seq: 0,
        }))
    }
}

struct BTreeHandle {
    map: BTreeMap<EntryKey, Record>,
    next_seq: u64,
}

impl BTreeHandle {
    fn first_key(&self, p: f64) -> Option<EntryKey> {
        self.map
            .range(EntryKey::first(p)..=EntryKey::last(p))
            .next()
            .map(|(key, _)| *key)
    }
}

#[async_trait]
impl BackendHandle for BTreeHandle {
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
            .map(|(_, record)| record.clone()))
    }

    async fn range(&self, from: f64, to: f64) -> BenchResult<Vec<Record>> {
        let (low, high) = (EntryKey::first(from), EntryKey::last(to));
        if low > high {
            return Ok(Vec::new());
        }
        Ok(self
            .map
            .range(low..=high)
            .map(|(_, record)| record.clone())
            .collect())
    }

    async fn remove(&mut self, p: f64) -> BenchResult<Option<Record>> {
        Ok(self.first_key(p).and_then(|key| self.map.remove(&key)))
    }

    async fn size(&self) -> BenchResult<usize> {
        Ok(self.map.len())
    }
}
