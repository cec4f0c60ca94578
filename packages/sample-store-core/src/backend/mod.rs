//! Backend contract.
//!
//! A [`Backend`] is a factory: `prepare` allocates fresh state and hands
//! back a [`BackendHandle`] owned exclusively by one benchmark pass. The
//! harness only ever sees these two traits.

use async_trait::async_trait;

use crate::error::{BenchError, BenchResult};
use crate::record::Record;

mod btree;
mod ordered;
mod scan;
mod skiplist;

pub use btree::BTreeBackend;
pub use ordered::OrderedIndexBackend;
pub use scan::ScanBackend;
pub use skiplist::SkipListBackend;

/// A storage variant under benchmark.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Name used in timing records and on the command line.
    fn name(&self) -> &str;

    /// Allocates and initializes a new, empty handle.
    async fn prepare(&self) -> BenchResult<Box<dyn BackendHandle>>;
}

/// Per-pass backend state.
///
/// Every operation may suspend. Missing records are `Ok(None)`, not errors.
#[async_trait]
pub trait BackendHandle: Send + Sync {
    /// Loads the seed set.
    async fn bulk_insert(&mut self, records: &[Record]) -> BenchResult<()>;

    /// Inserts one record.
    async fn insert(&mut self, record: &Record) -> BenchResult<()>;

    /// Returns the earliest-inserted record with key `p`.
    async fn find_one(&self, p: f64) -> BenchResult<Option<Record>>;

    /// Returns records with `from <= p <= to` in ascending key order.
    async fn range(&self, from: f64, to: f64) -> BenchResult<Vec<Record>>;

    /// Removes the record `find_one(p)` would return.
    async fn remove(&mut self, p: f64) -> BenchResult<Option<Record>>;

    /// Number of records held.
    async fn size(&self) -> BenchResult<usize>;
}

/// Names accepted by [`create`], in default run order.
pub fn available() -> &'static [&'static str] {
    &[
        OrderedIndexBackend::NAME,
        BTreeBackend::NAME,
        SkipListBackend::NAME,
        ScanBackend::NAME,
    ]
}

/// Creates a backend by name.
pub fn create(name: &str) -> BenchResult<Box<dyn Backend>> {
    match name {
        OrderedIndexBackend::NAME => Ok(Box::new(OrderedIndexBackend)),
        BTreeBackend::NAME => Ok(Box::new(BTreeBackend)),
        SkipListBackend::NAME => Ok(Box::new(SkipListBackend)),
        ScanBackend::NAME => Ok(Box::new(ScanBackend)),
        other => Err(BenchError::UnknownBackend(other.to_string())),
    }
}

/// Creates every backend in `names`, failing on the first unknown one.
pub fn create_all<S: AsRef<str>>(names: &[S]) -> BenchResult<Vec<Box<dyn Backend>>> {
    names.iter().map(|name| create(name.as_ref())).collect()
}
