//! Ordered sample index and backend latency benchmark.
//!
//! Provides the duplicate-tolerant ordered index, the backend contract
//! every storage variant implements, stage timing, the per-backend
//! benchmark pass, and aggregation of results across dataset sizes.

pub mod aggregate;
pub mod backend;
pub mod config;
pub mod error;
pub mod index;
pub mod record;
pub mod runner;
pub mod timing;

pub use backend::{Backend, BackendHandle};
pub use error::{BenchError, BenchResult};
pub use index::OrderedIndex;
pub use record::Record;
