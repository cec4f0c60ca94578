//! Duplicate-tolerant ordered index keyed by a numeric field.

mod ordered_index;

pub use ordered_index::{EntryKey, OrderedIndex};
