//! Sample records.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A numeric sample keyed by `p`.
///
/// Any other fields ride along untouched. Records are not unique by `p`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Sort and search key
    pub p: f64,
    /// Passthrough fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    /// Creates a record with no passthrough fields.
    pub fn new(p: f64) -> Self {
        Self {
            p,
            fields: Map::new(),
        }
    }

    /// Adds a passthrough field.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Returns the sort key. Usable as the `by` extractor of an `OrderedIndex`.
    pub fn key(&self) -> f64 {
        self.p
    }
}
