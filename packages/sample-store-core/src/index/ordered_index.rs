//! Sorted, comparator-driven container.
//!
//! Entries live in a `Vec` sorted ascending by `(p, seq)`, where `seq` is
//! a per-index counter assigned at insertion. Every lookup goes through
//! the same comparator, so the position an insert picks is exactly the
//! position a later lookup or range scan finds.
//!
//! Inserts are an O(log n) search plus an O(n) shift. A skip list or
//! balanced tree gives O(log n) inserts with the same ordering; see the
//! `skiplist` and `btree` backends.

use std::cmp::Ordering;

use ordered_float::OrderedFloat;

/// Composite key `(p, seq)`. Unique within one index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    /// Value returned by the extractor
    pub p: OrderedFloat<f64>,
    /// Insertion sequence id, breaks ties between equal `p`
    pub seq: u64,
}

impl EntryKey {
    pub fn new(p: f64, seq: u64) -> Self {
        Self {
            p: OrderedFloat(p),
            seq,
        }
    }

    /// Smallest key with this `p`.
    pub fn first(p: f64) -> Self {
        Self::new(p, 0)
    }

    /// Largest key with this `p`.
    pub fn last(p: f64) -> Self {
        Self::new(p, u64::MAX)
    }
}

/// Search key. `seq` is only compared when present.
#[derive(Debug, Clone, Copy)]
struct Probe {
    p: OrderedFloat<f64>,
    seq: Option<u64>,
}

impl Probe {
    fn by_value(p: f64) -> Self {
        Self {
            p: OrderedFloat(p),
            seq: None,
        }
    }
}

impl From<EntryKey> for Probe {
    fn from(key: EntryKey) -> Self {
        Self {
            p: key.p,
            seq: Some(key.seq),
        }
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    key: EntryKey,
    value: T,
}

/// Ordering of a stored key relative to a probe.
fn compare(key: &EntryKey, probe: &Probe) -> Ordering {
    key.p.cmp(&probe.p).then_with(|| match probe.seq {
        Some(seq) => key.seq.cmp(&seq),
        None => Ordering::Equal,
    })
}

/// Ordered collection of `T` keyed by `by(&T)`, tolerant of duplicate keys.
#[derive(Clone)]
pub struct OrderedIndex<T, F = fn(&T) -> f64>
where
    F: Fn(&T) -> f64,
{
    entries: Vec<Entry<T>>,
    by: F,
    next_seq: u64,
}

impl<T, F> OrderedIndex<T, F>
where
    F: Fn(&T) -> f64,
{
    /// Creates an empty index ordered by the extractor `by`.
    pub fn new(by: F) -> Self {
        Self::with_capacity(by, 0)
    }

    /// Creates an empty index with room for `capacity` entries.
    pub fn with_capacity(by: F, capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            by,
            next_seq: 0,
        }
    }

    fn next_key(&mut self, value: &T) -> EntryKey {
        let key = EntryKey::new((self.by)(value), self.next_seq);
        self.next_seq += 1;
        key
    }

    /// First index whose key is not less than the probe.
    fn lower_bound(&self, probe: &Probe) -> usize {
        self.entries
            .partition_point(|entry| compare(&entry.key, probe) == Ordering::Less)
    }

    /// First index whose key is greater than the probe.
    fn upper_bound(&self, probe: &Probe) -> usize {
        self.entries
            .partition_point(|entry| compare(&entry.key, probe) != Ordering::Greater)
    }

    /// Inserts a record, keeping entries ordered by `(p, seq)`.
    pub fn insert(&mut self, value: T) {
        let key = self.next_key(&value);
        let pos = self.lower_bound(&Probe::from(key));
        self.entries.insert(pos, Entry { key, value });

        assert!(
            pos == 0 || self.entries[pos - 1].key < key,
            "ordered index out of order at {pos}"
        );
        assert!(
            pos + 1 == self.entries.len() || key < self.entries[pos + 1].key,
            "ordered index out of order at {pos}"
        );
    }

    /// Inserts many records. The result is identical to inserting them one
    /// at a time in iteration order.
    pub fn bulk_insert<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let values = values.into_iter();
        self.entries.reserve(values.size_hint().0);
        for value in values {
            let key = self.next_key(&value);
            self.entries.push(Entry { key, value });
        }
        // Existing entries form one sorted run; the stable sort merges the tail into it.
        self.entries.sort_by_key(|entry| entry.key);

        debug_assert!(self.check_order(), "ordered index out of order after bulk insert");
    }

    /// Returns the earliest-inserted record whose key equals `p`.
    pub fn get(&self, p: f64) -> Option<&T> {
        self.position(p).map(|idx| &self.entries[idx].value)
    }

    fn position(&self, p: f64) -> Option<usize> {
        let probe = Probe::by_value(p);
        let idx = self.lower_bound(&probe);
        match self.entries.get(idx) {
            Some(entry) if compare(&entry.key, &probe) == Ordering::Equal => Some(idx),
            _ => None,
        }
    }

    /// Returns records with `from <= p < to`, or `from <= p <= to` when
    /// `include_high` is set, in ascending key order.
    pub fn get_range(
        &self,
        from: f64,
        to: f64,
        include_high: bool,
    ) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        let low = self.lower_bound(&Probe::by_value(from));
        let high_probe = Probe::by_value(to);
        let high = if include_high {
            self.upper_bound(&high_probe)
        } else {
            self.lower_bound(&high_probe)
        };
        self.entries[low..high.max(low)]
            .iter()
            .map(|entry| &entry.value)
    }

    /// Removes and returns the record `get(p)` would return.
    pub fn delete(&mut self, p: f64) -> Option<T> {
        let idx = self.position(p)?;
        Some(self.entries.remove(idx).value)
    }

    /// Number of records held.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every record. Sequence ids keep increasing afterwards.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Records in key order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator + '_ {
        self.entries.iter().map(|entry| &entry.value)
    }

    /// Keys in stored order.
    pub fn keys(&self) -> impl Iterator<Item = EntryKey> + '_ {
        self.entries.iter().map(|entry| entry.key)
    }

    /// Returns true if every adjacent pair is strictly ascending by `(p, seq)`.
    pub fn check_order(&self) -> bool {
        self.entries
            .windows(2)
            .all(|pair| pair[0].key < pair[1].key)
    }
}

impl<T, F> std::fmt::Debug for OrderedIndex<T, F>
where
    T: std::fmt::Debug,
    F: Fn(&T) -> f64,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderedIndex")
            .field("count", &self.entries.len())
            .field("next_seq", &self.next_seq)
            .finish()
    }
}
