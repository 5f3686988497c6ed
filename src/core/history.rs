//! Dispatch history tracking.
//!
//! Provides immutable tracking of accepted dispatches over time. Rejected
//! dispatches never appear here since they change nothing.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::time::Duration;

/// Record of a single accepted dispatch.
///
/// # Example
///
/// ```rust
/// use refold::core::DispatchRecord;
/// use chrono::Utc;
///
/// let record = DispatchRecord {
///     sequence: 1,
///     kind: "increment".to_string(),
///     from: 0_i64,
///     to: 1_i64,
///     timestamp: Utc::now(),
/// };
/// assert!(record.changed());
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DispatchRecord<S: State> {
    /// Position of this dispatch among all accepted dispatches, starting at 1
    pub sequence: u64,
    /// Kind of the action that produced the transition
    pub kind: String,
    /// State before the dispatch
    pub from: S,
    /// State after the dispatch
    pub to: S,
    /// When the dispatch was accepted
    pub timestamp: DateTime<Utc>,
}

impl<S: State> DispatchRecord<S> {
    /// Whether the transition produced a different state.
    ///
    /// No-op transitions are legal and still recorded.
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Ordered history of accepted dispatches.
///
/// History is immutable: `record` returns a new history with the entry
/// added. A bounded history keeps only the most recent `capacity` records.
///
/// # Example
///
/// ```rust
/// use refold::core::{DispatchRecord, StateHistory};
/// use chrono::Utc;
///
/// let record = |sequence, from: i64, to: i64| DispatchRecord {
///     sequence,
///     kind: "increment".to_string(),
///     from,
///     to,
///     timestamp: Utc::now(),
/// };
///
/// let history = StateHistory::new()
///     .record(record(1, 0, 1))
///     .record(record(2, 1, 2));
///
/// assert_eq!(history.get_path(), vec![&0, &1, &2]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateHistory<S: State> {
    records: Vec<DispatchRecord<S>>,
    capacity: Option<NonZeroUsize>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new, unbounded, empty history.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            capacity: None,
        }
    }

    /// Create an empty history that retains at most `capacity` records.
    ///
    /// ```rust
    /// use refold::core::StateHistory;
    /// use std::num::NonZeroUsize;
    ///
    /// let capacity = NonZeroUsize::new(16).unwrap();
    /// let history: StateHistory<i64> = StateHistory::bounded(capacity);
    /// assert_eq!(history.capacity(), Some(capacity));
    /// ```
    pub fn bounded(capacity: NonZeroUsize) -> Self {
        Self {
            records: Vec::new(),
            capacity: Some(capacity),
        }
    }

    /// Record a dispatch, returning a new history.
    ///
    /// This does not mutate the existing history. When bounded, the oldest
    /// records are evicted first.
    pub fn record(&self, record: DispatchRecord<S>) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        if let Some(capacity) = self.capacity {
            let excess = records.len().saturating_sub(capacity.get());
            records.drain(..excess);
        }
        Self {
            records,
            capacity: self.capacity,
        }
    }

    /// In-place append used by the engine, which owns its history outright.
    pub(crate) fn push(&mut self, record: DispatchRecord<S>) {
        self.records.push(record);
        if let Some(capacity) = self.capacity {
            if self.records.len() > capacity.get() {
                let excess = self.records.len() - capacity.get();
                self.records.drain(..excess);
            }
        }
    }

    /// Get the path of states traversed.
    ///
    /// Returns the `from` state of the oldest retained record, then the `to`
    /// state of each record.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            path.push(&record.to);
        }
        path
    }

    /// Kinds of the retained records, oldest first.
    pub fn kinds(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.kind.as_str()).collect()
    }

    /// Time between the first and last retained record.
    ///
    /// Returns `None` for an empty history.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.records.first(), self.records.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Retained records, oldest first.
    pub fn records(&self) -> &[DispatchRecord<S>] {
        &self.records
    }

    /// Most recent record.
    pub fn last(&self) -> Option<&DispatchRecord<S>> {
        self.records.last()
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no records are retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Retention bound, if any. Never zero.
    pub fn capacity(&self) -> Option<NonZeroUsize> {
        self.capacity
    }
}
