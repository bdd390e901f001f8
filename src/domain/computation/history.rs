//! Append-only run history with capped retention.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::{ComputationRun, RunStatus};
use crate::domain::foundation::{RunId, Timestamp};

/// Default number of history entries retained.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// Immutable summary of a finished run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub run_id: RunId,
    pub timestamp: Timestamp,
    pub status: RunStatus,
    /// Mean composite score as a percentage, for completed runs.
    pub headline_score: Option<f64>,
    pub message: String,
}

impl From<&ComputationRun> for HistoryEntry {
    fn from(run: &ComputationRun) -> Self {
        Self {
            run_id: run.id(),
            timestamp: run.completed_at(),
            status: run.status(),
            headline_score: run.result().and_then(|r| r.headline_score()),
            message: run.message().to_string(),
        }
    }
}

/// Most-recent-first history.
///
/// Holds at most `capacity` entries; recording beyond that evicts the
/// oldest. Each run id is recorded at most once.
#[derive(Debug, Clone)]
pub struct RunHistory {
    entries: VecDeque<HistoryEntry>,
    capacity: usize,
}

impl Default for RunHistory {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }
}

impl RunHistory {
    /// Creates an empty history. A capacity of zero is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Records an entry; returns false if the run was already recorded.
    pub fn record(&mut self, entry: HistoryEntry) -> bool {
        if self.contains(&entry.run_id) {
            return false;
        }
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
        true
    }

    pub fn contains(&self, run_id: &RunId) -> bool {
        self.entries.iter().any(|e| &e.run_id == run_id)
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.front()
    }

    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
