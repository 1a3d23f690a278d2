//! The run in progress

use serde::Serialize;

use crate::types::StageEntry;
use crate::{LedgerError, Result};

/// Ordered stage entries of the run being timed.
///
/// Entries are numbered from 1 without gaps and their totals never decrease.
/// The run holds at most `stages` entries.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct CurrentRun {
    entries: Vec<StageEntry>,
    stages: usize,
}

impl CurrentRun {
    /// Empty run that completes after `stages` entries (at least one).
    pub fn with_stages(stages: usize) -> Self {
        let stages = stages.max(1);
        Self { entries: Vec::with_capacity(stages), stages }
    }

    /// Entries in stage order.
    pub fn entries(&self) -> &[StageEntry] {
        &self.entries
    }

    /// Number of stages entered so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of stages in a complete run.
    pub fn stages(&self) -> usize {
        self.stages
    }

    /// Whether every stage has a time.
    pub fn is_complete(&self) -> bool {
        self.entries.len() >= self.stages
    }

    /// Stage index the next entry will get, or `None` once complete.
    pub fn next_stage(&self) -> Option<u32> {
        (!self.is_complete()).then(|| self.entries.len() as u32 + 1)
    }

    /// Latest cumulative time, if any stage has been entered.
    pub fn total(&self) -> Option<f64> {
        self.entries.last().map(StageEntry::total_time_seconds)
    }

    /// Cumulative time of every entered stage.
    pub fn totals(&self) -> Vec<f64> {
        self.entries.iter().map(StageEntry::total_time_seconds).collect()
    }

    /// Append a stage with cumulative time `total`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::RunComplete`] when the run is full and
    /// [`LedgerError::NegativeSplit`] when `total` is below the previous total.
    /// The run is unchanged on error.
    pub(crate) fn push(&mut self, total: f64, input: &str) -> Result<&StageEntry> {
        if self.is_complete() {
            return Err(LedgerError::RunComplete { stages: self.stages });
        }

        let previous = self.total().unwrap_or(0.0);
        if total - previous < 0.0 {
            return Err(LedgerError::NegativeSplit { total, previous });
        }

        let stage = self.entries.len() as u32 + 1;
        self.entries.push(StageEntry::new(stage, total, previous, input));
        Ok(&self.entries[self.entries.len() - 1])
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
