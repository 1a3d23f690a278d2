//! Stage entries within an in-progress run

use serde::Serialize;

/// One completed stage of the current run.
///
/// Entries are created by [`crate::CurrentRun`] when a time is accepted and
/// are never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct StageEntry {
    stage: u32,
    total_time_seconds: f64,
    split_time_seconds: f64,
    input: String,
}

impl StageEntry {
    pub(crate) fn new(stage: u32, total: f64, previous_total: f64, input: impl Into<String>) -> Self {
        Self {
            stage,
            total_time_seconds: total,
            split_time_seconds: total - previous_total,
            input: input.into(),
        }
    }

    /// 1-based stage index.
    pub fn stage(&self) -> u32 {
        self.stage
    }

    /// Cumulative time since the run started.
    pub fn total_time_seconds(&self) -> f64 {
        self.total_time_seconds
    }

    /// Time spent on this stage alone.
    pub fn split_time_seconds(&self) -> f64 {
        self.split_time_seconds
    }

    /// The text the runner typed for this stage.
    pub fn input(&self) -> &str {
        &self.input
    }
}
