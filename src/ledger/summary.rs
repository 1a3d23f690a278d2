//! Read-only views over a season record and the current run

use serde::Serialize;

use crate::types::{SeasonRecord, SplitStatus, StageEntry};

/// A stage's split together with the cumulative time up to it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SplitRow {
    pub stage: u32,
    pub split: f64,
    pub total: f64,
}

/// The hypothetical run built from the best split of every stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct DreamRun {
    /// Best splits in stage order, with running totals
    pub splits: Vec<SplitRow>,
    /// Sum of the recorded best splits
    pub total: f64,
    /// Whether every stage of a full run has a best split
    pub complete: bool,
}

impl DreamRun {
    /// Build the dream run, or `None` if no best split has been recorded.
    pub fn from_record(record: &SeasonRecord, stages_per_run: usize) -> Option<Self> {
        if record.best_splits.is_empty() {
            return None;
        }

        let mut total = 0.0;
        let splits: Vec<SplitRow> = record
            .best_splits
            .iter()
            .map(|(&stage, &split)| {
                total += split;
                SplitRow { stage, split, total }
            })
            .collect();

        let complete = (1..=stages_per_run as u32).all(|stage| record.best_splits.contains_key(&stage));

        Some(Self { splits, total, complete })
    }
}

/// Per-stage splits of the personal-best run.
pub fn personal_best_rows(record: &SeasonRecord) -> Vec<SplitRow> {
    let mut previous = 0.0;
    record
        .pb_run_times
        .iter()
        .enumerate()
        .map(|(index, &total)| {
            let row = SplitRow { stage: index as u32 + 1, split: total - previous, total };
            previous = total;
            row
        })
        .collect()
}

/// A current-run entry set against the best split on record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SplitComparison {
    pub entry: StageEntry,
    pub best: Option<f64>,
    pub status: SplitStatus,
}

pub(crate) fn compare_entries(
    entries: &[StageEntry],
    record: &SeasonRecord,
    tolerance: f64,
) -> Vec<SplitComparison> {
    entries
        .iter()
        .map(|entry| {
            let best = record.best_split(entry.stage());
            SplitComparison {
                entry: entry.clone(),
                best,
                status: SplitStatus::evaluate(entry.split_time_seconds(), best, tolerance),
            }
        })
        .collect()
}
