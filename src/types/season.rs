//! Per-season best-time records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::SplitStatus;

/// Persisted aggregate for one (stage category, season) pair.
///
/// On disk a missing personal best is written as the string `"inf"`; in memory
/// it is `None` so it can never leak into arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SeasonRecord {
    /// Total time of the personal-best run
    #[serde(rename = "pbTotalTimeSeconds", default, with = "infinity_sentinel")]
    #[cfg_attr(feature = "tauri", specta(type = Option<f64>))]
    pub personal_best: Option<f64>,
    /// Cumulative stage times of the personal-best run (empty or one per stage)
    #[serde(default)]
    pub pb_run_times: Vec<f64>,
    /// Best split ever recorded per stage index
    #[serde(default)]
    pub best_splits: BTreeMap<u32, f64>,
    /// Number of finalized runs, complete or not
    #[serde(default)]
    pub run_count: u32,
}

/// Which parts of a [`SeasonRecord`] a wipe clears.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "kebab-case")]
pub enum WipeScope {
    /// Personal best, run counter and best splits
    Full,
    /// Personal best and run counter; best splits are kept
    PbOnly,
}

impl SeasonRecord {
    /// An empty record: no personal best, no best splits, no runs.
    pub const fn new() -> Self {
        Self {
            personal_best: None,
            pb_run_times: Vec::new(),
            best_splits: BTreeMap::new(),
            run_count: 0,
        }
    }

    /// Best split recorded for a stage.
    pub fn best_split(&self, stage: u32) -> Option<f64> {
        self.best_splits.get(&stage).copied()
    }

    /// Evaluate a split and store it when it beats the recorded best.
    pub fn record_split(&mut self, stage: u32, split: f64, tolerance: f64) -> SplitStatus {
        let status = SplitStatus::evaluate(split, self.best_split(stage), tolerance);
        if status.is_new_best() {
            self.best_splits.insert(stage, split);
        }
        status
    }

    /// Replace the personal best with `totals` when its final total is lower.
    ///
    /// Both personal-best fields change together or not at all. Returns whether
    /// the record was replaced.
    pub fn offer_personal_best(&mut self, totals: &[f64]) -> bool {
        let Some(&total) = totals.last() else {
            return false;
        };
        let improved = self.personal_best.is_none_or(|best| total < best);
        if improved {
            self.personal_best = Some(total);
            self.pb_run_times = totals.to_vec();
        }
        improved
    }

    /// Reset the record according to `scope`.
    pub fn wipe(&mut self, scope: WipeScope) {
        self.personal_best = None;
        self.pb_run_times.clear();
        self.run_count = 0;
        if scope == WipeScope::Full {
            self.best_splits.clear();
        }
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.personal_best.is_none()
            && self.pb_run_times.is_empty()
            && self.best_splits.is_empty()
            && self.run_count == 0
    }
}

/// Serde adapter for the `"inf"` sentinel used on disk for "no record".
pub(crate) mod infinity_sentinel {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    /// String written in place of a missing personal best.
    pub const INFINITY_SENTINEL: &str = "inf";

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(seconds) => serializer.serialize_f64(*seconds),
            None => serializer.serialize_str(INFINITY_SENTINEL),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Option::<Raw>::deserialize(deserializer)? {
            None => Ok(None),
            Some(Raw::Number(seconds)) if seconds.is_finite() => Ok(Some(seconds)),
            Some(Raw::Number(_)) => Ok(None),
            Some(Raw::Text(text))
                if text.eq_ignore_ascii_case(INFINITY_SENTINEL)
                    || text.eq_ignore_ascii_case("infinity") =>
            {
                Ok(None)
            }
            Some(Raw::Text(text)) => Err(D::Error::custom(format!(
                "expected a number or \"{}\", found \"{}\"",
                INFINITY_SENTINEL, text
            ))),
        }
    }
}
