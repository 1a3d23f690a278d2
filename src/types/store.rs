//! Top-level persisted record state

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

use super::{DisplayConfig, SeasonRecord};

/// Stage category selected when nothing else is known.
pub const DEFAULT_CATEGORY: &str = "ECHOES";

/// Season selected when nothing else is known.
pub const DEFAULT_SEASON: u32 = 4;

/// Stage categories present in a fresh record file.
pub const DEFAULT_CATEGORIES: [&str; 2] = ["ECHOES", "ETERNITY"];

static EMPTY_RECORD: SeasonRecord = SeasonRecord::new();

/// Everything the record file holds: the selected context, every season
/// record by category and season number, and the display configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase", default)]
pub struct RecordStore {
    /// Selected stage category
    pub current_stage: String,
    /// Selected season number
    pub current_season: u32,
    /// Season records by category, then season number
    pub seasons: BTreeMap<String, BTreeMap<u32, SeasonRecord>>,
    /// Presentation block, carried unchanged
    pub config: DisplayConfig,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self {
            current_stage: DEFAULT_CATEGORY.to_string(),
            current_season: DEFAULT_SEASON,
            seasons: DEFAULT_CATEGORIES
                .iter()
                .map(|category| (category.to_string(), BTreeMap::new()))
                .collect(),
            config: DisplayConfig::default(),
        }
    }
}

impl RecordStore {
    /// Record for an arbitrary (category, season) pair.
    pub fn record(&self, category: &str, season: u32) -> Option<&SeasonRecord> {
        self.seasons.get(category).and_then(|seasons| seasons.get(&season))
    }

    /// Record for the selected context.
    ///
    /// Falls back to an empty record when the selected pair has not been
    /// created yet; [`RecordStore::ensure_active_record`] creates it.
    pub fn active_record(&self) -> &SeasonRecord {
        self.record(&self.current_stage, self.current_season).unwrap_or(&EMPTY_RECORD)
    }

    /// Record for the selected context, created empty if absent.
    pub fn ensure_active_record(&mut self) -> &mut SeasonRecord {
        let season = self.current_season;
        let seasons = self.seasons.entry(self.current_stage.clone()).or_default();
        if !seasons.contains_key(&season) {
            debug!(stage = %self.current_stage, season, "Creating empty season record");
        }
        seasons.entry(season).or_default()
    }

    /// Whether the selected pair already has a record.
    pub fn has_active_record(&self) -> bool {
        self.record(&self.current_stage, self.current_season).is_some()
    }

    /// Season numbers recorded for a category, ascending.
    pub fn seasons_for(&self, category: &str) -> Vec<u32> {
        self.seasons.get(category).map(|seasons| seasons.keys().copied().collect()).unwrap_or_default()
    }

    /// Known stage categories, sorted.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.seasons.keys().map(String::as_str)
    }
}
