//! Ledger settings

use serde::Serialize;

/// Stages in a complete run unless configured otherwise.
pub const DEFAULT_STAGES_PER_RUN: usize = 10;

/// Splits closer than this, in seconds, count as equal.
pub const DEFAULT_SPLIT_TOLERANCE: f64 = 0.001;

/// Behavior knobs for a [`crate::RunLedger`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
pub struct LedgerSettings {
    /// Number of stages that make a run complete
    pub stages_per_run: usize,
    /// Margin a split must beat the best by to replace it
    pub split_tolerance: f64,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self { stages_per_run: DEFAULT_STAGES_PER_RUN, split_tolerance: DEFAULT_SPLIT_TOLERANCE }
    }
}

impl LedgerSettings {
    /// Set the number of stages in a complete run (at least one).
    pub fn with_stages_per_run(mut self, stages: usize) -> Self {
        self.stages_per_run = stages.max(1);
        self
    }

    /// Set the split comparison tolerance (negative values are clamped to zero).
    pub fn with_split_tolerance(mut self, tolerance: f64) -> Self {
        self.split_tolerance = tolerance.max(0.0);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_clamps_values() {
        let settings = LedgerSettings::default().with_stages_per_run(0).with_split_tolerance(-1.0);
        assert_eq!(settings.stages_per_run, 1);
        assert_eq!(settings.split_tolerance, 0.0);
    }

    #[test]
    fn defaults() {
        let settings = LedgerSettings::default();
        assert_eq!(settings.stages_per_run, 10);
        assert_eq!(settings.split_tolerance, 0.001);
    }
}
