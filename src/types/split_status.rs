//! Comparison of a split against the best split on record

use serde::{Deserialize, Serialize};

/// How a split compares with the best split recorded for its stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum SplitStatus {
    /// Faster than the recorded best by more than the tolerance, or the first
    /// split recorded for the stage.
    NewBest { previous: Option<f64> },

    /// Within the tolerance of the recorded best.
    MatchesBest,

    /// Slower than the recorded best.
    Behind { delta: f64 },
}

impl SplitStatus {
    /// Evaluate `split` against `best`.
    ///
    /// A split beats the best only when it is lower by more than `tolerance`;
    /// anything below `best + tolerance` counts as matching it.
    pub fn evaluate(split: f64, best: Option<f64>, tolerance: f64) -> Self {
        match best {
            None => SplitStatus::NewBest { previous: None },
            Some(best) if split < best - tolerance => SplitStatus::NewBest { previous: Some(best) },
            Some(best) if split < best + tolerance => SplitStatus::MatchesBest,
            Some(best) => SplitStatus::Behind { delta: split - best },
        }
    }

    /// Whether the split replaces the recorded best.
    pub fn is_new_best(&self) -> bool {
        matches!(self, SplitStatus::NewBest { .. })
    }

    /// Whether the split is a new best or ties the existing one.
    pub fn is_at_best(&self) -> bool {
        !matches!(self, SplitStatus::Behind { .. })
    }

    /// Time lost against the best split, if any.
    pub fn delta(&self) -> Option<f64> {
        match self {
            SplitStatus::Behind { delta } => Some(*delta),
            _ => None,
        }
    }
}
