//! Core types for split tracking.
//!
//! ## Model
//!
//! - [`StageEntry`] is one accepted stage time of the run in progress
//! - [`SeasonRecord`] holds the personal best, best splits and run counter for
//!   one (stage category, season) pair
//! - [`RecordStore`] is the whole persisted state: selected context, every
//!   season record and the [`DisplayConfig`] block
//! - [`SplitStatus`] is the outcome of comparing a split with the best on record
//!
//! "No record yet" is always `Option::None` in memory. The `"inf"` string
//! used on disk exists only at the serde boundary.
//!
//! ## Usage Example
//!
//! ```rust
//! use splitbook::types::{RecordStore, SplitStatus};
//!
//! let mut store = RecordStore::default();
//! let record = store.ensure_active_record();
//! assert!(record.record_split(1, 42.0, 0.001).is_new_best());
//! assert_eq!(record.record_split(1, 42.0005, 0.001), SplitStatus::MatchesBest);
//! assert_eq!(store.active_record().best_split(1), Some(42.0));
//! ```

mod config;
mod season;
mod split_status;
mod stage;
mod store;

pub use config::DisplayConfig;
pub(crate) use season::infinity_sentinel::INFINITY_SENTINEL;
pub use season::{SeasonRecord, WipeScope};
pub use split_status::SplitStatus;
pub use stage::StageEntry;
pub use store::{DEFAULT_CATEGORIES, DEFAULT_CATEGORY, DEFAULT_SEASON, RecordStore};
