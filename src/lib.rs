//! Split ledger for stage-based speedruns.
//!
//! Splitbook tracks a run stage by stage as the runner enters cumulative
//! times, compares each stage split with the best on record, and keeps a
//! personal best, per-stage best splits and a run counter for every
//! (stage category, season) pair in a JSON record file.
//!
//! # Features
//!
//! - **Shorthand times**: `"130"` is 1:30, `"12345"` is 123:45
//! - **Dream run**: the sum of the best split of every stage
//! - **Durable records**: atomic saves, older record files migrated on load
//! - **Front-end agnostic**: every operation returns data to render; nothing
//!   here draws or prompts
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use splitbook::{Splitbook, WipeScope, codec};
//!
//! fn main() -> splitbook::Result<()> {
//!     let mut ledger = Splitbook::open("speed_run_records.json")?;
//!
//!     if let Some(outcome) = ledger.append_stage_time("130")? {
//!         println!("stage {} split {}", outcome.entry.stage(), codec::format_time(outcome.entry.split_time_seconds()));
//!     }
//!
//!     let finished = ledger.finalize_run()?;
//!     println!("run #{} total {}", finished.run_count, codec::format_time(finished.total));
//!
//!     ledger.switch_context(Some("ETERNITY"), Some(2))?;
//!     ledger.wipe_season_record(WipeScope::PbOnly)?;
//!     Ok(())
//! }
//! ```

// Core types and error handling
mod error;
pub mod settings;
#[cfg(test)]
mod test_utils;
pub mod types;

// Time text handling
pub mod codec;

// Ledger service
pub mod ledger;

// Persistence
pub mod backend;
pub mod backends;
pub mod migration;

// Core exports
pub use error::*;
pub use settings::LedgerSettings;
pub use types::*;

// Main API exports
pub use backend::StorageBackend;
pub use backends::{DEFAULT_RECORD_FILE, JsonFileBackend, MemoryBackend};
pub use ledger::{AppendOutcome, CurrentRun, DreamRun, FinalizeOutcome, RunLedger, SplitComparison, SplitRow};

/// Entry point for opening a split ledger.
///
/// # Examples
///
/// ## Record file on disk
/// ```rust,no_run
/// use splitbook::Splitbook;
///
/// fn main() -> splitbook::Result<()> {
///     let ledger = Splitbook::open("speed_run_records.json")?;
///     println!("{} runs so far", ledger.season_record().run_count);
///     Ok(())
/// }
/// ```
///
/// ## In memory
/// ```rust
/// use splitbook::Splitbook;
///
/// let mut ledger = Splitbook::in_memory();
/// ledger.append_stage_time("45").unwrap();
/// assert_eq!(ledger.current_run().len(), 1);
/// ```
pub struct Splitbook;

impl Splitbook {
    /// Open the record file at `path` with default settings.
    ///
    /// A missing file starts an empty ledger; the file is created on the
    /// first save. Files in an older layout are migrated in memory and
    /// written back in the current layout on the next save.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file exists but cannot be read
    /// - The file is not valid record JSON
    /// - The file was written by a newer schema version
    pub fn open<P: AsRef<std::path::Path>>(path: P) -> Result<RunLedger<JsonFileBackend>> {
        Self::open_with(path, LedgerSettings::default())
    }

    /// Open the record file at `path` with explicit settings.
    pub fn open_with<P: AsRef<std::path::Path>>(
        path: P,
        settings: LedgerSettings,
    ) -> Result<RunLedger<JsonFileBackend>> {
        RunLedger::open(JsonFileBackend::new(path), settings)
    }

    /// Ledger with default records that keeps saves in memory.
    pub fn in_memory() -> RunLedger<MemoryBackend> {
        RunLedger::with_store(RecordStore::default(), MemoryBackend::new(), LedgerSettings::default())
    }
}
