//! # Run Ledger
//!
//! [`RunLedger`] owns the run being timed and the persisted records, and is
//! the only way to change either. A front end holds one ledger, calls its
//! methods for every user action and redraws from the return values and the
//! read-only views.
//!
//! ## Operations
//!
//! | operation                              | changes records | saves |
//! |----------------------------------------|-----------------|-------|
//! | [`append_stage_time`](RunLedger::append_stage_time) | best split, when beaten | when beaten |
//! | [`finalize_run`](RunLedger::finalize_run)           | run counter, personal best | always |
//! | [`wipe_season_record`](RunLedger::wipe_season_record) | per [`WipeScope`] | always |
//! | [`switch_context`](RunLedger::switch_context)       | selected category/season | always |
//! | [`reset_run`](RunLedger::reset_run)                 | nothing | never |
//!
//! Domain errors leave the ledger untouched. When a save fails the change is
//! kept in memory, the ledger is marked dirty and the error is returned;
//! [`RunLedger::flush`] retries.
//!
//! ## Example
//!
//! ```rust
//! use splitbook::{LedgerSettings, RunLedger, backends::MemoryBackend};
//!
//! # fn main() -> splitbook::Result<()> {
//! let settings = LedgerSettings::default().with_stages_per_run(2);
//! let mut ledger = RunLedger::open(MemoryBackend::new(), settings)?;
//!
//! ledger.append_stage_time("130")?;
//! ledger.append_stage_time("305")?;
//! let outcome = ledger.finalize_run()?;
//!
//! assert!(outcome.new_personal_best);
//! assert_eq!(ledger.season_record().personal_best, Some(185.0));
//! # Ok(())
//! # }
//! ```

mod run;
mod summary;

pub use run::CurrentRun;
pub use summary::{DreamRun, SplitComparison, SplitRow, personal_best_rows};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::StorageBackend;
use crate::codec;
use crate::settings::LedgerSettings;
use crate::types::{RecordStore, SeasonRecord, SplitStatus, StageEntry, WipeScope};
use crate::{LedgerError, Result};

/// Result of accepting a stage time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct AppendOutcome {
    /// The entry added to the run
    pub entry: StageEntry,
    /// How the entry's split compared with the best before it was entered
    pub status: SplitStatus,
}

/// Result of ending a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct FinalizeOutcome {
    /// Run counter after this run was counted
    pub run_count: u32,
    /// Stages entered in the finalized run
    pub stages_completed: usize,
    /// Whether every stage was entered
    pub complete: bool,
    /// Final cumulative time of the run
    pub total: f64,
    /// Personal best before this run
    pub previous_best: Option<f64>,
    /// Whether this run became the personal best
    pub new_personal_best: bool,
}

/// Split tracking service over a storage backend.
pub struct RunLedger<B: StorageBackend> {
    store: RecordStore,
    run: CurrentRun,
    backend: B,
    settings: LedgerSettings,
    dirty: bool,
    last_finalized: Option<FinalizeOutcome>,
}

impl<B: StorageBackend> RunLedger<B> {
    /// Load records from `backend`, starting from defaults if it holds none.
    ///
    /// # Errors
    ///
    /// Propagates backend load failures: unreadable, malformed or too-new
    /// record files. Nothing is overwritten in that case.
    pub fn open(backend: B, settings: LedgerSettings) -> Result<Self> {
        let store = backend.load()?.unwrap_or_default();
        info!(
            location = %backend.location(),
            stage = %store.current_stage,
            season = store.current_season,
            "Opened run ledger"
        );
        Ok(Self::with_store(store, backend, settings))
    }

    /// Build a ledger around an already loaded store.
    pub fn with_store(mut store: RecordStore, backend: B, settings: LedgerSettings) -> Self {
        store.ensure_active_record();
        let run = CurrentRun::with_stages(settings.stages_per_run);
        Self { store, run, backend, settings, dirty: false, last_finalized: None }
    }

    /// Parse `input` as a cumulative time and add it as the next stage.
    ///
    /// Empty input is ignored and returns `Ok(None)`. A split that beats the
    /// stored best for its stage replaces it and triggers a save.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::RunComplete`] when every stage already has a time
    /// - [`LedgerError::InvalidTime`] when `input` is not a time
    /// - [`LedgerError::NegativeSplit`] when the total is below the previous one
    /// - [`LedgerError::Persistence`] when a new best split could not be saved;
    ///   the entry and best split are kept in memory
    pub fn append_stage_time(&mut self, input: &str) -> Result<Option<AppendOutcome>> {
        if self.run.is_complete() {
            return Err(LedgerError::RunComplete { stages: self.run.stages() });
        }

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        let total = codec::parse_time(input)?;
        let entry = self.run.push(total, input)?.clone();

        let tolerance = self.settings.split_tolerance;
        let status = self.store.ensure_active_record().record_split(
            entry.stage(),
            entry.split_time_seconds(),
            tolerance,
        );
        debug!(
            stage = entry.stage(),
            total = entry.total_time_seconds(),
            split = entry.split_time_seconds(),
            ?status,
            "Stage time accepted"
        );

        if status.is_new_best() {
            info!(
                stage = entry.stage(),
                split = %codec::format_time(entry.split_time_seconds()),
                "New best split"
            );
            self.persist()?;
        }

        Ok(Some(AppendOutcome { entry, status }))
    }

    /// End the current run.
    ///
    /// The run counter always increases. A run with every stage entered
    /// replaces the personal best when its total is lower. The run is cleared
    /// and the records are saved.
    ///
    /// # Errors
    ///
    /// [`LedgerError::EmptyRun`] when no stage has been entered;
    /// [`LedgerError::Persistence`] when the save fails. The run is still
    /// finalized in memory, and its outcome (including whether it set a new
    /// personal best) is available from [`RunLedger::last_finalized`].
    pub fn finalize_run(&mut self) -> Result<FinalizeOutcome> {
        let Some(total) = self.run.total() else {
            return Err(LedgerError::EmptyRun);
        };

        let complete = self.run.is_complete();
        let stages_completed = self.run.len();
        let totals = self.run.totals();

        let record = self.store.ensure_active_record();
        record.run_count = record.run_count.saturating_add(1);
        let previous_best = record.personal_best;
        let new_personal_best = complete && record.offer_personal_best(&totals);

        let outcome = FinalizeOutcome {
            run_count: record.run_count,
            stages_completed,
            complete,
            total,
            previous_best,
            new_personal_best,
        };

        if new_personal_best {
            info!(total = %codec::format_time(total), "New personal best");
        } else if !complete {
            debug!(stages_completed, "Finalized incomplete run; personal best not considered");
        }

        self.run.clear();
        self.last_finalized = Some(outcome.clone());
        self.persist()?;
        Ok(outcome)
    }

    /// Discard the run in progress without touching the records.
    pub fn reset_run(&mut self) {
        if !self.run.is_empty() {
            debug!(stages = self.run.len(), "Discarding current run");
        }
        self.run.clear();
    }

    /// Reset the selected season record, clear the run and save.
    pub fn wipe_season_record(&mut self, scope: WipeScope) -> Result<()> {
        self.store.ensure_active_record().wipe(scope);
        self.run.clear();
        info!(
            stage = %self.store.current_stage,
            season = self.store.current_season,
            ?scope,
            "Wiped season record"
        );
        self.persist()
    }

    /// Select a different stage category and/or season.
    ///
    /// Any run in progress is discarded; confirming that with the runner is
    /// the caller's job. The record for the new selection is created if it
    /// does not exist yet, and the selection is saved.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidContext`] for a blank category name (nothing
    /// changes); [`LedgerError::Persistence`] when the save fails.
    pub fn switch_context(&mut self, stage: Option<&str>, season: Option<u32>) -> Result<()> {
        let stage = stage.map(str::trim);
        if stage.is_some_and(str::is_empty) {
            return Err(LedgerError::invalid_context("stage category name is empty"));
        }

        if let Some(stage) = stage {
            self.store.current_stage = stage.to_string();
        }
        if let Some(season) = season {
            self.store.current_season = season;
        }

        self.run.clear();
        self.store.ensure_active_record();
        info!(stage = %self.store.current_stage, season = self.store.current_season, "Switched context");
        self.persist()
    }

    /// Retry saving after an earlier save failed. Does nothing when clean.
    pub fn flush(&mut self) -> Result<()> {
        if self.dirty { self.persist() } else { Ok(()) }
    }

    /// Whether in-memory records have changes that failed to save.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Outcome of the most recent finalized run, whether or not it was saved.
    pub fn last_finalized(&self) -> Option<&FinalizeOutcome> {
        self.last_finalized.as_ref()
    }

    /// The run in progress.
    pub fn current_run(&self) -> &CurrentRun {
        &self.run
    }

    /// Record for the selected category and season.
    pub fn season_record(&self) -> &SeasonRecord {
        self.store.active_record()
    }

    /// All records and the selection.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Selected stage category and season.
    pub fn active_context(&self) -> (&str, u32) {
        (&self.store.current_stage, self.store.current_season)
    }

    /// Seasons recorded for the selected category, ascending.
    pub fn available_seasons(&self) -> Vec<u32> {
        self.store.seasons_for(&self.store.current_stage)
    }

    /// Stage index the next time will be entered as, or `None` once complete.
    pub fn next_stage(&self) -> Option<u32> {
        self.run.next_stage()
    }

    /// Each entry of the current run against the stored best split.
    pub fn comparisons(&self) -> Vec<SplitComparison> {
        summary::compare_entries(self.run.entries(), self.season_record(), self.settings.split_tolerance)
    }

    /// Best splits of the selected season as a run, if any exist.
    pub fn dream_run(&self) -> Option<DreamRun> {
        DreamRun::from_record(self.season_record(), self.settings.stages_per_run)
    }

    /// Stage splits of the personal-best run.
    pub fn personal_best_splits(&self) -> Vec<SplitRow> {
        personal_best_rows(self.season_record())
    }

    /// Consume the ledger, returning the records and backend.
    pub fn into_parts(self) -> (RecordStore, B) {
        (self.store, self.backend)
    }

    fn persist(&mut self) -> Result<()> {
        self.dirty = true;
        match self.backend.save(&self.store) {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                warn!(location = %self.backend.location(), error = %e, "Failed to save records; keeping them in memory");
                Err(e)
            }
        }
    }
}
