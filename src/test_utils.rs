//! Shared fixtures for unit tests
//!
//! Record documents and pre-populated ledgers used across modules so each
//! test does not have to rebuild them by hand.

use crate::backends::MemoryBackend;
use crate::settings::LedgerSettings;
use crate::types::{RecordStore, WipeScope};
use crate::{Result, RunLedger};

/// A single-season record file from before seasons existed.
pub const LEGACY_RECORD_FILE: &str = r##"{
    "pbTotalTimeSeconds": 300.0,
    "pbRunTimes": [100.0, 200.0, 300.0],
    "bestSplits": { "1": 95.0, "2": 98.25, "3": 99.5 },
    "runCount": 12,
    "config": { "text_color": "#EEEEEE" }
}"##;

/// A store with two categories, several seasons and a customised config.
pub fn sample_store() -> RecordStore {
    let mut store = RecordStore::default();

    let record = store.ensure_active_record();
    for (stage, split) in [(1, 58.5), (2, 61.25), (3, 59.0)] {
        record.record_split(stage, split, 0.001);
    }
    record.offer_personal_best(&[60.0, 122.0, 183.5]);
    record.run_count = 9;

    store.current_stage = "ETERNITY".to_string();
    store.current_season = 1;
    let record = store.ensure_active_record();
    record.record_split(1, 70.0, 0.001);
    record.run_count = 1;

    store.current_season = 2;
    store.ensure_active_record().wipe(WipeScope::Full);

    store.config.set("highlight_color", "#123456");
    store.config.set("font_family", "Consolas");
    store
}

/// An in-memory ledger with a short run length.
pub fn memory_ledger(stages: usize) -> RunLedger<MemoryBackend> {
    RunLedger::with_store(
        RecordStore::default(),
        MemoryBackend::new(),
        LedgerSettings::default().with_stages_per_run(stages),
    )
}

/// Enter every time in `inputs` in order.
pub fn enter_times<B: crate::StorageBackend>(ledger: &mut RunLedger<B>, inputs: &[&str]) -> Result<()> {
    for input in inputs {
        ledger.append_stage_time(input)?;
    }
    Ok(())
}
