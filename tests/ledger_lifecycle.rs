//! Ledger Lifecycle Tests
//!
//! Drives a file-backed ledger through runs, context switches and wipes,
//! reopening the record file between steps to check what survives a restart.

use splitbook::{JsonFileBackend, LedgerError, LedgerSettings, RunLedger, Splitbook, SplitStatus, WipeScope};
use std::path::Path;
use tempfile::tempdir;

fn reopen(path: &Path, stages: usize) -> RunLedger<JsonFileBackend> {
    Splitbook::open_with(path, LedgerSettings::default().with_stages_per_run(stages)).unwrap()
}

fn enter(ledger: &mut RunLedger<JsonFileBackend>, inputs: &[&str]) {
    for input in inputs {
        ledger.append_stage_time(input).unwrap();
    }
}

#[test]
fn records_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("speed_run_records.json");

    let mut ledger = reopen(&path, 3);
    enter(&mut ledger, &["130", "300", "430"]);
    let outcome = ledger.finalize_run().unwrap();
    assert!(outcome.new_personal_best);
    drop(ledger);

    let ledger = reopen(&path, 3);
    let record = ledger.season_record();
    assert_eq!(record.personal_best, Some(270.0));
    assert_eq!(record.pb_run_times, vec![90.0, 180.0, 270.0]);
    assert_eq!(record.best_split(2), Some(90.0));
    assert_eq!(record.run_count, 1);
    assert!(ledger.current_run().is_empty());
}

#[test]
fn best_split_is_saved_before_the_run_ends() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");

    let mut ledger = reopen(&path, 10);
    let outcome = ledger.append_stage_time("45").unwrap().unwrap();
    assert!(outcome.status.is_new_best());
    drop(ledger);

    let ledger = reopen(&path, 10);
    assert_eq!(ledger.season_record().best_split(1), Some(45.0));
    assert_eq!(ledger.season_record().run_count, 0);
}

#[test]
fn dream_run_combines_best_stages_from_different_runs() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");
    let mut ledger = reopen(&path, 2);

    enter(&mut ledger, &["50", "200"]);
    ledger.finalize_run().unwrap();
    enter(&mut ledger, &["100", "200"]);
    ledger.finalize_run().unwrap();

    let ledger = reopen(&path, 2);
    let dream = ledger.dream_run().unwrap();
    assert_eq!(dream.splits.iter().map(|row| row.split).collect::<Vec<_>>(), vec![50.0, 60.0]);
    assert_eq!(dream.total, 110.0);
    assert!(dream.complete);
    assert_eq!(ledger.season_record().personal_best, Some(120.0));
}

#[test]
fn context_switch_is_remembered() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");

    let mut ledger = reopen(&path, 1);
    enter(&mut ledger, &["40"]);
    ledger.finalize_run().unwrap();
    ledger.switch_context(Some("ETERNITY"), Some(1)).unwrap();
    enter(&mut ledger, &["75"]);
    ledger.finalize_run().unwrap();
    drop(ledger);

    let mut ledger = reopen(&path, 1);
    assert_eq!(ledger.active_context(), ("ETERNITY", 1));
    assert_eq!(ledger.season_record().personal_best, Some(75.0));

    ledger.switch_context(Some("ECHOES"), Some(4)).unwrap();
    assert_eq!(ledger.season_record().personal_best, Some(40.0));
}

#[test]
fn wipe_scopes_persist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");

    let mut ledger = reopen(&path, 2);
    enter(&mut ledger, &["30", "100"]);
    ledger.finalize_run().unwrap();
    ledger.wipe_season_record(WipeScope::PbOnly).unwrap();
    drop(ledger);

    let mut ledger = reopen(&path, 2);
    assert_eq!(ledger.season_record().personal_best, None);
    assert_eq!(ledger.season_record().run_count, 0);
    assert_eq!(ledger.season_record().best_split(2), Some(30.0));

    ledger.wipe_season_record(WipeScope::Full).unwrap();
    drop(ledger);
    assert!(reopen(&path, 2).season_record().is_empty());
}

#[test]
fn split_comparison_after_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");

    let mut ledger = reopen(&path, 3);
    enter(&mut ledger, &["100", "200"]);
    ledger.finalize_run().unwrap();
    drop(ledger);

    let mut ledger = reopen(&path, 3);
    let first = ledger.append_stage_time("110").unwrap().unwrap();
    assert_eq!(first.status, SplitStatus::Behind { delta: 10.0 });
    let second = ledger.append_stage_time("200").unwrap().unwrap();
    assert_eq!(second.status, SplitStatus::NewBest { previous: Some(60.0) });
    assert_eq!(ledger.season_record().best_split(2), Some(50.0));
}

#[test]
fn domain_errors_leave_file_untouched() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("records.json");

    let mut ledger = reopen(&path, 2);
    enter(&mut ledger, &["100"]);
    ledger.finalize_run().unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    assert!(matches!(ledger.finalize_run(), Err(LedgerError::EmptyRun)));
    assert!(matches!(ledger.append_stage_time("1:00"), Err(LedgerError::InvalidTime { .. })));
    enter(&mut ledger, &["130"]);
    assert!(matches!(ledger.append_stage_time("100"), Err(LedgerError::NegativeSplit { .. })));
    assert!(matches!(ledger.switch_context(Some(""), None), Err(LedgerError::InvalidContext { .. })));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
}
