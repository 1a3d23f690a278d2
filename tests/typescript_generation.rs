//! TypeScript Generation Tests
//!
//! Validates that splitbook types can be exported to TypeScript when the
//! tauri feature is enabled.

#[cfg(feature = "tauri")]
#[test]
fn test_core_types_implement_specta_type() {
    use specta::Type;

    // If this compiles, all types are properly configured for TypeScript export.
    fn assert_type<T: Type>() {}

    // Record types
    assert_type::<splitbook::RecordStore>();
    assert_type::<splitbook::SeasonRecord>();
    assert_type::<splitbook::DisplayConfig>();
    assert_type::<splitbook::WipeScope>();

    // Run types
    assert_type::<splitbook::StageEntry>();
    assert_type::<splitbook::SplitStatus>();
    assert_type::<splitbook::CurrentRun>();
    assert_type::<splitbook::AppendOutcome>();
    assert_type::<splitbook::FinalizeOutcome>();
    assert_type::<splitbook::DreamRun>();
    assert_type::<splitbook::SplitComparison>();
    assert_type::<splitbook::LedgerSettings>();
}

#[cfg(not(feature = "tauri"))]
#[test]
fn test_tauri_feature_disabled() {
    // Types still compile without specta::Type
    let _ = splitbook::WipeScope::PbOnly;
}
