//! Record file encoding and schema migration
//!
//! The record file has changed shape once. Each shape has a version number:
//!
//! - **0**: a single season's fields at the top level
//!   (`pbTotalTimeSeconds`, `pbRunTimes`, `bestSplits`, `runCount`, `config`)
//! - **1**: `currentStage`, `currentSeason`, `seasons` keyed by stage category
//!   and season number, and `config`
//!
//! Files written by this crate carry an explicit `schemaVersion`. Older files
//! are recognised by shape: a `seasons` key means version 1, its absence means
//! version 0. Loading applies every migration step from the detected version
//! up to [`CURRENT_SCHEMA_VERSION`] in order, then decodes the result.
//!
//! ```text
//!   raw JSON ──► detect version ──► v0→v1 ──► ... ──► RecordStore
//! ```

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::types::{DEFAULT_CATEGORIES, DEFAULT_CATEGORY, DEFAULT_SEASON, INFINITY_SENTINEL, RecordStore};
use crate::{LedgerError, Result};

/// Key holding the schema version in the record file.
pub const SCHEMA_VERSION_KEY: &str = "schemaVersion";

type Migration = fn(Map<String, Value>) -> Result<Map<String, Value>>;

/// Migration steps; entry `n` upgrades version `n` to `n + 1`.
const MIGRATIONS: [Migration; 1] = [migrate_v0_to_v1];

/// Schema version written by this crate.
pub const CURRENT_SCHEMA_VERSION: u32 = MIGRATIONS.len() as u32;

/// Determine the schema version of a decoded record document.
pub fn detect_version(doc: &Map<String, Value>) -> Result<u32> {
    match doc.get(SCHEMA_VERSION_KEY) {
        Some(value) => value.as_u64().and_then(|v| u32::try_from(v).ok()).ok_or_else(|| {
            LedgerError::parse_error("schema version", format!("expected a non-negative integer, found {}", value))
        }),
        None if doc.contains_key("seasons") => Ok(1),
        None => Ok(0),
    }
}

/// Upgrade a record document to [`CURRENT_SCHEMA_VERSION`].
///
/// # Errors
///
/// [`LedgerError::Parse`] when the document is not a JSON object or carries a
/// malformed version, [`LedgerError::SchemaVersion`] when it is newer than
/// this crate understands.
pub fn migrate(doc: Value) -> Result<Value> {
    let Value::Object(mut map) = doc else {
        return Err(LedgerError::parse_error("record file", "top level is not a JSON object"));
    };

    let mut version = detect_version(&map)?;
    if version > CURRENT_SCHEMA_VERSION {
        return Err(LedgerError::SchemaVersion { found: version, supported: CURRENT_SCHEMA_VERSION });
    }

    while let Some(step) = MIGRATIONS.get(version as usize) {
        debug!(from = version, to = version + 1, "Migrating record file");
        map = step(map)?;
        version += 1;
    }

    map.insert(SCHEMA_VERSION_KEY.to_string(), Value::from(version));
    Ok(Value::Object(map))
}

/// Decode record file text, migrating older shapes.
pub fn decode(text: &str) -> Result<RecordStore> {
    let doc: Value = serde_json::from_str(text)
        .map_err(|e| LedgerError::parse_error("record file JSON", e.to_string()))?;
    let doc = migrate(doc)?;
    serde_json::from_value(doc).map_err(|e| LedgerError::parse_error("record file contents", e.to_string()))
}

/// Encode records as JSON text (4-space indent) tagged with the current version.
pub fn encode(store: &RecordStore) -> Result<String> {
    let mut doc = serde_json::to_value(store)
        .map_err(|e| LedgerError::parse_error("record encoding", e.to_string()))?;
    if let Value::Object(map) = &mut doc {
        map.insert(SCHEMA_VERSION_KEY.to_string(), Value::from(CURRENT_SCHEMA_VERSION));
    }

    let mut buffer = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    doc.serialize(&mut serializer)
        .map_err(|e| LedgerError::parse_error("record encoding", e.to_string()))?;

    String::from_utf8(buffer).map_err(|e| LedgerError::parse_error("record encoding", e.to_string()))
}

/// Version 0 to 1: move the top-level season fields under the default
/// category and season.
fn migrate_v0_to_v1(legacy: Map<String, Value>) -> Result<Map<String, Value>> {
    let field = |key: &str, fallback: Value| legacy.get(key).cloned().unwrap_or(fallback);

    let mut record = Map::new();
    record.insert("pbTotalTimeSeconds".to_string(), field("pbTotalTimeSeconds", Value::from(INFINITY_SENTINEL)));
    record.insert("pbRunTimes".to_string(), field("pbRunTimes", Value::Array(Vec::new())));
    record.insert("bestSplits".to_string(), field("bestSplits", Value::Object(Map::new())));
    record.insert("runCount".to_string(), field("runCount", Value::from(0)));

    let mut seasons = Map::new();
    for category in DEFAULT_CATEGORIES {
        seasons.insert(category.to_string(), Value::Object(Map::new()));
    }
    let mut default_category = Map::new();
    default_category.insert(DEFAULT_SEASON.to_string(), Value::Object(record));
    seasons.insert(DEFAULT_CATEGORY.to_string(), Value::Object(default_category));

    let mut upgraded = Map::new();
    upgraded.insert("currentStage".to_string(), Value::from(DEFAULT_CATEGORY));
    upgraded.insert("currentSeason".to_string(), Value::from(DEFAULT_SEASON));
    upgraded.insert("seasons".to_string(), Value::Object(seasons));
    upgraded.insert("config".to_string(), field("config", Value::Object(Map::new())));

    Ok(upgraded)
}
