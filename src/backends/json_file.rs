//! JSON record file backend

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::backend::StorageBackend;
use crate::types::RecordStore;
use crate::{LedgerError, Result, migration};

/// File name used when no record path is given.
pub const DEFAULT_RECORD_FILE: &str = "speed_run_records.json";

/// Backend that keeps records in a JSON file.
///
/// Saves go to `<file>.tmp` first and are renamed over the record file once
/// fully written, so a crash mid-save leaves the previous file untouched.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    /// Record file location
    path: PathBuf,
}

impl JsonFileBackend {
    /// Backend for the record file at `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self { path: path.as_ref().to_path_buf() }
    }

    /// Record file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Scratch file written before the atomic rename.
    pub fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_temp(&self, temp: &Path, contents: &str) -> std::io::Result<()> {
        let mut file = File::create(temp)?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()
    }
}

impl StorageBackend for JsonFileBackend {
    fn load(&self) -> Result<Option<RecordStore>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("No record file at {}, starting with defaults", self.path.display());
                return Ok(None);
            }
            Err(e) => return Err(LedgerError::persistence_error(self.path.clone(), e)),
        };

        let store = migration::decode(&text)?;
        debug!(
            path = %self.path.display(),
            categories = store.seasons.len(),
            "Loaded record file"
        );
        Ok(Some(store))
    }

    fn save(&mut self, store: &RecordStore) -> Result<()> {
        let contents = migration::encode(store)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| LedgerError::persistence_error(parent.to_path_buf(), e))?;
        }

        let temp = self.temp_path();
        if let Err(e) = self.write_temp(&temp, &contents) {
            let _ = fs::remove_file(&temp);
            return Err(LedgerError::persistence_error(temp, e));
        }
        fs::rename(&temp, &self.path).map_err(|e| LedgerError::persistence_error(self.path.clone(), e))?;

        debug!(path = %self.path.display(), bytes = contents.len(), "Saved record file");
        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{LEGACY_RECORD_FILE, sample_store};
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_as_none() {
        let dir = tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("records.json"));
        assert!(backend.load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let mut backend = JsonFileBackend::new(dir.path().join("records.json"));
        let store = sample_store();

        backend.save(&store).unwrap();
        assert_eq!(backend.load().unwrap(), Some(store));
        assert!(!backend.temp_path().exists());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let mut backend = JsonFileBackend::new(dir.path().join("nested/deeper/records.json"));
        backend.save(&RecordStore::default()).unwrap();
        assert!(backend.path().exists());
    }

    #[test]
    fn temp_path_appends_suffix() {
        let backend = JsonFileBackend::new("data/speed_run_records.json");
        assert_eq!(backend.temp_path(), PathBuf::from("data/speed_run_records.json.tmp"));
    }

    #[test]
    fn legacy_file_is_migrated_on_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, LEGACY_RECORD_FILE).unwrap();

        let store = JsonFileBackend::new(&path).load().unwrap().unwrap();
        assert_eq!(store.active_record().run_count, 12);
    }

    #[test]
    fn corrupt_file_is_reported_and_left_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        fs::write(&path, "{ truncated").unwrap();

        let result = JsonFileBackend::new(&path).load();
        assert!(matches!(result, Err(LedgerError::Parse { .. })));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ truncated");
    }

    #[test]
    fn failed_save_keeps_previous_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("records.json");
        let mut backend = JsonFileBackend::new(&path);
        backend.save(&RecordStore::default()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        // A directory where the temp file should go makes the write fail.
        fs::create_dir(backend.temp_path()).unwrap();
        let err = backend.save(&sample_store()).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(fs::read_to_string(&path).unwrap(), before);
    }
}
