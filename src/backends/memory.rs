//! In-memory backend

use tracing::trace;

use crate::Result;
use crate::backend::StorageBackend;
use crate::types::RecordStore;

/// Backend that keeps the last saved store in memory.
///
/// Useful for embedding the ledger where persistence is handled elsewhere,
/// and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    stored: Option<RecordStore>,
    saves: usize,
}

impl MemoryBackend {
    /// Empty backend; loading yields `None`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend that already holds `store`.
    pub fn with_store(store: RecordStore) -> Self {
        Self { stored: Some(store), saves: 0 }
    }

    /// Last saved (or initial) store.
    pub fn stored(&self) -> Option<&RecordStore> {
        self.stored.as_ref()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self) -> Result<Option<RecordStore>> {
        Ok(self.stored.clone())
    }

    fn save(&mut self, store: &RecordStore) -> Result<()> {
        self.stored = Some(store.clone());
        self.saves += 1;
        trace!(saves = self.saves, "Saved records in memory");
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}
