//! Storage backend trait for record persistence

use crate::Result;
use crate::types::RecordStore;

/// Trait for places a [`RecordStore`] can be loaded from and saved to.
///
/// Backends abstract over where records live (a JSON file on disk, memory
/// for tests and embedding). The ledger calls `save` after every mutation
/// that must survive a restart.
pub trait StorageBackend {
    /// Load the stored records.
    ///
    /// Returns:
    /// - `Ok(Some(store))` - Records found and decoded
    /// - `Ok(None)` - Nothing stored yet (first run)
    /// - `Err(e)` - Records exist but could not be read or decoded
    fn load(&self) -> Result<Option<RecordStore>>;

    /// Persist `store`, replacing whatever was stored before.
    ///
    /// A failed save must leave the previously stored records intact.
    fn save(&mut self, store: &RecordStore) -> Result<()>;

    /// Human-readable location used in log messages.
    fn location(&self) -> String;
}
