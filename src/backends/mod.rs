//! Storage backend implementations

mod json_file;
mod memory;

pub use json_file::{DEFAULT_RECORD_FILE, JsonFileBackend};
pub use memory::MemoryBackend;
