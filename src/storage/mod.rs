//! Client-local key/value storage for the persisted best streak.
//!
//! The engine persists exactly one value. [`ScoreStore`] keeps the backend
//! swappable: [`MemoryStore`] for tests and embedding, [`FileStore`] for a
//! desktop client. Values are stored as strings, matching the browser
//! storage the game was designed around.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Storage backend failures. Gameplay never sees these; the best-streak
/// tracker logs them and keeps its in-memory value.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Keys become file names, so they are restricted to `[A-Za-z0-9._-]`.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// The backend could not read or write the value.
    #[error("storage I/O failed for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// A string key/value store scoped to one client.
pub trait ScoreStore {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

pub(crate) fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && key != "."
        && key != ".."
        && key.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}
