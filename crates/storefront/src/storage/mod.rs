//! Durable storage for the serialized cart.
//!
//! # Architecture
//!
//! The cart store only ever reads the whole serialized cart once at startup
//! and overwrites it after each mutation, so the storage seam is two calls:
//! [`CartStorage::load`] and [`CartStorage::save`]. The store owns decoding;
//! backends move opaque strings.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - shared in-process slot, used by tests and demos
//! - [`FileStorage`] - JSON key/value file standing in for browser local storage

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors that can occur when reading or writing persisted cart state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing store is not the expected JSON shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The backend refused the operation (e.g. quota exceeded).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Key-scoped durable storage holding one serialized cart.
pub trait CartStorage {
    /// Read the stored value. `Ok(None)` means nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replace the stored value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write does not complete.
    fn save(&mut self, value: &str) -> Result<(), StorageError>;
}

impl<S: CartStorage + ?Sized> CartStorage for Box<S> {
    fn load(&self) -> Result<Option<String>, StorageError> {
        (**self).load()
    }

    fn save(&mut self, value: &str) -> Result<(), StorageError> {
        (**self).save(value)
    }
}
