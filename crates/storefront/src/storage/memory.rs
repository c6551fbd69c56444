//! In-memory storage backend.

use std::cell::RefCell;
use std::rc::Rc;

use super::{CartStorage, StorageError};

#[derive(Debug, Default)]
struct Slot {
    value: Option<String>,
    fail_writes: bool,
    writes: usize,
}

/// A shared in-memory slot.
///
/// Clones share the same slot, so building a second store over a clone
/// behaves like reloading the page against the same local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slot: Rc<RefCell<Slot>>,
}

impl MemoryStorage {
    /// Create an empty slot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-filled with a raw value.
    #[must_use]
    pub fn with_value(value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.slot.borrow_mut().value = Some(value.into());
        storage
    }

    /// Current raw value, if any.
    #[must_use]
    pub fn value(&self) -> Option<String> {
        self.slot.borrow().value.clone()
    }

    /// Number of successful saves.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.slot.borrow().writes
    }

    /// Make subsequent saves fail, as when the storage quota is exhausted.
    pub fn fail_writes(&self, fail: bool) {
        self.slot.borrow_mut().fail_writes = fail;
    }

    /// Drop the stored value, as when the user clears site data.
    pub fn clear(&self) {
        self.slot.borrow_mut().value = None;
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value())
    }

    fn save(&mut self, value: &str) -> Result<(), StorageError> {
        let mut slot = self.slot.borrow_mut();
        if slot.fail_writes {
            return Err(StorageError::Unavailable("quota exceeded".to_string()));
        }
        slot.value = Some(value.to_owned());
        slot.writes += 1;
        Ok(())
    }
}
