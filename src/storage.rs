//! Key-value storage port.
//!
//! Theme state is persisted as plain string entries. The browser adapter
//! wraps `localStorage`; [`MemoryStore`] backs tests and hosts without one.
//! Callers treat every failure as "value absent".

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Errors produced by storage backends.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The backing store is disabled or inaccessible.
    #[error("storage unavailable")]
    Unavailable,

    /// Reading `key` failed.
    #[error("storage read failed for {key}: {reason}")]
    Read { key: String, reason: String },

    /// Writing or removing `key` failed.
    #[error("storage write failed for {key}: {reason}")]
    Write { key: String, reason: String },
}

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Read `key`, returning `Ok(None)` when it is absent.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] when the backend rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store that counts writes.
///
/// Can be switched into an unavailable state to exercise fallback paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    unavailable: Cell<bool>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that fails every operation with [`StorageError::Unavailable`].
    #[must_use]
    pub fn unavailable() -> Self {
        let store = Self::default();
        store.unavailable.set(true);
        store
    }

    /// Number of successful `set` and `remove` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Direct read that bypasses the availability switch.
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Direct write that bypasses counting, for seeding fixtures.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.unavailable.get() { Err(StorageError::Unavailable) } else { Ok(()) }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.check()?;
        Ok(self.peek(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.check()?;
        self.entries.borrow_mut().remove(key);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}
