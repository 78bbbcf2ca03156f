//! In-memory store backend
//!
//! BTreeMap-based reference implementation of the [`Store`] contract.
//! The write lock makes every conditional mutation an atomic
//! check-and-write; `BTreeMap`'s byte ordering over `Vec<u8>` keys is
//! exactly the protocol's total order, so neighbor navigation falls out of
//! `range` with an excluded bound.

use std::collections::BTreeMap;
use std::ops::Bound::{Excluded, Unbounded};

use parking_lot::RwLock;

use crate::dispatch::Durability;
use crate::error::{KeelError, Result};
use super::{Entry, Store};

/// In-memory ordered, versioned store
///
/// Durability is accepted and ignored: memory is its own persistence
/// boundary, so SYNC and ASYNC are indistinguishable here. Disk-backed
/// backends must honor the distinction.
pub struct MemoryStore {
    data: RwLock<BTreeMap<Vec<u8>, Entry>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of entries currently stored
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Store for MemoryStore {
    fn get(&self, key: &[u8]) -> Result<Entry> {
        self.data.read().get(key).cloned().ok_or(KeelError::NotFound)
    }

    fn get_next(&self, key: &[u8]) -> Result<Entry> {
        self.data
            .read()
            .range::<[u8], _>((Excluded(key), Unbounded))
            .next()
            .map(|(_, entry)| entry.clone())
            .ok_or(KeelError::NotFound)
    }

    fn get_previous(&self, key: &[u8]) -> Result<Entry> {
        self.data
            .read()
            .range::<[u8], _>((Unbounded, Excluded(key)))
            .next_back()
            .map(|(_, entry)| entry.clone())
            .ok_or(KeelError::NotFound)
    }

    fn put(
        &self,
        key: &[u8],
        expected_version: &[u8],
        entry: Entry,
        _durability: Durability,
    ) -> Result<()> {
        let mut data = self.data.write();

        let current_version = data.get(key).map(|e| e.version.as_slice()).unwrap_or(&[]);
        if current_version != expected_version {
            return Err(KeelError::VersionMismatch);
        }

        data.insert(key.to_vec(), entry);
        Ok(())
    }

    fn put_forced(&self, key: &[u8], entry: Entry, _durability: Durability) -> Result<()> {
        self.data.write().insert(key.to_vec(), entry);
        Ok(())
    }

    fn delete(&self, key: &[u8], expected_version: &[u8], _durability: Durability) -> Result<()> {
        let mut data = self.data.write();

        let current = data.get(key).ok_or(KeelError::NotFound)?;
        if current.version != expected_version {
            return Err(KeelError::VersionMismatch);
        }

        data.remove(key);
        Ok(())
    }

    fn delete_forced(&self, key: &[u8], _durability: Durability) -> Result<()> {
        self.data.write().remove(key);
        Ok(())
    }
}
