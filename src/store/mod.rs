//! Store Module
//!
//! The contract any storage backend must satisfy to sit behind the
//! dispatcher: an ordered, versioned key-value store with atomic
//! compare-and-swap mutations and forced bypass variants.
//!
//! Version tokens are opaque byte sequences compared by exact byte equality
//! only - a backend may use content hashes, counters, or random tokens
//! interchangeably; the dispatcher never interprets their structure. Keys
//! are totally ordered lexicographically by unsigned byte value, which is
//! what successor/predecessor navigation is defined over.

mod memory;

pub use memory::MemoryStore;

use crate::dispatch::Durability;
use crate::error::Result;
use crate::protocol::Algorithm;

/// One stored key-value entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Lookup / sort key, unique within the store
    pub key: Vec<u8>,

    /// Opaque value payload
    pub value: Vec<u8>,

    /// Opaque version token; byte-equality comparison only
    pub version: Vec<u8>,

    /// Caller-supplied integrity tag
    pub tag: Vec<u8>,

    /// Algorithm that produced the tag
    pub algorithm: Option<Algorithm>,
}

/// Ordered, versioned key-value store contract
///
/// Conditional mutations (`put`, `delete`) are optimistic concurrency
/// control at single-key granularity: no lock is held between a caller's
/// read and its conditional write, so the backend must perform the
/// check-and-write as one atomic step. Errors use the crate taxonomy:
/// `KeelError::NotFound`, `KeelError::VersionMismatch`, and
/// `KeelError::Store` for backend failures.
pub trait Store: Send + Sync {
    /// Look up the entry stored under `key`
    fn get(&self, key: &[u8]) -> Result<Entry>;

    /// Entry with the smallest key strictly greater than `key`
    ///
    /// `key` itself need not exist in the store.
    fn get_next(&self, key: &[u8]) -> Result<Entry>;

    /// Entry with the largest key strictly less than `key`
    fn get_previous(&self, key: &[u8]) -> Result<Entry>;

    /// Conditionally write `entry` under `key`
    ///
    /// Succeeds only if the store's current version token for `key` equals
    /// `expected_version` byte-for-byte. For a key with no prior entry the
    /// caller must pass the empty-token sentinel; a non-empty expectation on
    /// an absent key fails with `VersionMismatch`.
    fn put(
        &self,
        key: &[u8],
        expected_version: &[u8],
        entry: Entry,
        durability: Durability,
    ) -> Result<()>;

    /// Unconditionally write `entry`, bypassing version comparison
    fn put_forced(&self, key: &[u8], entry: Entry, durability: Durability) -> Result<()>;

    /// Conditionally remove `key`, same comparison discipline as `put`
    ///
    /// An absent key is `NotFound`.
    fn delete(&self, key: &[u8], expected_version: &[u8], durability: Durability) -> Result<()>;

    /// Unconditionally remove `key`; absence is not an error
    fn delete_forced(&self, key: &[u8], durability: Durability) -> Result<()>;
}
