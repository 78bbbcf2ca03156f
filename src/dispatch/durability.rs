//! Durability resolution
//!
//! Maps a request's synchronization preference to the durability level the
//! store must honor. Pure function, no failure modes.

use crate::protocol::Synchronization;

/// Durability level a mutation must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Durability {
    /// Caller-visible completion implies durable persistence
    Sync,

    /// Completion may be acknowledged before persistence; the store
    /// guarantees eventual durability
    Async,
}

/// Resolve a synchronization preference to a durability level
///
/// WRITETHROUGH and FLUSH demand persistence before acknowledgment;
/// WRITEBACK allows deferred persistence. An unset preference fails toward
/// the stronger guarantee.
pub fn resolve(synchronization: Option<Synchronization>) -> Durability {
    match synchronization {
        Some(Synchronization::WriteBack) => Durability::Async,
        Some(Synchronization::WriteThrough) | Some(Synchronization::Flush) | None => {
            Durability::Sync
        }
    }
}
