//! # KeelKV
//!
//! A drive-style key-value protocol engine:
//! - Length-prefixed binary framing with out-of-band value payloads
//! - Versioned compare-and-swap puts and deletes (optimistic concurrency)
//! - Ordered successor/predecessor key navigation
//! - Per-key access control with deny-by-default ACLs
//! - Explicit SYNC/ASYNC durability levels
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │               (worker pool, one codec per conn)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ frames
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                 Operation Dispatcher                         │
//! │        (authorization, CAS policy, durability)               │
//! └───────┬──────────────────┬──────────────────┬───────────────┘
//!         │                  │                  │
//!         ▼                  ▼                  ▼
//!  ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//!  │ Authorizer  │    │ Durability  │    │    Store    │
//!  │ (ACL table) │    │  Resolver   │    │  (contract) │
//!  └─────────────┘    └─────────────┘    └─────────────┘
//! ```
//!
//! The store is a contract, not an engine: any backend providing atomic
//! per-key check-and-write and byte-ordered navigation can sit behind the
//! dispatcher. [`store::MemoryStore`] is the reference backend.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod acl;
pub mod admin;
pub mod client;
pub mod dispatch;
pub mod network;
pub mod protocol;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use dispatch::{Dispatcher, Durability};
pub use error::{KeelError, Result};
pub use protocol::{FrameCodec, Message};
pub use store::{Entry, MemoryStore, Store};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of KeelKV
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
