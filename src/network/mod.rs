//! Network Module
//!
//! Blocking TCP transport: an accept loop feeding a worker pool, and a
//! per-connection framing loop. The transport owns all network waiting;
//! the codec and dispatcher never block on I/O themselves.

mod connection;
mod server;

pub use connection::Connection;
pub use server::Server;
