//! Protocol Module
//!
//! Defines the wire protocol between clients and a KeelKV target.
//!
//! ## Frame Format
//!
//! ```text
//! ┌──────────┬─────────────┬─────────────┬─────────────┬────────────┐
//! │ 'F' (1)  │ msg_len (4) │ val_len (4) │ message     │ value      │
//! └──────────┴─────────────┴─────────────┴─────────────┴────────────┘
//! ```
//!
//! The structured message carries the header (sequence, identity, message
//! type), the operation body, and on responses a status; the opaque value
//! payload travels after it, outside the structured fields.
//!
//! ### Message Kinds
//! - GET / GETVERSION / GETNEXT / GETPREVIOUS - reads, require READ
//! - PUT - versioned compare-and-swap write, requires WRITE
//! - DELETE - versioned compare-and-swap delete, requires DELETE
//! - GETLOG - device status retrieval (admin collaborator)
//!
//! ### Status Codes
//! SUCCESS, NOT_FOUND, VERSION_MISMATCH, NOT_AUTHORIZED, INTERNAL_ERROR

mod codec;
mod message;

pub use codec::{encode_frame, read_frame, write_frame, FrameCodec, FRAME_HEADER_SIZE, MAGIC};
pub use message::{
    Algorithm, Body, Capacity, Configuration, GetLogBody, Header, KeyValue, Limits, Message,
    MessageType, NetInterface, Statistic, Status, StatusCode, Synchronization, Temperature,
    Utilization,
};
