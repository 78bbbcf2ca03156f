//! Error types for KeelKV
//!
//! Provides a unified error type for all operations.
//!
//! The dispatcher-facing variants (`NotFound`, `VersionMismatch`,
//! `NotAuthorized`, `OversizedValue`, `Store`) map onto wire status codes;
//! `Protocol` is the only error that is fatal to a connection.

use thiserror::Error;

use crate::protocol::StatusCode;

/// Result type alias using KeelError
pub type Result<T> = std::result::Result<T, KeelError>;

/// Unified error type for KeelKV operations
#[derive(Debug, Error)]
pub enum KeelError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Framing / Serialization Errors
    // -------------------------------------------------------------------------
    /// Malformed frame: the connection can no longer be trusted.
    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Store Errors
    // -------------------------------------------------------------------------
    #[error("Key not found")]
    NotFound,

    #[error("Version mismatch")]
    VersionMismatch,

    /// Backend failure below the store contract.
    #[error("Store error: {0}")]
    Store(String),

    // -------------------------------------------------------------------------
    // Authorization Errors
    // -------------------------------------------------------------------------
    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    // -------------------------------------------------------------------------
    // Dispatch Errors
    // -------------------------------------------------------------------------
    #[error("value size exceeded max supported size. Supported size: {max}, received size={size} (in bytes)")]
    OversizedValue { size: usize, max: usize },

    #[error("Internal error: {0}")]
    Internal(String),

    // -------------------------------------------------------------------------
    // Admin / Client Interpretation Errors
    // -------------------------------------------------------------------------
    /// A required device-log section was absent from a GETLOG response.
    #[error("Response message error: {0} is missing or empty")]
    MissingLogSection(&'static str),

    /// A reply's message kind or status did not match the issued request.
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl KeelError {
    /// Map an error to the wire status code the dispatcher reports.
    ///
    /// Everything that is not an expected KV outcome collapses to
    /// `InternalError`, matching the dispatcher's catch-all policy.
    pub fn status_code(&self) -> StatusCode {
        match self {
            KeelError::NotFound => StatusCode::NotFound,
            KeelError::VersionMismatch => StatusCode::VersionMismatch,
            KeelError::NotAuthorized(_) => StatusCode::NotAuthorized,
            _ => StatusCode::InternalError,
        }
    }
}
