//! Client Module
//!
//! Interprets completed responses on behalf of callers: per-operation reply
//! validity checks (message kind + status code) and outcome extraction.
//! This module never re-implements dispatcher logic - it only reads what
//! the dispatcher produced.

use crate::error::{KeelError, Result};
use crate::protocol::{Message, MessageType, StatusCode};
use crate::store::Entry;

/// Verify a reply's message kind and status
///
/// A kind other than `expected` is an [`KeelError::UnexpectedResponse`];
/// a non-success status is converted back into the matching error variant
/// so callers see the same taxonomy the dispatcher used.
fn check_reply(response: &Message, expected: MessageType) -> Result<()> {
    let kind = response.header.message_type;
    if kind != Some(expected) {
        return Err(KeelError::UnexpectedResponse(format!(
            "expected {expected:?}, got {kind:?}"
        )));
    }

    let status = response
        .status
        .as_ref()
        .ok_or_else(|| KeelError::UnexpectedResponse("response carries no status".to_string()))?;

    match status.code {
        StatusCode::Success => Ok(()),
        StatusCode::NotFound => Err(KeelError::NotFound),
        StatusCode::VersionMismatch => Err(KeelError::VersionMismatch),
        StatusCode::NotAuthorized => Err(KeelError::NotAuthorized(status.message.clone())),
        StatusCode::InternalError => Err(KeelError::Internal(status.message.clone())),
    }
}

pub fn check_get_reply(response: &Message) -> Result<()> {
    check_reply(response, MessageType::GetResponse)
}

pub fn check_put_reply(response: &Message) -> Result<()> {
    check_reply(response, MessageType::PutResponse)
}

pub fn check_delete_reply(response: &Message) -> Result<()> {
    check_reply(response, MessageType::DeleteResponse)
}

pub fn check_getversion_reply(response: &Message) -> Result<()> {
    check_reply(response, MessageType::GetVersionResponse)
}

pub fn check_getnext_reply(response: &Message) -> Result<()> {
    check_reply(response, MessageType::GetNextResponse)
}

pub fn check_getprevious_reply(response: &Message) -> Result<()> {
    check_reply(response, MessageType::GetPreviousResponse)
}

/// Assemble the entry a read reply describes
///
/// Works for GET, GETNEXT, and GETPREVIOUS replies; `value` is the reply's
/// out-of-band payload (absent on metadata-only reads).
fn entry_outcome(response: Message, value: Option<Vec<u8>>) -> Result<Entry> {
    let kv = response
        .body
        .key_value
        .ok_or_else(|| KeelError::UnexpectedResponse("reply has no key-value body".to_string()))?;

    Ok(Entry {
        key: kv.key,
        value: value.unwrap_or_default(),
        version: kv.db_version,
        tag: kv.tag,
        algorithm: kv.algorithm,
    })
}

/// Outcome of a GET: the stored entry
pub fn get_outcome(response: Message, value: Option<Vec<u8>>) -> Result<Entry> {
    check_get_reply(&response)?;
    entry_outcome(response, value)
}

/// Outcome of a GETNEXT: the successor entry
pub fn getnext_outcome(response: Message, value: Option<Vec<u8>>) -> Result<Entry> {
    check_getnext_reply(&response)?;
    entry_outcome(response, value)
}

/// Outcome of a GETPREVIOUS: the predecessor entry
pub fn getprevious_outcome(response: Message, value: Option<Vec<u8>>) -> Result<Entry> {
    check_getprevious_reply(&response)?;
    entry_outcome(response, value)
}

/// Outcome of a GETVERSION: the entry's current version token
pub fn getversion_outcome(response: Message) -> Result<Vec<u8>> {
    check_getversion_reply(&response)?;

    response
        .body
        .key_value
        .map(|kv| kv.db_version)
        .ok_or_else(|| KeelError::UnexpectedResponse("reply has no key-value body".to_string()))
}

/// Outcome of a PUT: success or the dispatcher's error
pub fn put_outcome(response: Message) -> Result<()> {
    check_put_reply(&response)
}

/// Outcome of a DELETE: success or the dispatcher's error
pub fn delete_outcome(response: Message) -> Result<()> {
    check_delete_reply(&response)
}
