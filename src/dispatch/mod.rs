//! Dispatch Module
//!
//! The operation state machine: one invocation per decoded request. The
//! dispatcher interprets the request against the store, enforcing
//! authorization, optimistic concurrency, and durability policy, and
//! produces exactly one structured response.
//!
//! ## Dispatch Steps
//! 1. Resolve durability from the synchronization preference
//! 2. Resolve the permission the operation requires
//! 3. Authorize against the key actually touched (for neighbor navigation
//!    that is the *resolved* neighbor key, checked after resolution)
//! 4. Invoke the store operation
//! 5. Assemble the response once, immutably: ack sequence, the fixed
//!    `…_RESPONSE` kind, body metadata, out-of-band value, status
//!
//! The response kind is stamped during final assembly, which runs on every
//! path - a handler failing mid-operation still yields a correctly-typed
//! response. The dispatcher holds no state across calls and is safe to
//! invoke concurrently as long as the store's mutations are atomic per key.

mod durability;

pub use durability::{resolve, Durability};

use std::sync::Arc;

use crate::acl::{Authorizer, Permission};
use crate::config::DEFAULT_MAX_VALUE_SIZE;
use crate::error::{KeelError, Result};
use crate::protocol::{Body, Header, KeyValue, Message, MessageType, Status};
use crate::store::{Entry, Store};

/// Successful handler output: response body metadata plus optional value
struct Reply {
    key_value: Option<KeyValue>,
    value: Option<Vec<u8>>,
}

impl Reply {
    fn metadata(key_value: KeyValue) -> Self {
        Self {
            key_value: Some(key_value),
            value: None,
        }
    }

    fn empty() -> Self {
        Self {
            key_value: None,
            value: None,
        }
    }
}

/// Single-pass, synchronous request dispatcher
///
/// A pure function of (request, store, authorizer): it never caches entries
/// or version tokens across invocations - every conditional write
/// re-validates at the store, which is the sole arbiter of the atomic
/// check-and-write.
pub struct Dispatcher {
    store: Arc<dyn Store>,
    authorizer: Arc<dyn Authorizer>,
    max_value_size: usize,
}

impl Dispatcher {
    /// Create a dispatcher with the default value-size limit
    pub fn new(store: Arc<dyn Store>, authorizer: Arc<dyn Authorizer>) -> Self {
        Self::with_max_value_size(store, authorizer, DEFAULT_MAX_VALUE_SIZE)
    }

    /// Create a dispatcher with an explicit value-size limit
    pub fn with_max_value_size(
        store: Arc<dyn Store>,
        authorizer: Arc<dyn Authorizer>,
        max_value_size: usize,
    ) -> Self {
        Self {
            store,
            authorizer,
            max_value_size,
        }
    }

    /// Execute one decoded request and produce its response
    ///
    /// Never fails outward: store and authorizer failures are converted to
    /// a status code in the response, so a single bad request cannot take
    /// down the transport. The response echoes the request's sequence in
    /// `ack_sequence` and always carries the operation's `…_RESPONSE` kind.
    pub fn dispatch(&self, request: &Message, value: Option<&[u8]>) -> (Message, Option<Vec<u8>>) {
        let op = request.header.message_type;
        let outcome = self.run(op, request, value);

        let (key_value, response_value, status) = match outcome {
            Ok(reply) => (reply.key_value, reply.value, Status::success()),
            Err(e) => {
                let code = e.status_code();
                tracing::debug!(?op, ?code, "operation failed: {e}");
                (
                    None,
                    None,
                    Status {
                        code,
                        message: e.to_string(),
                    },
                )
            }
        };

        let response = Message {
            header: Header {
                connection_id: request.header.connection_id,
                sequence: 0,
                ack_sequence: request.header.sequence,
                identity: request.header.identity,
                message_type: op.map(MessageType::response_kind),
            },
            body: Body {
                key_value,
                get_log: None,
            },
            status: Some(status),
        };

        (response, response_value)
    }

    fn run(
        &self,
        op: Option<MessageType>,
        request: &Message,
        value: Option<&[u8]>,
    ) -> Result<Reply> {
        let identity = request.header.identity;
        let kv = request
            .body
            .key_value
            .as_ref()
            .ok_or_else(|| KeelError::Internal("request has no key-value body".to_string()));

        match op {
            Some(MessageType::Get) => self.handle_get(identity, kv?),
            Some(MessageType::GetVersion) => self.handle_get_version(identity, kv?),
            Some(MessageType::GetNext) => self.handle_get_next(identity, kv?),
            Some(MessageType::GetPrevious) => self.handle_get_previous(identity, kv?),
            Some(MessageType::Put) => self.handle_put(identity, kv?, value),
            Some(MessageType::Delete) => self.handle_delete(identity, kv?),
            _ => Err(KeelError::Internal("unknown request".to_string())),
        }
    }

    // =========================================================================
    // Operation Handlers
    // =========================================================================

    fn handle_get(&self, identity: i64, kv: &KeyValue) -> Result<Reply> {
        self.authorizer.check(identity, Permission::Read, &kv.key)?;

        let entry = self.store.get(&kv.key)?;
        Ok(read_reply(entry, kv.metadata_only))
    }

    fn handle_get_version(&self, identity: i64, kv: &KeyValue) -> Result<Reply> {
        self.authorizer.check(identity, Permission::Read, &kv.key)?;

        let entry = self.store.get(&kv.key)?;
        Ok(Reply::metadata(KeyValue {
            db_version: entry.version,
            ..KeyValue::default()
        }))
    }

    fn handle_get_next(&self, identity: i64, kv: &KeyValue) -> Result<Reply> {
        let entry = self.store.get_next(&kv.key)?;

        // The caller must not learn the neighbor's existence or content
        // unless authorized for the neighbor key itself.
        self.authorizer
            .check(identity, Permission::Read, &entry.key)?;

        Ok(read_reply(entry, kv.metadata_only))
    }

    fn handle_get_previous(&self, identity: i64, kv: &KeyValue) -> Result<Reply> {
        let entry = self.store.get_previous(&kv.key)?;

        self.authorizer
            .check(identity, Permission::Read, &entry.key)?;

        Ok(read_reply(entry, kv.metadata_only))
    }

    fn handle_put(&self, identity: i64, kv: &KeyValue, value: Option<&[u8]>) -> Result<Reply> {
        // Size validation runs before authorization or any store access, so
        // an oversized value can never reach the store or leak key state.
        let size = value.map(<[u8]>::len).unwrap_or(0);
        if size > self.max_value_size {
            return Err(KeelError::OversizedValue {
                size,
                max: self.max_value_size,
            });
        }

        self.authorizer.check(identity, Permission::Write, &kv.key)?;

        let durability = resolve(kv.synchronization);
        let entry = Entry {
            key: kv.key.clone(),
            value: value.map(<[u8]>::to_vec).unwrap_or_default(),
            version: kv.new_version.clone(),
            tag: kv.tag.clone(),
            algorithm: kv.algorithm,
        };

        if kv.force {
            self.store.put_forced(&kv.key, entry, durability)?;
        } else {
            self.store.put(&kv.key, &kv.db_version, entry, durability)?;
        }

        Ok(Reply::empty())
    }

    fn handle_delete(&self, identity: i64, kv: &KeyValue) -> Result<Reply> {
        self.authorizer.check(identity, Permission::Delete, &kv.key)?;

        let durability = resolve(kv.synchronization);
        if kv.force {
            self.store.delete_forced(&kv.key, durability)?;
        } else {
            self.store.delete(&kv.key, &kv.db_version, durability)?;
        }

        Ok(Reply::empty())
    }
}

/// Build the reply for a read: entry metadata, plus the value unless the
/// request asked for metadata only
fn read_reply(entry: Entry, metadata_only: bool) -> Reply {
    let value = if metadata_only { None } else { Some(entry.value) };
    Reply {
        key_value: Some(KeyValue {
            key: entry.key,
            db_version: entry.version,
            tag: entry.tag,
            algorithm: entry.algorithm,
            ..KeyValue::default()
        }),
        value,
    }
}
