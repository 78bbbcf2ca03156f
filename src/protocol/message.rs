//! Structured message definitions
//!
//! The structured message is everything in a frame except the large opaque
//! value payload: header, operation body, and (on responses) status. It is
//! serialized with bincode inside the hand-written frame envelope.

use serde::{Deserialize, Serialize};

/// Message kinds carried in the header
///
/// Each request kind has a fixed `…Response` counterpart; the dispatcher
/// stamps the counterpart onto the response even when the operation fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageType {
    Get,
    GetResponse,
    Put,
    PutResponse,
    Delete,
    DeleteResponse,
    GetVersion,
    GetVersionResponse,
    GetNext,
    GetNextResponse,
    GetPrevious,
    GetPreviousResponse,
    GetLog,
    GetLogResponse,
}

impl MessageType {
    /// The response kind paired with this request kind.
    ///
    /// Response kinds map to themselves so a malformed request (a response
    /// kind arriving inbound) still gets a correctly-typed reply.
    pub fn response_kind(self) -> MessageType {
        match self {
            MessageType::Get => MessageType::GetResponse,
            MessageType::Put => MessageType::PutResponse,
            MessageType::Delete => MessageType::DeleteResponse,
            MessageType::GetVersion => MessageType::GetVersionResponse,
            MessageType::GetNext => MessageType::GetNextResponse,
            MessageType::GetPrevious => MessageType::GetPreviousResponse,
            MessageType::GetLog => MessageType::GetLogResponse,
            other => other,
        }
    }

    /// True for the `…Response` kinds
    pub fn is_response(self) -> bool {
        matches!(
            self,
            MessageType::GetResponse
                | MessageType::PutResponse
                | MessageType::DeleteResponse
                | MessageType::GetVersionResponse
                | MessageType::GetNextResponse
                | MessageType::GetPreviousResponse
                | MessageType::GetLogResponse
        )
    }
}

/// Caller's durability preference for a mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Synchronization {
    /// Persist before acknowledging
    WriteThrough,

    /// Acknowledge first, persist eventually
    WriteBack,

    /// Persist this and all previously acknowledged writes
    Flush,
}

/// Checksum/hash algorithm that produced an entry's integrity tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    Sha1,
    Sha2,
    Sha3,
    Crc32,
    Crc64,
}

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusCode {
    Success,
    NotFound,
    VersionMismatch,
    NotAuthorized,
    InternalError,
}

/// Response status: code plus human-readable detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    pub code: StatusCode,
    pub message: String,
}

impl Status {
    pub fn success() -> Self {
        Self {
            code: StatusCode::Success,
            message: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == StatusCode::Success
    }
}

/// Message header
///
/// `ack_sequence` on a response always carries the request's `sequence` so
/// callers can correlate replies on a pipelined connection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Connection the message belongs to
    pub connection_id: i64,

    /// Caller-assigned sequence number, monotonic per connection
    pub sequence: u64,

    /// Sequence number of the request this message acknowledges
    pub ack_sequence: u64,

    /// Authenticated identity of the requester
    pub identity: i64,

    /// Operation / response kind
    pub message_type: Option<MessageType>,
}

/// Key-value operation fields
///
/// `new_version`, `db_version`, and `tag` are opaque byte sequences. Version
/// tokens are compared by exact byte equality only; an empty `db_version` is
/// the sentinel for "no prior version exists".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    /// Lookup / sort key
    pub key: Vec<u8>,

    /// Version token the entry will carry after a PUT
    pub new_version: Vec<u8>,

    /// Expected current version token (CAS comparand); on responses, the
    /// stored entry's version
    pub db_version: Vec<u8>,

    /// Caller-supplied integrity tag
    pub tag: Vec<u8>,

    /// Algorithm that produced the tag
    pub algorithm: Option<Algorithm>,

    /// Durability preference; unset resolves to the stronger guarantee
    pub synchronization: Option<Synchronization>,

    /// Respond with metadata only, no value payload
    pub metadata_only: bool,

    /// Bypass optimistic-concurrency checking
    pub force: bool,
}

/// Message body: at most one operation-specific section is populated
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub key_value: Option<KeyValue>,
    pub get_log: Option<GetLogBody>,
}

/// A decoded request or response, minus the out-of-band value payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub header: Header,
    pub body: Body,

    /// Populated on responses only
    pub status: Option<Status>,
}

impl Message {
    /// Create a request of the given kind with an empty body
    pub fn request(message_type: MessageType, identity: i64, sequence: u64) -> Self {
        Self {
            header: Header {
                message_type: Some(message_type),
                identity,
                sequence,
                ..Header::default()
            },
            body: Body::default(),
            status: None,
        }
    }

    /// Create a key-value request of the given kind
    pub fn kv_request(
        message_type: MessageType,
        identity: i64,
        sequence: u64,
        key_value: KeyValue,
    ) -> Self {
        let mut msg = Self::request(message_type, identity, sequence);
        msg.body.key_value = Some(key_value);
        msg
    }

    /// Status code of a response, `InternalError` if the status is absent
    pub fn status_code(&self) -> StatusCode {
        self.status
            .as_ref()
            .map(|s| s.code)
            .unwrap_or(StatusCode::InternalError)
    }
}

// =============================================================================
// Device Log Sections (GETLOG responses)
// =============================================================================

/// Device-status payload of a GETLOG response
///
/// Every section is optional on the wire; the typed accessors in
/// [`crate::admin::DeviceLog`] validate presence before exposing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GetLogBody {
    pub utilization: Vec<Utilization>,
    pub temperature: Vec<Temperature>,
    pub capacity: Option<Capacity>,
    pub configuration: Option<Configuration>,
    pub statistics: Vec<Statistic>,
    pub limits: Option<Limits>,
}

/// Utilization of one device component (0.0 - 1.0)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Utilization {
    pub name: String,
    pub value: f32,
}

/// Temperature readings for one sensor, degrees Celsius
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Temperature {
    pub name: String,
    pub current: Option<f32>,
    pub minimum: Option<f32>,
    pub maximum: Option<f32>,
    pub target: Option<f32>,
}

/// Device capacity summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Capacity {
    pub nominal_capacity_bytes: Option<u64>,
    pub portion_full: Option<f32>,
}

/// Static device configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    pub vendor: Option<String>,
    pub model: Option<String>,
    pub serial_number: Option<String>,
    pub version: Option<String>,
    pub compilation_date: Option<String>,
    pub protocol_version: Option<String>,
    pub port: Option<u16>,
    pub tls_port: Option<u16>,
    pub interfaces: Vec<NetInterface>,
}

/// One network interface of the device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetInterface {
    pub name: String,
    pub mac: Option<String>,
    pub ipv4_address: Option<String>,
    pub ipv6_address: Option<String>,
}

/// Per-operation counters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistic {
    pub message_type: Option<MessageType>,
    pub count: Option<u64>,
    pub bytes: Option<u64>,
}

/// Protocol limits advertised by the device
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub max_key_size: Option<u32>,
    pub max_value_size: Option<u32>,
    pub max_version_size: Option<u32>,
    pub max_tag_size: Option<u32>,
    pub max_connections: Option<u32>,
    pub max_outstanding_read_requests: Option<u32>,
    pub max_outstanding_write_requests: Option<u32>,
    pub max_message_size: Option<u32>,
}
