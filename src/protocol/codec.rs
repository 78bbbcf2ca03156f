//! Frame codec
//!
//! Bidirectional translation between a byte stream and discrete
//! (structured message, opaque value) pairs. The codec knows nothing about
//! key-value semantics.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬─────────────┬─────────────┬─────────────┬────────────┐
//! │ 'F' (1)  │ msg_len (4) │ val_len (4) │ message     │ value      │
//! └──────────┴─────────────┴─────────────┴─────────────┴────────────┘
//! ```
//!
//! Both lengths are big-endian u32. `val_len` is written even when zero -
//! omitting it is a framing bug, not an optimization. The structured message
//! is bincode-serialized; the value rides out-of-band so large payloads never
//! pass through structured fields.
//!
//! Decoding is resumable: [`FrameCodec`] buffers partial deliveries and
//! yields a frame only once all declared bytes are present. It never performs
//! I/O itself; waiting on the network is the transport's job.

use std::io::{Read, Write};

use bytes::{Buf, BytesMut};

use crate::config::{DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_MAX_VALUE_SIZE};
use crate::error::{KeelError, Result};
use crate::protocol::Message;

/// Magic byte opening every frame, fixed for this protocol version
pub const MAGIC: u8 = b'F';

/// Frame header size: magic (1) + message length (4) + value length (4)
pub const FRAME_HEADER_SIZE: usize = 9;

/// Encode a structured message and optional value into one frame
///
/// A `None` or empty value writes an explicit zero value-length field.
pub fn encode_frame(message: &Message, value: Option<&[u8]>) -> Result<Vec<u8>> {
    let message_bytes =
        bincode::serialize(message).map_err(|e| KeelError::Serialization(e.to_string()))?;
    let value_bytes = value.unwrap_or(&[]);

    let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + message_bytes.len() + value_bytes.len());
    frame.push(MAGIC);
    frame.extend_from_slice(&(message_bytes.len() as u32).to_be_bytes());
    frame.extend_from_slice(&(value_bytes.len() as u32).to_be_bytes());
    frame.extend_from_slice(&message_bytes);
    if !value_bytes.is_empty() {
        frame.extend_from_slice(value_bytes);
    }

    tracing::trace!(
        msg_len = message_bytes.len(),
        val_len = value_bytes.len(),
        "encoded frame: {:?}",
        message
    );

    Ok(frame)
}

/// Resumable frame decoder for one connection's byte stream
///
/// Holds no state across frames except unconsumed partial bytes; must not be
/// shared between connections.
pub struct FrameCodec {
    /// Unconsumed bytes delivered so far
    buffer: BytesMut,

    /// Largest accepted serialized-message length
    max_message_size: usize,

    /// Largest accepted attached-value length
    max_value_size: usize,
}

impl FrameCodec {
    /// Create a codec with the default protocol limits
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_MAX_MESSAGE_SIZE, DEFAULT_MAX_VALUE_SIZE)
    }

    /// Create a codec with explicit limits
    pub fn with_limits(max_message_size: usize, max_value_size: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(8 * 1024),
            max_message_size,
            max_value_size,
        }
    }

    /// Append newly delivered bytes to the decode buffer
    pub fn feed(&mut self, bytes: &[u8]) {
        self.buffer.extend_from_slice(bytes);
    }

    /// Bytes currently buffered but not yet consumed
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Try to decode the next complete frame
    ///
    /// Returns `Ok(None)` when fewer than the declared header + body bytes
    /// are available; buffered bytes are retained for the next attempt.
    /// A malformed magic byte or an over-limit declared length is a
    /// [`KeelError::Protocol`]: the connection is corrupted and no further
    /// frames on it can be trusted.
    pub fn next_frame(&mut self) -> Result<Option<(Message, Option<Vec<u8>>)>> {
        if self.buffer.len() < FRAME_HEADER_SIZE {
            return Ok(None);
        }

        // Validate the header without consuming it; the body may not have
        // arrived yet.
        let header = &self.buffer[..FRAME_HEADER_SIZE];
        if header[0] != MAGIC {
            return Err(KeelError::Protocol(format!(
                "bad magic byte: expected 0x{MAGIC:02x}, got 0x{:02x}",
                header[0]
            )));
        }

        let message_len =
            u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;
        let value_len = u32::from_be_bytes([header[5], header[6], header[7], header[8]]) as usize;

        if message_len > self.max_message_size {
            return Err(KeelError::Protocol(format!(
                "declared message length {} exceeds maximum {}",
                message_len, self.max_message_size
            )));
        }
        if value_len > self.max_value_size {
            return Err(KeelError::Protocol(format!(
                "declared value length {} exceeds maximum {}",
                value_len, self.max_value_size
            )));
        }

        let total = FRAME_HEADER_SIZE + message_len + value_len;
        if self.buffer.len() < total {
            return Ok(None);
        }

        self.buffer.advance(FRAME_HEADER_SIZE);
        let message_bytes = self.buffer.split_to(message_len);
        let message: Message = bincode::deserialize(&message_bytes)
            .map_err(|e| KeelError::Protocol(format!("undecodable message: {e}")))?;

        let value = if value_len > 0 {
            Some(self.buffer.split_to(value_len).to_vec())
        } else {
            None
        };

        tracing::trace!(
            msg_len = message_len,
            val_len = value_len,
            "decoded frame: {:?}",
            message
        );

        Ok(Some((message, value)))
    }
}

impl Default for FrameCodec {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one complete frame from a blocking stream
///
/// Blocks until the full frame arrives or the stream errors. Used by clients;
/// the server side decodes through [`FrameCodec`] instead.
pub fn read_frame<R: Read>(reader: &mut R) -> Result<(Message, Option<Vec<u8>>)> {
    let mut header = [0u8; FRAME_HEADER_SIZE];
    reader.read_exact(&mut header)?;

    if header[0] != MAGIC {
        return Err(KeelError::Protocol(format!(
            "bad magic byte: expected 0x{MAGIC:02x}, got 0x{:02x}",
            header[0]
        )));
    }

    let message_len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]) as usize;
    let value_len = u32::from_be_bytes([header[5], header[6], header[7], header[8]]) as usize;

    if message_len > DEFAULT_MAX_MESSAGE_SIZE {
        return Err(KeelError::Protocol(format!(
            "declared message length {} exceeds maximum {}",
            message_len, DEFAULT_MAX_MESSAGE_SIZE
        )));
    }
    if value_len > DEFAULT_MAX_VALUE_SIZE {
        return Err(KeelError::Protocol(format!(
            "declared value length {} exceeds maximum {}",
            value_len, DEFAULT_MAX_VALUE_SIZE
        )));
    }

    let mut message_bytes = vec![0u8; message_len];
    reader.read_exact(&mut message_bytes)?;
    let message: Message = bincode::deserialize(&message_bytes)
        .map_err(|e| KeelError::Protocol(format!("undecodable message: {e}")))?;

    let value = if value_len > 0 {
        let mut value_bytes = vec![0u8; value_len];
        reader.read_exact(&mut value_bytes)?;
        Some(value_bytes)
    } else {
        None
    };

    Ok((message, value))
}

/// Write one frame to a blocking stream and flush it
pub fn write_frame<W: Write>(
    writer: &mut W,
    message: &Message,
    value: Option<&[u8]>,
) -> Result<()> {
    let bytes = encode_frame(message, value)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
