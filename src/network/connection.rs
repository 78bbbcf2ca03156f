//! Connection Handler
//!
//! Handles individual client connections: owns one frame codec, feeds it
//! stream bytes, dispatches complete frames in arrival order, and writes
//! framed responses back. Per-connection response ordering follows from the
//! single-threaded loop.

use std::io::{BufWriter, Read};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::{KeelError, Result};
use crate::protocol::{write_frame, FrameCodec};

/// Read chunk size for the stream loop
const READ_BUF_SIZE: usize = 8 * 1024;

/// Handles a single client connection
pub struct Connection {
    /// Raw stream for reading (the codec does the buffering)
    stream: TcpStream,

    /// Buffered writer half of the same stream
    writer: BufWriter<TcpStream>,

    /// Frame decoder holding this connection's partial bytes
    codec: FrameCodec,

    /// Shared operation dispatcher
    dispatcher: Arc<Dispatcher>,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection {
    /// Create a new connection handler
    pub fn new(stream: TcpStream, dispatcher: Arc<Dispatcher>, config: &Config) -> Result<Self> {
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        if config.read_timeout_ms > 0 {
            stream.set_read_timeout(Some(Duration::from_millis(config.read_timeout_ms)))?;
        }
        if config.write_timeout_ms > 0 {
            stream.set_write_timeout(Some(Duration::from_millis(config.write_timeout_ms)))?;
        }

        let write_stream = stream.try_clone()?;

        Ok(Self {
            stream,
            writer: BufWriter::new(write_stream),
            codec: FrameCodec::with_limits(config.max_message_size, config.max_value_size),
            dispatcher,
            peer_addr,
        })
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Reads bytes in a loop, dispatching every complete frame in the order
    /// received. A framing error is fatal: no further frames on a corrupted
    /// connection can be trusted, so the connection is dropped.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        let mut read_buf = [0u8; READ_BUF_SIZE];

        loop {
            let n = match self.stream.read(&mut read_buf) {
                Ok(0) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Ok(n) => n,
                Err(ref e)
                    if matches!(
                        e.kind(),
                        std::io::ErrorKind::ConnectionReset
                            | std::io::ErrorKind::ConnectionAborted
                    ) =>
                {
                    tracing::debug!("Connection closed by client {}", self.peer_addr);
                    return Ok(());
                }
                Err(ref e)
                    if matches!(
                        e.kind(),
                        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                    ) =>
                {
                    tracing::debug!("Read timeout for client {}", self.peer_addr);
                    return Ok(());
                }
                Err(e) => {
                    tracing::warn!("Error reading from {}: {}", self.peer_addr, e);
                    return Err(e.into());
                }
            };

            self.codec.feed(&read_buf[..n]);

            loop {
                match self.codec.next_frame() {
                    Ok(Some((request, value))) => {
                        tracing::trace!("Request from {}: {:?}", self.peer_addr, request);

                        let (response, response_value) =
                            self.dispatcher.dispatch(&request, value.as_deref());

                        if let Err(e) =
                            write_frame(&mut self.writer, &response, response_value.as_deref())
                        {
                            if client_went_away(&e) {
                                tracing::debug!(
                                    "Client {} disconnected before response could be sent: {}",
                                    self.peer_addr,
                                    e
                                );
                                return Ok(());
                            }
                            tracing::warn!("Error writing to {}: {}", self.peer_addr, e);
                            return Err(e);
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        tracing::warn!(
                            "Framing error from {}, dropping connection: {}",
                            self.peer_addr,
                            e
                        );
                        return Err(e);
                    }
                }
            }
        }
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

/// Whether a write failure means the client is simply gone
fn client_went_away(e: &KeelError) -> bool {
    matches!(
        e,
        KeelError::Io(io_err) if matches!(
            io_err.kind(),
            std::io::ErrorKind::ConnectionAborted
                | std::io::ErrorKind::ConnectionReset
                | std::io::ErrorKind::BrokenPipe
        )
    )
}
