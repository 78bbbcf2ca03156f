//! TCP Server
//!
//! Accepts connections and hands them to a fixed worker pool over a
//! crossbeam channel. Each worker runs one connection at a time to
//! completion; the dispatcher itself is stateless and shared.

use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Receiver, Sender};

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::network::Connection;

/// TCP server for KeelKV
pub struct Server {
    config: Config,
    dispatcher: Arc<Dispatcher>,
    shutdown: Arc<AtomicBool>,
}

impl Server {
    /// Create a new server with the given config and dispatcher
    pub fn new(config: Config, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            config,
            dispatcher,
            shutdown: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Handle for signaling shutdown from another thread
    pub fn shutdown_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.shutdown)
    }

    /// Start the server (blocking)
    ///
    /// Binds the listen address, spawns the worker pool, and accepts
    /// connections until shutdown is signaled.
    pub fn run(&mut self) -> Result<()> {
        let listener = TcpListener::bind(&self.config.listen_addr)?;
        tracing::info!("Listening on {}", self.config.listen_addr);

        let (tx, rx): (Sender<TcpStream>, Receiver<TcpStream>) = channel::unbounded();

        let mut workers = Vec::with_capacity(self.config.worker_threads);
        for id in 0..self.config.worker_threads {
            let rx = rx.clone();
            let dispatcher = Arc::clone(&self.dispatcher);
            let config = self.config.clone();

            workers.push(thread::spawn(move || {
                // Channel disconnect ends the worker.
                while let Ok(stream) = rx.recv() {
                    match Connection::new(stream, Arc::clone(&dispatcher), &config) {
                        Ok(mut conn) => {
                            let peer = conn.peer_addr().to_string();
                            if let Err(e) = conn.handle() {
                                tracing::warn!("Worker {id}: connection {peer} ended: {e}");
                            }
                        }
                        Err(e) => tracing::warn!("Worker {id}: failed to set up connection: {e}"),
                    }
                }
            }));
        }

        for stream in listener.incoming() {
            if self.shutdown.load(Ordering::Relaxed) {
                break;
            }
            match stream {
                Ok(stream) => {
                    if tx.send(stream).is_err() {
                        break;
                    }
                }
                Err(e) => tracing::warn!("Accept failed: {e}"),
            }
        }

        drop(tx);
        for worker in workers {
            let _ = worker.join();
        }

        tracing::info!("Server stopped");
        Ok(())
    }
}
