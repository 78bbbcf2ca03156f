//! KeelKV Server Binary
//!
//! Starts the TCP protocol server backed by the in-memory store.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use keelkv::acl::AclAuthorizer;
use keelkv::network::Server;
use keelkv::{Config, Dispatcher, MemoryStore};

/// KeelKV Server
#[derive(Parser, Debug)]
#[command(name = "keelkv-server")]
#[command(about = "Drive-style key-value protocol server")]
#[command(version)]
struct Args {
    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8123")]
    listen: String,

    /// Connection worker threads
    #[arg(short, long, default_value = "8")]
    workers: usize,

    /// Maximum attached value size in MB
    #[arg(short = 'm', long, default_value = "1")]
    max_value_mb: usize,

    /// Identity granted full access (everything else is denied)
    #[arg(short, long, default_value = "1")]
    identity: i64,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,keelkv=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    tracing::info!("KeelKV Server v{}", keelkv::VERSION);
    tracing::info!("Listen address: {}", args.listen);
    tracing::info!("Full access granted to identity {}", args.identity);

    let config = Config::builder()
        .listen_addr(&args.listen)
        .worker_threads(args.workers)
        .max_value_size(args.max_value_mb * 1024 * 1024)
        .build();

    let store = Arc::new(MemoryStore::new());
    let authorizer = Arc::new(AclAuthorizer::new().allow_all(args.identity));
    let dispatcher = Arc::new(Dispatcher::with_max_value_size(
        store,
        authorizer,
        config.max_value_size,
    ));

    let mut server = Server::new(config, dispatcher);
    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
