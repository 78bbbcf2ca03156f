//! KeelKV CLI Client
//!
//! Command-line client for a KeelKV server. Sends one request per
//! invocation over a fresh connection and interprets the reply with the
//! client outcome helpers.

use std::net::TcpStream;

use clap::{Parser, Subcommand};

use keelkv::client;
use keelkv::protocol::{read_frame, write_frame, Algorithm, KeyValue, Message, MessageType};
use keelkv::Result;

/// KeelKV CLI
#[derive(Parser, Debug)]
#[command(name = "keelkv-cli")]
#[command(about = "CLI client for the KeelKV protocol server")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:8123")]
    server: String,

    /// Identity to issue requests as
    #[arg(short, long, default_value = "1")]
    identity: i64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get an entry by key
    Get {
        key: String,

        /// Fetch metadata only, no value payload
        #[arg(long)]
        metadata_only: bool,
    },

    /// Put a key-value pair (CAS against the expected version)
    Put {
        key: String,
        value: String,

        /// Version token the entry will carry
        #[arg(long, default_value = "1")]
        new_version: String,

        /// Expected current version (empty for a fresh key)
        #[arg(long, default_value = "")]
        db_version: String,

        /// Bypass version checking
        #[arg(long)]
        force: bool,
    },

    /// Delete a key (CAS against the expected version)
    Del {
        key: String,

        /// Expected current version
        #[arg(long, default_value = "")]
        db_version: String,

        /// Bypass version checking
        #[arg(long)]
        force: bool,
    },

    /// Get the version token of a key
    GetVersion { key: String },

    /// Get the entry after the given key
    GetNext { key: String },

    /// Get the entry before the given key
    GetPrev { key: String },
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut stream = TcpStream::connect(&args.server)?;

    let (request, value) = build_request(&args);
    write_frame(&mut stream, &request, value.as_deref())?;
    let (response, response_value) = read_frame(&mut stream)?;

    match args.command {
        Commands::Get { .. } => {
            let entry = client::get_outcome(response, response_value)?;
            print_entry(&entry);
        }
        Commands::Put { .. } => {
            client::put_outcome(response)?;
            println!("OK");
        }
        Commands::Del { .. } => {
            client::delete_outcome(response)?;
            println!("OK");
        }
        Commands::GetVersion { .. } => {
            let version = client::getversion_outcome(response)?;
            println!("version: {}", String::from_utf8_lossy(&version));
        }
        Commands::GetNext { .. } => {
            let entry = client::getnext_outcome(response, response_value)?;
            print_entry(&entry);
        }
        Commands::GetPrev { .. } => {
            let entry = client::getprevious_outcome(response, response_value)?;
            print_entry(&entry);
        }
    }

    Ok(())
}

fn build_request(args: &Args) -> (Message, Option<Vec<u8>>) {
    let (kind, kv, value) = match &args.command {
        Commands::Get { key, metadata_only } => (
            MessageType::Get,
            KeyValue {
                key: key.clone().into_bytes(),
                metadata_only: *metadata_only,
                ..KeyValue::default()
            },
            None,
        ),
        Commands::Put {
            key,
            value,
            new_version,
            db_version,
            force,
        } => {
            let value_bytes = value.clone().into_bytes();
            let mut hasher = crc32fast::Hasher::new();
            hasher.update(&value_bytes);
            let tag = hasher.finalize().to_be_bytes().to_vec();

            (
                MessageType::Put,
                KeyValue {
                    key: key.clone().into_bytes(),
                    new_version: new_version.clone().into_bytes(),
                    db_version: db_version.clone().into_bytes(),
                    tag,
                    algorithm: Some(Algorithm::Crc32),
                    force: *force,
                    ..KeyValue::default()
                },
                Some(value_bytes),
            )
        }
        Commands::Del {
            key,
            db_version,
            force,
        } => (
            MessageType::Delete,
            KeyValue {
                key: key.clone().into_bytes(),
                db_version: db_version.clone().into_bytes(),
                force: *force,
                ..KeyValue::default()
            },
            None,
        ),
        Commands::GetVersion { key } => (
            MessageType::GetVersion,
            KeyValue {
                key: key.clone().into_bytes(),
                ..KeyValue::default()
            },
            None,
        ),
        Commands::GetNext { key } => (
            MessageType::GetNext,
            KeyValue {
                key: key.clone().into_bytes(),
                ..KeyValue::default()
            },
            None,
        ),
        Commands::GetPrev { key } => (
            MessageType::GetPrevious,
            KeyValue {
                key: key.clone().into_bytes(),
                ..KeyValue::default()
            },
            None,
        ),
    };

    (Message::kv_request(kind, args.identity, 1, kv), value)
}

fn print_entry(entry: &keelkv::Entry) {
    println!("key:     {}", String::from_utf8_lossy(&entry.key));
    println!("version: {}", String::from_utf8_lossy(&entry.version));
    if !entry.tag.is_empty() {
        println!("tag:     {:02x?}", entry.tag);
    }
    println!("value:   {}", String::from_utf8_lossy(&entry.value));
}
