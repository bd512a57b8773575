//! sfile CLI
//!
//! Command-line front end for paired-file stores.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use sfile::header::decode_header;
use sfile::{AttributeValue, Attributes, PairedFileStore, StoreConfig, StoreWriter, SyncPolicy};
use tracing_subscriber::{fmt, EnvFilter};

/// sfile CLI
#[derive(Parser, Debug)]
#[command(name = "sfile")]
#[command(about = "Write data and header attributes to paired files")]
#[command(version)]
struct Args {
    /// Suffix appended to the base name for the header file
    #[arg(
        long,
        default_value = sfile::config::DEFAULT_HEADER_SUFFIX,
        allow_hyphen_values = true,
        global = true
    )]
    suffix: String,

    /// When to fsync the files
    #[arg(long, value_enum, default_value = "never", global = true)]
    sync: SyncArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Write bytes into the data file at an offset
    Write {
        /// Base name of the store
        base: PathBuf,

        /// Byte offset to write at
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        offset: i64,

        /// Input file (stdin when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Replace the header attributes
    Header {
        /// Base name of the store
        base: PathBuf,

        /// Attributes as KEY=VALUE
        #[arg(value_parser = parse_attribute)]
        attributes: Vec<(String, AttributeValue)>,
    },

    /// Print the current header attributes
    ShowHeader {
        /// Base name of the store
        base: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SyncArg {
    Never,
    OnClose,
    EveryWrite,
}

impl From<SyncArg> for SyncPolicy {
    fn from(arg: SyncArg) -> Self {
        match arg {
            SyncArg::Never => SyncPolicy::Never,
            SyncArg::OnClose => SyncPolicy::OnClose,
            SyncArg::EveryWrite => SyncPolicy::EveryWrite,
        }
    }
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sfile=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = StoreConfig::builder()
        .header_suffix(&args.suffix)
        .sync_policy(args.sync.into())
        .build();

    if let Err(e) = run(args.command, config) {
        tracing::error!("{}", e);
        process::exit(1);
    }
}

fn run(command: Commands, config: StoreConfig) -> sfile::Result<()> {
    match command {
        Commands::Write { base, offset, input } => {
            let data = match input {
                Some(path) => fs::read(path)?,
                None => {
                    let mut buf = Vec::new();
                    io::stdin().read_to_end(&mut buf)?;
                    buf
                }
            };

            let mut store = PairedFileStore::open_with_config(&base, config)?;
            let result = store.save_data(&data, offset);
            let closed = store.close();
            let written = result?;
            closed?;

            if written < data.len() {
                tracing::warn!("Short write: {} of {} bytes", written, data.len());
            }
            println!("{}", written);
        }
        Commands::Header { base, attributes } => {
            let attributes: Attributes = attributes.into_iter().collect();

            let mut store = PairedFileStore::open_with_config(&base, config)?;
            let result = store.save_header(&attributes);
            let closed = store.close();
            result?;
            closed?;

            tracing::info!("Saved {} attributes", attributes.len());
        }
        Commands::ShowHeader { base } => {
            let bytes = fs::read(config.header_path(&base))?;
            for (key, value) in decode_header(&bytes)? {
                println!("{} = {}", key, value);
            }
        }
    }

    Ok(())
}

/// Parse `KEY=VALUE`; the value becomes a bool, int, float, or text
fn parse_attribute(raw: &str) -> Result<(String, AttributeValue), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got {:?}", raw))?;

    if key.is_empty() {
        return Err(format!("empty key in {:?}", raw));
    }

    let value = if let Ok(b) = value.parse::<bool>() {
        AttributeValue::Bool(b)
    } else if let Ok(i) = value.parse::<i64>() {
        AttributeValue::Int(i)
    } else if let Ok(f) = value.parse::<f64>() {
        AttributeValue::Float(f)
    } else {
        AttributeValue::Text(value.to_string())
    };

    Ok((key.to_string(), value))
}
