//! `bencode` CLI: decode and encode Bencode data from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Decode an inline bencoded string to JSON
//! bencode decode 'd3:bar4:spam3:fooi42ee'
//!
//! # Decode a .torrent file, pretty-printed
//! bencode decode -f ubuntu.torrent --pretty
//!
//! # Accept a file that ends mid-dictionary
//! bencode decode -f partial.torrent --lenient
//!
//! # Encode JSON (stdin → stdout) to canonical Bencode
//! echo '{"foo":42,"bar":"spam"}' | bencode encode
//!
//! # Debug logging from the decoder
//! bencode -vv decode -f ubuntu.torrent
//! ```

use anyhow::{Context, Result};
use bencode_core::{DecodeOptions, Decoder, TrailingPolicy, TruncationPolicy};
use clap::{Parser, Subcommand};
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bencode", version, about = "Bencode decoder and encoder")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode Bencode and print it as JSON
    Decode {
        /// Bencoded text, or a file path when --file is given
        input: String,
        /// Treat INPUT as a path to a bencoded file
        #[arg(short, long)]
        file: bool,
        /// Indent the JSON output
        #[arg(short, long)]
        pretty: bool,
        /// Return the partial value when input ends inside a list or dictionary
        #[arg(long)]
        lenient: bool,
        /// Fail if bytes remain after the first complete value
        #[arg(long)]
        reject_trailing: bool,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Encode JSON to canonical Bencode
    Encode {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Decode {
            input,
            file,
            pretty,
            lenient,
            reject_trailing,
            output,
        } => {
            let bytes = if file {
                if !Path::new(&input).exists() {
                    println!("File {} does not exist.", input);
                    return Ok(());
                }
                std::fs::read(&input).with_context(|| format!("Failed to read file: {}", input))?
            } else {
                input.into_bytes()
            };
            debug!(len = bytes.len(), "decoding input");

            let options = DecodeOptions::default()
                .with_truncation(if lenient {
                    TruncationPolicy::Lenient
                } else {
                    TruncationPolicy::Strict
                })
                .with_trailing(if reject_trailing {
                    TrailingPolicy::Reject
                } else {
                    TrailingPolicy::Ignore
                });
            let value = Decoder::new(options)
                .decode(&bytes)
                .context("Failed to decode Bencode")?;
            let mut json = bencode_core::to_json_string(&value, pretty)
                .context("Failed to render JSON")?;
            json.push('\n');
            write_output(output.as_deref(), json.as_bytes())?;
        }
        Commands::Encode { input, output } => {
            let json = read_input(input.as_deref())?;
            let bytes =
                bencode_core::encode_json(&json).context("Failed to encode JSON to Bencode")?;
            write_output(output.as_deref(), &bytes)?;
        }
    }

    Ok(())
}

/// Install a stderr subscriber so log lines never mix with decoded output.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(content)
                .and_then(|_| stdout.flush())
                .context("Failed to write to stdout")?;
        }
    }
    Ok(())
}
