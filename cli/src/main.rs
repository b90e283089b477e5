//! OTEL Translator CLI
//!
//! Command-line companion to the OTEL translator server.
//!
//! # Usage
//!
//! ```bash
//! otel-translator --help
//! otel-translator translate payload.json
//! cat payload.json | otel-translator translate -
//! otel-translator health
//! otel-translator receive --port 8080
//! ```

#![deny(unsafe_code)]

mod receiver;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// OTEL Translator CLI - translate OTLP metrics payloads into flat records
#[derive(Parser)]
#[command(name = "otel-translator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Translator API server URL
    #[arg(
        short,
        long,
        env = "TRANSLATOR_API_URL",
        default_value = "http://localhost:5001"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check API server health
    Health,

    /// Translate an OTLP/JSON payload file and print the flat record (nothing is forwarded)
    Translate {
        /// Payload file, or `-` to read standard input
        file: PathBuf,
    },

    /// Accept a single raw TCP connection and print everything the peer sends
    Receive {
        /// Host address to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Health) => check_health(&cli.api_url).await?,
        Some(Commands::Translate { file }) => {
            let document = translate_file(&file)?;
            println!("{document}");
        }
        Some(Commands::Receive { host, port }) => receive(&host, port).await?,
        None => {
            println!("OTEL Translator CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Reads a payload from `path` (`-` for stdin), translates it and returns the record JSON.
fn translate_file(path: &Path) -> Result<String> {
    let body = if path == Path::new("-") {
        let mut buf = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("Failed to read payload from stdin")?;
        buf
    } else {
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    let record = shared::translate::translate_slice(&body)
        .with_context(|| format!("Failed to translate {}", path.display()))?;

    Ok(serde_json::to_string_pretty(&record)?)
}

async fn check_health(api_url: &str) -> Result<()> {
    let url = format!("{}/health", api_url.trim_end_matches('/'));
    println!("Checking health of OTEL translator at {api_url}...");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()?;
    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("Failed to reach {url}"))?;

    let status = response.status();
    let body: serde_json::Value = response.json().await.unwrap_or(serde_json::Value::Null);

    if !status.is_success() {
        bail!("Health check failed with status {status}");
    }

    println!(
        "{} {} ({})",
        body["service"].as_str().unwrap_or("unknown"),
        body["status"].as_str().unwrap_or("unknown"),
        body["version"].as_str().unwrap_or("?")
    );
    Ok(())
}

async fn receive(host: &str, port: u16) -> Result<()> {
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .with_context(|| format!("Invalid listen address {host}:{port}"))?;

    println!("--- Simple receiver listening on {addr} ---");
    let capture = receiver::receive_once(addr).await?;

    println!("--- Connection received from {} ---", capture.peer);
    println!("--- RAW DATA RECEIVED ---");
    println!("{}", capture.text());
    println!("-----------------------");

    Ok(())
}
