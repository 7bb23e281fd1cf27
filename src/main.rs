//! Message relay server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Browser                ┌──────────────────────┐   UDP 127.0.0.1:5000   ┌──────────────────┐
//!     ───── POST /message ──▶│  http (front door)   │──── "user:message" ───▶│  ingest worker   │
//!     ◀──── 200 / 400 ───────│  pages + submit      │   (no acknowledgement) │  decode + stamp  │
//!                            └──────────────────────┘                        └────────┬─────────┘
//!                                                                                     │ append
//!                                                                                     ▼
//!                                                                            storage/data.json
//! ```
//!
//! Both halves run in this process by default; `--mode http` and
//! `--mode ingest` split them across two processes.

use std::path::PathBuf;

use clap::Parser;

use message_relay::config::{load_config, RelayConfig};
use message_relay::lifecycle::{self, signals, RunMode, Shutdown};
use message_relay::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "message-relay")]
#[command(about = "HTTP front door and UDP-fed message store", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Components to run in this process.
    #[arg(short, long, value_enum, default_value_t = RunMode::All)]
    mode: RunMode,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    logging::init(&config.observability.log_level);

    tracing::info!("message-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        http = %config.http.bind_address,
        channel = %config.channel.address,
        store = %config.storage.path,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let shutdown = Shutdown::new();
    signals::install(shutdown.clone());

    lifecycle::run(config, cli.mode, &shutdown).await?;
    Ok(())
}
