//! Startup orchestration.
//!
//! Order: store, then ingest worker, then HTTP listener, so the front door
//! only takes traffic once something is listening on the channel.
//! Any startup error is fatal.

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::channel::DatagramSender;
use crate::config::RelayConfig;
use crate::http::HttpServer;
use crate::ingest::{IngestError, IngestResult, IngestWorker};
use crate::lifecycle::Shutdown;
use crate::storage::{StorageError, Store};

/// Which halves of the pipeline this process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RunMode {
    /// Front door and ingest worker in one process.
    #[default]
    All,
    /// Front door only; a separate process runs the worker.
    Http,
    /// Ingest worker only.
    Ingest,
}

impl RunMode {
    pub fn runs_http(self) -> bool {
        matches!(self, RunMode::All | RunMode::Http)
    }

    pub fn runs_ingest(self) -> bool {
        matches!(self, RunMode::All | RunMode::Ingest)
    }
}

/// Errors that abort startup or end the process.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid channel address '{0}'")]
    ChannelAddress(String),

    #[error("Failed to initialize store: {0}")]
    Storage(#[from] StorageError),

    #[error("Ingest worker failed: {0}")]
    Ingest(#[from] IngestError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Ingest worker task panicked")]
    WorkerPanicked,
}

/// Start the configured components and wait until they stop.
pub async fn run(config: RelayConfig, mode: RunMode, shutdown: &Shutdown) -> Result<(), StartupError> {
    tracing::info!(?mode, "Starting message relay");

    let worker = if mode.runs_ingest() {
        Some(spawn_worker(&config, shutdown).await?)
    } else {
        None
    };

    if mode.runs_http() {
        let target: SocketAddr = config
            .channel
            .address
            .parse()
            .map_err(|_| StartupError::ChannelAddress(config.channel.address.clone()))?;
        let sender = DatagramSender::bind(target, config.channel.max_datagram_size).await?;
        let listener = TcpListener::bind(&config.http.bind_address).await?;

        HttpServer::new(config, sender)
            .run(listener, shutdown.subscribe())
            .await?;
    }

    if let Some(handle) = worker {
        match handle.await {
            Ok(result) => result?,
            Err(_) => return Err(StartupError::WorkerPanicked),
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

/// Initialize the store and start the worker loop in the background.
///
/// A worker that dies from a storage error does not take the front door down.
pub async fn spawn_worker(
    config: &RelayConfig,
    shutdown: &Shutdown,
) -> Result<JoinHandle<IngestResult<()>>, StartupError> {
    let store = Store::new(&config.storage.path);
    store.initialize().await?;

    let worker = IngestWorker::bind(&config.channel, store).await?;
    Ok(tokio::spawn(worker.run(shutdown.subscribe())))
}
