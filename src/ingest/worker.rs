//! The ingest worker loop.
//!
//! Listening → (datagram arrives) → Processing → Listening. Each Processing
//! step decodes one datagram, stamps it and appends it to the store.

use std::net::SocketAddr;

use chrono::{DateTime, Local};
use tokio::net::UdpSocket;

use crate::channel::{self, DecodeError};
use crate::config::ChannelConfig;
use crate::ingest::{IngestError, IngestResult};
use crate::lifecycle::ShutdownSignal;
use crate::observability::metrics;
use crate::storage::{timestamp_key, MessageRecord, Store};

/// What happened to a single datagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Stored under this key.
    Stored(String),
    /// Could not be decoded and was discarded.
    Dropped(DecodeError),
}

/// Sole writer of a [`Store`], fed by datagrams.
pub struct IngestWorker {
    socket: UdpSocket,
    store: Store,
    max_datagram_size: usize,
}

impl IngestWorker {
    /// Bind the channel address and take ownership of `store`.
    pub async fn bind(config: &ChannelConfig, store: Store) -> IngestResult<Self> {
        let socket = UdpSocket::bind(&config.address)
            .await
            .map_err(IngestError::Bind)?;

        tracing::info!(
            address = %socket.local_addr().map_err(IngestError::Bind)?,
            store = %store.path().display(),
            "Ingest worker bound"
        );

        Ok(Self {
            socket,
            store,
            max_datagram_size: config.max_datagram_size,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.socket.local_addr()
    }

    /// Receive and store datagrams until shutdown.
    ///
    /// Undecodable datagrams are dropped. A storage failure ends the loop with
    /// that error.
    pub async fn run(self, mut shutdown: ShutdownSignal) -> IngestResult<()> {
        let mut buf = vec![0u8; self.max_datagram_size];

        loop {
            let (len, peer) = tokio::select! {
                received = self.socket.recv_from(&mut buf) => received.map_err(IngestError::Receive)?,
                _ = shutdown.recv() => {
                    tracing::info!("Ingest worker stopping");
                    return Ok(());
                }
            };

            metrics::record_datagram_received();
            tracing::debug!(peer = %peer, bytes = len, "Datagram received");
            if len == buf.len() {
                tracing::warn!(
                    peer = %peer,
                    max_datagram_size = buf.len(),
                    "Datagram fills the receive buffer and may be truncated"
                );
            }

            if let Err(e) = self.ingest(&buf[..len], Local::now()).await {
                tracing::error!(error = %e, "Ingest worker stopped on storage failure");
                return Err(e);
            }
        }
    }

    /// Process one datagram as if it arrived at `at`.
    pub async fn ingest(&self, payload: &[u8], at: DateTime<Local>) -> IngestResult<Outcome> {
        let submission = match channel::decode(payload) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(reason = e.reason(), bytes = payload.len(), "Dropping malformed datagram");
                metrics::record_datagram_dropped(e.reason());
                return Ok(Outcome::Dropped(e));
            }
        };

        let key = timestamp_key(at);
        self.store
            .append(key.clone(), MessageRecord::new(submission.username, submission.message))
            .await?;

        metrics::record_message_stored();
        tracing::info!(key = %key, "Message stored");
        Ok(Outcome::Stored(key))
    }
}
