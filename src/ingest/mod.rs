//! Ingest subsystem: turns datagrams into store entries.
//!
//! # Data Flow
//! ```text
//! UDP datagram
//!     → worker.rs (recv_from, decode, timestamp)
//!     → storage::Store::append
//! ```
//!
//! # Design Decisions
//! - One sequential loop; exactly one worker per store file
//! - A malformed datagram is logged and dropped, the loop continues
//! - Storage errors are fatal; there is no retry

pub mod worker;

use thiserror::Error;

use crate::storage::StorageError;

pub use worker::{IngestWorker, Outcome};

/// Errors that end the ingest worker.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Failed to bind datagram channel: {0}")]
    Bind(#[source] std::io::Error),

    #[error("Failed to receive datagram: {0}")]
    Receive(#[source] std::io::Error),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result type for ingest operations.
pub type IngestResult<T> = Result<T, IngestError>;
