//! Message persistence subsystem.
//!
//! # Data Flow
//! ```text
//! ingest worker
//!     → store.rs (load document → insert record → rewrite document)
//!     → storage/data.json
//! ```
//!
//! # Design Decisions
//! - One JSON object per store, keyed by ingest timestamp
//! - Pretty-printed with four-space indentation
//! - Only the ingest worker writes; one worker per file

pub mod record;
pub mod store;

use std::path::PathBuf;

use thiserror::Error;

pub use record::{timestamp_key, MessageRecord, Messages};
pub use store::{is_missing, Store};

/// Errors that can occur while reading or writing the store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store file could not be read or written.
    #[error("Storage IO error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a mapping of message records.
    #[error("Storage format error in {}: {source}", .path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
