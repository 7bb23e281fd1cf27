//! Stored message types and key generation.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A single submitted message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub username: String,
    pub message: String,
}

impl MessageRecord {
    pub fn new(username: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            message: message.into(),
        }
    }
}

/// Full store contents, keyed by ingest timestamp.
pub type Messages = BTreeMap<String, MessageRecord>;

/// Format an ingest instant as a store key.
///
/// Local time with microseconds and no offset, e.g. `2024-05-01T13:45:12.034512`.
pub fn timestamp_key(at: DateTime<Local>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}
