//! Datagram payload format.
//!
//! A payload is `"<username>:<message>"` in UTF-8. Only the first `:` splits,
//! so messages may contain colons; usernames cannot.

use thiserror::Error;

/// Separator between username and message.
pub const SEPARATOR: char = ':';

/// Largest payload one IPv4 UDP datagram can carry.
pub const MAX_PAYLOAD: usize = 65_507;

/// Reasons a datagram payload cannot be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("payload is not valid UTF-8")]
    InvalidUtf8,

    #[error("payload has no ':' separator")]
    MissingSeparator,
}

impl DecodeError {
    /// Short label used in logs and metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            DecodeError::InvalidUtf8 => "invalid_utf8",
            DecodeError::MissingSeparator => "missing_separator",
        }
    }
}

/// A decoded username/message pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub username: String,
    pub message: String,
}

/// Encode a pair into a datagram payload.
pub fn encode(username: &str, message: &str) -> Vec<u8> {
    format!("{username}{SEPARATOR}{message}").into_bytes()
}

/// Decode a datagram payload.
pub fn decode(payload: &[u8]) -> Result<Submission, DecodeError> {
    let text = std::str::from_utf8(payload).map_err(|_| DecodeError::InvalidUtf8)?;
    let (username, message) = text
        .split_once(SEPARATOR)
        .ok_or(DecodeError::MissingSeparator)?;

    Ok(Submission {
        username: username.to_string(),
        message: message.to_string(),
    })
}
