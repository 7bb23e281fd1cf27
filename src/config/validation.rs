//! Configuration validation.
//!
//! Serde handles syntax; this module checks the values make sense together.
//! All errors are collected so a bad file can be fixed in one pass.

use std::net::SocketAddr;

use thiserror::Error;

use crate::channel::MAX_PAYLOAD;
use crate::config::schema::RelayConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} must be at most {max}, got {value}")]
    TooLarge {
        field: &'static str,
        value: usize,
        max: usize,
    },

    #[error("channel.address must be a loopback address, got {0}")]
    ChannelNotLoopback(String),
}

/// Validate a parsed configuration, returning every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "http.bind_address", &config.http.bind_address);

    match config.channel.address.parse::<SocketAddr>() {
        Ok(addr) if !addr.ip().is_loopback() => {
            errors.push(ValidationError::ChannelNotLoopback(config.channel.address.clone()));
        }
        Ok(_) => {}
        Err(_) => errors.push(ValidationError::InvalidAddress {
            field: "channel.address",
            value: config.channel.address.clone(),
        }),
    }

    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.http.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "http.request_timeout_secs" });
    }
    if config.http.max_body_size == 0 {
        errors.push(ValidationError::Zero { field: "http.max_body_size" });
    }
    if config.channel.max_datagram_size == 0 {
        errors.push(ValidationError::Zero { field: "channel.max_datagram_size" });
    } else if config.channel.max_datagram_size > MAX_PAYLOAD {
        errors.push(ValidationError::TooLarge {
            field: "channel.max_datagram_size",
            value: config.channel.max_datagram_size,
            max: MAX_PAYLOAD,
        });
    }

    for (field, value) in [
        ("storage.path", &config.storage.path),
        ("assets.templates_dir", &config.assets.templates_dir),
        ("assets.static_dir", &config.assets.static_dir),
    ] {
        if value.trim().is_empty() {
            errors.push(ValidationError::Empty { field });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}
