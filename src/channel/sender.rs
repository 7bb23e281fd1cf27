//! Fire-and-forget sender used by the front door.

use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use thiserror::Error;
use tokio::net::UdpSocket;

use crate::channel::codec;

/// Why a submission did not leave the front door.
#[derive(Debug, Error)]
pub enum SendError {
    #[error("payload of {len} bytes exceeds the {max} byte datagram limit")]
    Oversized { len: usize, max: usize },

    #[error("send failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Sends encoded submissions to the ingest worker.
///
/// One unbound-port socket is shared by all requests. Sends never wait for an
/// acknowledgement; a datagram that is lost or rejected is simply gone.
#[derive(Debug, Clone)]
pub struct DatagramSender {
    socket: Arc<UdpSocket>,
    target: SocketAddr,
    max_payload: usize,
}

impl DatagramSender {
    /// Bind an ephemeral loopback socket aimed at `target`.
    ///
    /// `max_payload` should match the worker's receive buffer so nothing it
    /// accepts gets cut short on the other side.
    pub async fn bind(target: SocketAddr, max_payload: usize) -> std::io::Result<Self> {
        let socket = UdpSocket::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        tracing::debug!(
            local = %socket.local_addr()?,
            target = %target,
            max_payload,
            "Datagram sender ready"
        );

        Ok(Self {
            socket: Arc::new(socket),
            target,
            max_payload,
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    pub fn max_payload(&self) -> usize {
        self.max_payload
    }

    /// Encode and send one submission.
    ///
    /// Payloads over `max_payload` are refused before touching the socket.
    pub async fn send(&self, username: &str, message: &str) -> Result<(), SendError> {
        let payload = codec::encode(username, message);
        if payload.len() > self.max_payload {
            return Err(SendError::Oversized {
                len: payload.len(),
                max: self.max_payload,
            });
        }
        let sent = self.socket.send_to(&payload, self.target).await?;
        tracing::trace!(bytes = sent, target = %self.target, "Datagram sent");
        Ok(())
    }
}
