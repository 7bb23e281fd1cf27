//! Datagram channel between the front door and the ingest worker.
//!
//! # Data Flow
//! ```text
//! submit handler
//!     → sender.rs (encode, send_to worker address)
//!     → UDP loopback
//!     → ingest worker recv_from
//!     → codec.rs (decode)
//! ```
//!
//! # Design Decisions
//! - Connectionless: delivery, ordering and uniqueness are not guaranteed
//! - No acknowledgement path; the front door never learns the outcome
//! - Sender and worker share one size ceiling, so oversized submissions are
//!   refused at the front door instead of truncated at the worker

pub mod codec;
pub mod sender;

pub use codec::{decode, encode, DecodeError, Submission, MAX_PAYLOAD};
pub use sender::{DatagramSender, SendError};
