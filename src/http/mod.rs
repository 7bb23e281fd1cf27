//! HTTP front door subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, span)
//!     → handlers.rs
//!         GET  → assets.rs (read page from disk)
//!         POST /message → channel::DatagramSender
//!     → error.rs (400 / 404 bodies)
//! ```

pub mod assets;
pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::HttpError;
pub use request::X_REQUEST_ID;
pub use server::HttpServer;
