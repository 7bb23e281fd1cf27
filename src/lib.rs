//! Message relay library.

pub mod channel;
pub mod config;
pub mod http;
pub mod ingest;
pub mod lifecycle;
pub mod observability;
pub mod storage;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use ingest::IngestWorker;
pub use lifecycle::Shutdown;
pub use storage::Store;
