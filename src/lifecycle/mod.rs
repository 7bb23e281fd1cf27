//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Initialize store → Bind worker → Start HTTP listener
//!
//! Shutdown (shutdown.rs):
//!     Signal received → latched flag → worker loop exits, HTTP server drains
//!
//! Signals (signals.rs):
//!     SIGINT → Trigger graceful shutdown
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
pub use startup::{run, RunMode, StartupError};
