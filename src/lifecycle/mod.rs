//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Shutdown (shutdown.rs):
//!     trigger() → every ShutdownListener → server stops accepting → drain
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger_on_signal → trigger()
//! ```
//!
//! # Design Decisions
//! - Ordered shutdown: stop accept, drain in-flight requests, flush reports
//! - Shutdown has timeout: the report worker gets a bounded drain window

pub mod shutdown;
pub mod signals;

pub use shutdown::{Shutdown, ShutdownListener};
