//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (Logger handles → structured tracing events)
//!     → reporting.rs (errors → monitoring collector, off the request path)
//!     → metrics.rs (counters, histograms)
//!     → tracing.rs (per-request spans tagged with the request id)
//! ```
//!
//! # Design Decisions
//! - Structured logging (JSON) for machine parsing
//! - Request ID flows through logs, spans and error reports
//! - Metrics are cheap (atomic increments)

pub mod logging;
pub mod metrics;
pub mod reporting;
pub mod tracing;

pub use logging::{Field, Logger, TracingLogger};
pub use reporting::{ChannelReporter, ErrorReporter, NoopReporter, ReportContext};
