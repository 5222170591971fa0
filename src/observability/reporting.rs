//! Error reporting to the monitoring collector.
//!
//! # Responsibilities
//! - Accept an error plus its context from any subsystem
//! - Hand it off without blocking the request path
//! - Deliver it inside the span that was current when it was reported,
//!   so the request id tag travels with the report
//!
//! # Design Decisions
//! - Bounded queue; when full, the report is dropped with a warning
//! - Errors are rendered to strings at report time (they are borrowed)

use std::error::Error;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Where and during what an error was reported.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub operation: &'static str,
    pub span: tracing::Span,
}

impl ReportContext {
    /// Context bound to the current tracing span.
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            span: tracing::Span::current(),
        }
    }
}

/// Fire-and-forget sink for errors.
pub trait ErrorReporter: Send + Sync {
    fn report(&self, context: ReportContext, error: &(dyn Error + 'static));
}

/// An error captured for delivery.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub context: ReportContext,
    pub message: String,
    /// `source()` chain, outermost first.
    pub causes: Vec<String>,
}

impl ErrorReport {
    pub fn capture(context: ReportContext, error: &(dyn Error + 'static)) -> Self {
        let mut causes = Vec::new();
        let mut source = error.source();
        while let Some(cause) = source {
            causes.push(cause.to_string());
            source = cause.source();
        }
        Self {
            context,
            message: error.to_string(),
            causes,
        }
    }
}

/// Discards every report.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl ErrorReporter for NoopReporter {
    fn report(&self, _context: ReportContext, _error: &(dyn Error + 'static)) {}
}

/// Queues reports for a background worker.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: mpsc::Sender<ErrorReport>,
}

impl ChannelReporter {
    /// Start the delivery worker. It stops once every reporter clone is dropped.
    pub fn spawn(capacity: usize, release: String) -> (Self, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<ErrorReport>(capacity.max(1));

        let worker = tokio::spawn(async move {
            while let Some(report) = rx.recv().await {
                report.context.span.in_scope(|| {
                    tracing::error!(
                        target: "lgtm_image_api::report",
                        operation = report.context.operation,
                        release = %release,
                        causes = ?report.causes,
                        "{}",
                        report.message
                    );
                });
            }
            tracing::debug!("Error reporter stopped");
        });

        (Self { tx }, worker)
    }
}

impl ErrorReporter for ChannelReporter {
    fn report(&self, context: ReportContext, error: &(dyn Error + 'static)) {
        let report = ErrorReport::capture(context, error);
        if let Err(e) = self.tx.try_send(report) {
            tracing::warn!(error = %e, "Dropping error report");
        }
    }
}
