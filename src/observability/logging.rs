//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber (pretty or JSON)
//! - Provide the `Logger` handle that request handling passes around
//! - Derive child loggers carrying fixed fields (e.g. the request id)
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - Log level configurable via config and `RUST_LOG`
//! - A derived logger never mutates its parent
//! - Logger fields become span fields, never one pre-rendered string

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::field::Empty;
use tracing::{Level, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// A key-value pair attached to a log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub key: &'static str,
    pub value: String,
}

impl Field {
    pub fn new(key: &'static str, value: impl ToString) -> Self {
        Self {
            key,
            value: value.to_string(),
        }
    }
}

/// Leveled, field-carrying logger.
pub trait Logger: Send + Sync {
    /// Emit one record with `fields` on top of the logger's fixed fields.
    fn log(&self, level: Level, message: &str, fields: &[Field]);

    /// A new logger with `fields` fixed in addition to this one's.
    /// A key already present is overwritten in the child only.
    fn with(&self, fields: Vec<Field>) -> Arc<dyn Logger>;

    /// Fields fixed on this logger.
    fn fields(&self) -> &[Field];

    fn error(&self, message: &str, fields: &[Field]) {
        self.log(Level::ERROR, message, fields);
    }

    fn warn(&self, message: &str, fields: &[Field]) {
        self.log(Level::WARN, message, fields);
    }

    fn info(&self, message: &str, fields: &[Field]) {
        self.log(Level::INFO, message, fields);
    }
}

/// Merge `extra` into `base`; later keys win.
pub fn merge_fields(base: &[Field], extra: Vec<Field>) -> Vec<Field> {
    let mut merged = base.to_vec();
    for field in extra {
        match merged.iter_mut().find(|f| f.key == field.key) {
            Some(existing) => existing.value = field.value,
            None => merged.push(field),
        }
    }
    merged
}

/// Keys recorded as their own span fields. Anything else lands in `extra`.
const RECORDED_KEYS: [&str; 8] = [
    "x_request_id",
    "operation",
    "method",
    "path",
    "status_code",
    "duration_ms",
    "error",
    "error_type",
];

/// Keys whose values are recorded as integers when they parse as one.
const NUMERIC_KEYS: [&str; 2] = ["status_code", "duration_ms"];

/// Carrier span for one record. The level matches the event so both pass
/// or fail the same filter.
macro_rules! record_span {
    ($level:expr) => {
        tracing::span!(
            $level,
            "log",
            x_request_id = Empty,
            operation = Empty,
            method = Empty,
            path = Empty,
            status_code = Empty,
            duration_ms = Empty,
            error = Empty,
            error_type = Empty,
            extra = Empty
        )
    };
}

/// [`Logger`] backed by `tracing` events.
///
/// Each record is emitted inside a short-lived `log` span holding the merged
/// fields, so structured formatters see every field as its own key.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger {
    fields: Vec<Field>,
}

impl TracingLogger {
    pub fn new() -> Self {
        Self::default()
    }
}

fn render<'a>(fields: impl Iterator<Item = &'a Field>) -> String {
    let mut out = String::new();
    for field in fields {
        if !out.is_empty() {
            out.push(' ');
        }
        let _ = write!(out, "{}={:?}", field.key, field.value);
    }
    out
}

fn record_fields(span: &Span, fields: &[Field]) {
    let mut extra = Vec::new();
    for field in fields {
        if !RECORDED_KEYS.contains(&field.key) {
            extra.push(field);
            continue;
        }
        match field.value.parse::<i64>() {
            Ok(n) if NUMERIC_KEYS.contains(&field.key) => span.record(field.key, n),
            _ => span.record(field.key, field.value.as_str()),
        };
    }
    if !extra.is_empty() {
        span.record("extra", render(extra.into_iter()).as_str());
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: Level, message: &str, fields: &[Field]) {
        let merged = merge_fields(&self.fields, fields.to_vec());
        let span = match level {
            Level::ERROR => record_span!(Level::ERROR),
            Level::WARN => record_span!(Level::WARN),
            Level::INFO => record_span!(Level::INFO),
            Level::DEBUG => record_span!(Level::DEBUG),
            _ => record_span!(Level::TRACE),
        };
        record_fields(&span, &merged);

        span.in_scope(|| match level {
            Level::ERROR => tracing::error!("{}", message),
            Level::WARN => tracing::warn!("{}", message),
            Level::INFO => tracing::info!("{}", message),
            Level::DEBUG => tracing::debug!("{}", message),
            _ => tracing::trace!("{}", message),
        });
    }

    fn with(&self, fields: Vec<Field>) -> Arc<dyn Logger> {
        Arc::new(Self {
            fields: merge_fields(&self.fields, fields),
        })
    }

    fn fields(&self) -> &[Field] {
        &self.fields
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("lgtm_image_api={0},tower_http={0}", config.log_level).into()
    });
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
