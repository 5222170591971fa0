//! Errors crossing the repository → handler boundary.

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Logical data-access operation, used to tag failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FindAllIds,
    FindByIds,
    FindRecentlyCreated,
    Upload,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FindAllIds => "FindAllIds",
            Operation::FindByIds => "FindByIds",
            Operation::FindRecentlyCreated => "FindRecentlyCreated",
            Operation::Upload => "Upload",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of an underlying storage call.
#[derive(Debug, Error)]
pub enum DataAccessError {
    /// The call did not finish within its bounded timeout and was cancelled.
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("object storage error: {0}")]
    Storage(String),
}

/// A data-access failure tagged with the operation that produced it.
///
/// Repositories return only this type; the underlying error is kept as the
/// `source` for logs and reports and must never reach an HTTP client.
#[derive(Debug, Error)]
#[error("{operation}{}: {underlying}", detail_suffix(.detail))]
pub struct DomainError {
    pub operation: Operation,
    /// Call-site parameters, e.g. the upload key.
    pub detail: Option<String>,
    #[source]
    pub underlying: DataAccessError,
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!("({detail})"),
        None => String::new(),
    }
}

impl DomainError {
    pub fn new(operation: Operation, underlying: DataAccessError) -> Self {
        Self {
            operation,
            detail: None,
            underlying,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self.underlying, DataAccessError::Timeout(_))
    }
}
