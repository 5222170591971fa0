//! Timeout enforcement for data-access calls.
//!
//! # Responsibilities
//! - Wrap every storage call with its own deadline
//! - Cancel the underlying call on expiry (the future is dropped)
//! - Turn both timeouts and call failures into a tagged `DomainError`
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Budgets are per call; a request making three calls gets three budgets
//! - Timeout errors are distinct from other errors (`DataAccessError::Timeout`)

use std::future::Future;
use std::time::Duration;

use tokio::time::timeout;

use crate::domain::{DataAccessError, DomainError, Operation};
use crate::observability::metrics;

/// Run `call` with a fresh `limit`, tagging any failure with `operation`.
pub async fn bounded<T, F>(operation: Operation, limit: Duration, call: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DataAccessError>>,
{
    let result = match timeout(limit, call).await {
        Ok(Ok(value)) => return Ok(value),
        Ok(Err(e)) => e,
        Err(_) => DataAccessError::Timeout(limit),
    };

    metrics::record_repository_failure(operation.as_str());
    Err(DomainError::new(operation, result))
}
