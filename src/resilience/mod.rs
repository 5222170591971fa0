//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Repository call:
//!     → timeouts.rs (per-call deadline, cancel on expiry)
//!     → DomainError tagged with the operation on failure
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every external call has a deadline
//! - An expired call is dropped, never left running in the background

pub mod timeouts;

pub use timeouts::bounded;
