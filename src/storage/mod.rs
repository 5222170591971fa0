//! Storage adapters behind the repository traits.
//!
//! # Responsibilities
//! - `mysql.rs`: image catalog queries over a shared `MySqlPool`
//! - `s3.rs`: object uploads through a shared S3 client
//!
//! # Design Decisions
//! - Both clients are created once at startup and injected into repositories
//! - Adapters do not enforce deadlines; the repositories do
//! - Failures map to `DataAccessError` and never leak SDK types upward

pub mod mysql;
pub mod s3;

pub use mysql::MySqlImageSource;
pub use s3::S3ObjectStorage;
