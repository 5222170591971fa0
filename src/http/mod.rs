//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes)
//!     → middleware/ (trace tag → logger → access log → recovery)
//!     → handlers.rs (use case call, error translation)
//!     → response.rs (fixed error bodies)
//!     → Send to client
//! ```

pub mod handlers;
pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestContext, X_REQUEST_ID};
pub use response::ErrorResponse;
pub use server::{build_router, AppState, HttpServer};
