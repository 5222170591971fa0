//! LGTM image API library.

pub mod config;
pub mod domain;
pub mod gallery;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod repository;
pub mod resilience;
pub mod storage;

pub use config::AppConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
