//! # Agenda Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - HTTP transport with retry for idempotent reads
//! - REST adapter implementing `ScheduleGateway`
//! - Configuration loading (file + environment)
//!
//! ## Architecture
//! - Implements traits defined in `agenda-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientConfig, ApiError, Credentials, SchedulesApi};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder, RetryPolicy};
