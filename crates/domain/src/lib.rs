//! # Agenda Domain
//!
//! Business domain types for the Agenda scheduled-message client.
//!
//! This crate contains:
//! - Schedule, contact and cadence types as the backend returns them
//! - Request/response envelopes for the REST surface
//! - Domain error types and Result definitions
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Agenda crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
