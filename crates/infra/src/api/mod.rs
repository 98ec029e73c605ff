//! HTTP adapter for the schedules backend
//!
//! - [`ApiClient`]: base URL, credentials, error normalization
//! - [`SchedulesApi`]: the five schedule operations as a [`ScheduleGateway`]
//!
//! Reads are retried once on transport failure or 5xx; mutations are sent
//! exactly once.
//!
//! [`ScheduleGateway`]: agenda_core::ScheduleGateway

pub mod auth;
pub mod client;
pub mod errors;
pub mod schedules;

pub use auth::{CredentialProvider, Credentials};
pub use client::{ApiClient, ApiClientBuilder, ApiClientConfig};
pub use errors::{ApiError, ApiErrorCategory};
pub use schedules::SchedulesApi;
