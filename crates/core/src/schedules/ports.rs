//! Port interfaces for schedule management
//!
//! These traits define the boundaries between core business logic
//! and infrastructure implementations.

use std::fmt;

use agenda_domain::{ListQuery, Result, Schedule, ScheduleId, SchedulePage, SchedulePayload};
use async_trait::async_trait;

/// Trait for the remote schedules backend
#[async_trait]
pub trait ScheduleGateway: Send + Sync {
    /// Fetch one page of schedules matching the query
    async fn list(&self, query: &ListQuery) -> Result<SchedulePage>;

    /// Fetch a single schedule
    async fn get(&self, id: &ScheduleId) -> Result<Schedule>;

    /// Create a schedule and return the stored entity
    async fn create(&self, payload: &SchedulePayload) -> Result<Schedule>;

    /// Replace the editable fields of an existing schedule
    async fn update(&self, id: &ScheduleId, payload: &SchedulePayload) -> Result<Schedule>;

    /// Cancel a pending schedule
    async fn cancel(&self, id: &ScheduleId) -> Result<Schedule>;
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

impl fmt::Display for NotificationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => f.write_str("success"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// Transient message shown to the user after a mutation settles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: Option<String>,
}

impl Notification {
    pub fn success(title: impl Into<String>) -> Self {
        Self { level: NotificationLevel::Success, title: title.into(), description: None }
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }
}

/// Trait for surfacing notifications (toasts, terminal lines, logs)
pub trait Notifier: Send + Sync {
    /// Show a notification; must not block
    fn notify(&self, notification: Notification);
}
