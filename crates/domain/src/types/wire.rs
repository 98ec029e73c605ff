//! Request bodies, response envelopes and list queries

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

use super::schedule::{Cadence, Schedule, ScheduleStatus};

/// `{name, phone}` pair sent when creating or updating a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactPayload {
    pub name: String,
    pub phone: String,
}

/// Body of `POST /schedules` and `PUT /schedules/:id`
///
/// Only a validated form draft produces one of these; `frequency` is emitted
/// exactly when the cadence is recurring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePayload {
    pub message: String,
    #[serde(serialize_with = "serialize_instant_millis")]
    pub scheduled_at: DateTime<Utc>,
    #[serde(flatten)]
    pub cadence: Cadence,
    pub contacts: Vec<ContactPayload>,
}

pub type CreateScheduleRequest = SchedulePayload;
pub type UpdateScheduleRequest = SchedulePayload;

/// `2025-03-10T17:30:00.000Z`
fn serialize_instant_millis<S>(instant: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&instant.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Pagination block of list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u32,
}

/// `{ data?, error? }` envelope of single-entity responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `{ data?, error?, pagination? }` envelope of list responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginatedEnvelope<T> {
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<T>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PaginationInfo>,
}

/// Body of any non-2xx response
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub error: Option<String>,
}

/// Parameters of `GET /schedules`; absent fields are not sent
///
/// Also the cache key for list results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ScheduleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: ScheduleStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One page of schedules with its pagination block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulePage {
    pub items: Vec<Schedule>,
    pub pagination: PaginationInfo,
}

impl SchedulePage {
    /// Build a page from a list envelope
    ///
    /// A response without `pagination` is treated as a single page holding
    /// everything it returned.
    pub fn from_envelope(envelope: PaginatedEnvelope<Schedule>, query: &ListQuery) -> Self {
        let items = envelope.data.unwrap_or_default();
        let pagination = envelope.pagination.unwrap_or(PaginationInfo {
            page: query.page.unwrap_or(1),
            limit: query.limit.unwrap_or(u32::try_from(items.len()).unwrap_or(u32::MAX)),
            total: items.len() as u64,
            total_pages: 1,
        });
        Self { items, pagination }
    }
}
