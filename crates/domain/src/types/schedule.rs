//! Schedule aggregate as returned by the backend

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Backend-assigned schedule identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(String);

impl ScheduleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScheduleId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ScheduleId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Dispatch state of a schedule
///
/// `Sent` is reached only on the server; this client can move a schedule to
/// `Canceled` and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleStatus {
    Scheduled,
    Sent,
    Canceled,
}

impl_wire_enum_conversions!(ScheduleStatus {
    Scheduled => "scheduled",
    Sent => "sent",
    Canceled => "canceled",
});

impl ScheduleStatus {
    /// Display label for badges and tables
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::Sent => "Sent",
            Self::Canceled => "Canceled",
        }
    }

    /// Whether edit and cancel actions are offered
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Scheduled)
    }
}

/// Cadence selector as shown in forms (`type` on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleKind {
    #[default]
    Once,
    Recurring,
}

impl_wire_enum_conversions!(ScheduleKind {
    Once => "once",
    Recurring => "recurring",
});

/// Recurrence frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl_wire_enum_conversions!(Frequency {
    Daily => "daily",
    Weekly => "weekly",
    Monthly => "monthly",
});

/// How often a schedule dispatches
///
/// Flattened into the surrounding object as `type` plus, for recurring
/// schedules only, `frequency`. A recurring cadence without a frequency
/// cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Cadence {
    Once,
    Recurring { frequency: Frequency },
}

impl Cadence {
    pub const fn kind(&self) -> ScheduleKind {
        match self {
            Self::Once => ScheduleKind::Once,
            Self::Recurring { .. } => ScheduleKind::Recurring,
        }
    }

    pub const fn frequency(&self) -> Option<Frequency> {
        match self {
            Self::Once => None,
            Self::Recurring { frequency } => Some(*frequency),
        }
    }

    /// Display label, e.g. `Recurring (weekly)`
    pub fn label(&self) -> String {
        match self {
            Self::Once => "Once".to_string(),
            Self::Recurring { frequency } => format!("Recurring ({frequency})"),
        }
    }
}

/// Recipient attached to a schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub schedule_id: ScheduleId,
}

/// Scheduled message dispatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub id: ScheduleId,
    pub message: String,
    pub scheduled_at: DateTime<Utc>,
    pub status: ScheduleStatus,
    #[serde(flatten)]
    pub cadence: Cadence,
    #[serde(default)]
    pub contacts: Vec<Contact>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
