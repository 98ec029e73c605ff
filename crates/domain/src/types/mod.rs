//! Domain types and models
//!
//! `schedule` holds what the backend owns; `wire` holds the envelopes and
//! request bodies exchanged with it.

pub mod schedule;
pub mod wire;

pub use schedule::{
    Cadence, Contact, Frequency, Schedule, ScheduleId, ScheduleKind, ScheduleStatus,
};
pub use wire::{
    ApiEnvelope, ContactPayload, CreateScheduleRequest, ErrorEnvelope, ListQuery,
    PaginatedEnvelope, PaginationInfo, SchedulePage, SchedulePayload, UpdateScheduleRequest,
};
