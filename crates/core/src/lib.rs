//! # Agenda Core
//!
//! Client-side business logic - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces for the schedules backend and notifications
//! - The schedule service (cached queries, mutations, change events)
//! - The create/edit form pipeline
//! - Page controllers that front ends render
//!
//! ## Architecture Principles
//! - Only depends on `agenda-common` and `agenda-domain`
//! - No HTTP or terminal code
//! - All external dependencies via traits
//! - Time zone and clock are injected so date logic is testable

pub mod events;
pub mod form;
pub mod pages;
pub mod query;
pub mod schedules;

pub use events::{ChangeEvent, ChangeKind, ChangeListener, EntityKey, EventBus, Subscription};
pub use form::{FieldPath, FormMode, RowId, ScheduleDraft, ScheduleForm};
pub use pages::{Route, SubmitOutcome, ViewState};
pub use query::QueryCache;
pub use schedules::{Notification, NotificationLevel, Notifier, ScheduleGateway, ScheduleService};
