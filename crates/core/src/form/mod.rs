//! Create/edit form pipeline
//!
//! A [`ScheduleDraft`] is edited through a [`ScheduleForm`], validated by
//! [`validate_draft`] and turned into a `SchedulePayload`. The date and
//! time inputs are combined into one UTC instant in the form's time zone.

pub mod compose;
pub mod controller;
pub mod draft;
pub mod schema;

pub use compose::{compose_scheduled_at, parse_date, parse_time_of_day, split_scheduled_at};
pub use controller::ScheduleForm;
pub use draft::{ContactDraft, ContactRows, RowId, ScheduleDraft};
pub use schema::{validate_draft, FieldPath, FormErrors, FormMode};
