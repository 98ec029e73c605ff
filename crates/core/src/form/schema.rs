//! Validation rules turning a draft into a request payload

use agenda_common::validation::{
    CollectionValidator, FieldValidator, PatternValidator, StringValidator, ValidationError,
};
use agenda_domain::constants::{
    CONTACT_NAME_MAX_CHARS, CONTACT_PHONE_MAX_CHARS, MESSAGE_MAX_CHARS, MIN_CONTACTS,
};
use agenda_domain::{Cadence, ContactPayload, ScheduleKind, SchedulePayload};
use chrono::{NaiveDate, TimeZone};

use super::compose::{compose_scheduled_at, parse_date, parse_time_of_day};
use super::draft::{ContactRows, RowId, ScheduleDraft};

pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const MESSAGE_TOO_LONG: &str = "Message must be at most 5000 characters";
pub const DATE_REQUIRED: &str = "Date is required";
pub const DATE_INVALID: &str = "Invalid date";
pub const DATE_IN_PAST: &str = "Date cannot be in the past";
pub const TIME_REQUIRED: &str = "Time is required";
pub const TIME_INVALID: &str = "Time must use HH:MM";
pub const TIME_SKIPPED: &str = "Time does not exist on this date";
pub const FREQUENCY_REQUIRED: &str = "Frequency is required for recurring schedules";
pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_LONG: &str = "Name must be at most 100 characters";
pub const PHONE_REQUIRED: &str = "Phone is required";
pub const PHONE_TOO_LONG: &str = "Phone must be at most 20 characters";
pub const CONTACTS_REQUIRED: &str = "Add at least one contact";

/// Which form the rules apply to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    /// Rejects dates before today
    Create,
    /// Accepts any valid date
    Edit,
}

/// Address of a form field; contact fields are keyed by row identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Message,
    Date,
    Time,
    Kind,
    Frequency,
    Contacts,
    ContactName(RowId),
    ContactPhone(RowId),
}

impl FieldPath {
    /// Dotted path using the row's current index (`contacts.1.phone`)
    pub fn render(&self, rows: &ContactRows) -> String {
        match self {
            Self::Message => "message".into(),
            Self::Date => "date".into(),
            Self::Time => "time".into(),
            Self::Kind => "type".into(),
            Self::Frequency => "frequency".into(),
            Self::Contacts => "contacts".into(),
            Self::ContactName(id) => Self::contact_path(rows, *id, "name"),
            Self::ContactPhone(id) => Self::contact_path(rows, *id, "phone"),
        }
    }

    fn contact_path(rows: &ContactRows, id: RowId, leaf: &str) -> String {
        match rows.index_of(id) {
            Some(index) => format!("contacts.{index}.{leaf}"),
            None => format!("contacts.{id}.{leaf}"),
        }
    }
}

/// Field errors in rule order, at most one per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: Vec<(FieldPath, String)>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldPath, message: impl Into<String>) {
        if self.get(&field).is_none() {
            self.entries.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &FieldPath) -> Option<&str> {
        self.entries.iter().find(|(path, _)| path == field).map(|(_, msg)| msg.as_str())
    }

    pub fn contains(&self, field: &FieldPath) -> bool {
        self.get(field).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(FieldPath, String)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into dotted paths against the current row order
    pub fn report(&self, rows: &ContactRows) -> ValidationError {
        let mut report = ValidationError::new();
        for (path, message) in &self.entries {
            report.add_field_error(path.render(rows), message.clone());
        }
        report
    }
}

struct Rules {
    message: StringValidator,
    time: PatternValidator,
    name: StringValidator,
    phone: StringValidator,
    contacts: CollectionValidator,
}

impl Rules {
    fn new() -> Self {
        Self {
            message: StringValidator::new()
                .not_empty_with(MESSAGE_REQUIRED)
                .max_length_with(MESSAGE_MAX_CHARS, MESSAGE_TOO_LONG),
            time: PatternValidator::time_of_day(TIME_INVALID),
            name: StringValidator::new()
                .not_empty_with(NAME_REQUIRED)
                .max_length_with(CONTACT_NAME_MAX_CHARS, NAME_TOO_LONG),
            phone: StringValidator::new()
                .not_empty_with(PHONE_REQUIRED)
                .max_length_with(CONTACT_PHONE_MAX_CHARS, PHONE_TOO_LONG),
            contacts: CollectionValidator::new().min_size_with(MIN_CONTACTS, CONTACTS_REQUIRED),
        }
    }
}

/// Validate a draft and build the request payload.
///
/// `today` is the current calendar date in `tz`; it only matters in
/// [`FormMode::Create`]. Every failing field is reported, not just the
/// first.
pub fn validate_draft<Tz: TimeZone>(
    draft: &ScheduleDraft,
    mode: FormMode,
    tz: &Tz,
    today: NaiveDate,
) -> Result<SchedulePayload, FormErrors> {
    let rules = Rules::new();
    let mut errors = FormErrors::new();

    if let Err(message) = rules.message.validate(draft.message.as_str()) {
        errors.insert(FieldPath::Message, message);
    }

    let date = if draft.date.trim().is_empty() {
        errors.insert(FieldPath::Date, DATE_REQUIRED);
        None
    } else {
        match parse_date(draft.date.trim()) {
            None => {
                errors.insert(FieldPath::Date, DATE_INVALID);
                None
            }
            Some(date) if mode == FormMode::Create && date < today => {
                errors.insert(FieldPath::Date, DATE_IN_PAST);
                None
            }
            Some(date) => Some(date),
        }
    };

    let time = if draft.time.trim().is_empty() {
        errors.insert(FieldPath::Time, TIME_REQUIRED);
        None
    } else if let Err(message) = rules.time.validate(draft.time.trim()) {
        errors.insert(FieldPath::Time, message);
        None
    } else {
        parse_time_of_day(draft.time.trim())
    };

    let cadence = match (draft.kind, draft.frequency) {
        (ScheduleKind::Once, _) => Some(Cadence::Once),
        (ScheduleKind::Recurring, Some(frequency)) => Some(Cadence::Recurring { frequency }),
        (ScheduleKind::Recurring, None) => {
            errors.insert(FieldPath::Frequency, FREQUENCY_REQUIRED);
            None
        }
    };

    let rows: Vec<_> = draft.contacts.iter().collect();
    if let Err(message) = rules.contacts.validate(rows.as_slice()) {
        errors.insert(FieldPath::Contacts, message);
    }
    let mut contacts = Vec::with_capacity(rows.len());
    for (id, contact) in &rows {
        if let Err(message) = rules.name.validate(contact.name.as_str()) {
            errors.insert(FieldPath::ContactName(*id), message);
        }
        if let Err(message) = rules.phone.validate(contact.phone.as_str()) {
            errors.insert(FieldPath::ContactPhone(*id), message);
        }
        contacts.push(ContactPayload {
            name: contact.name.trim().to_string(),
            phone: contact.phone.trim().to_string(),
        });
    }

    let scheduled_at = match (date, time) {
        (Some(date), Some(time)) => {
            let instant = compose_scheduled_at(date, time, tz);
            if instant.is_none() {
                errors.insert(FieldPath::Time, TIME_SKIPPED);
            }
            instant
        }
        _ => None,
    };

    match (scheduled_at, cadence) {
        (Some(scheduled_at), Some(cadence)) if errors.is_empty() => Ok(SchedulePayload {
            message: draft.message.trim().to_string(),
            scheduled_at,
            cadence,
            contacts,
        }),
        _ => Err(errors),
    }
}
