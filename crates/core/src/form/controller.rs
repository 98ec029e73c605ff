//! Interactive form state: touched fields, visible errors, submission

use std::collections::HashSet;
use std::sync::Arc;

use agenda_common::time::Clock;
use agenda_common::validation::ValidationError;
use agenda_domain::{Frequency, Schedule, ScheduleKind, SchedulePayload};
use chrono::{NaiveDate, TimeZone};

use super::draft::{ContactDraft, RowId, ScheduleDraft};
use super::schema::{validate_draft, FieldPath, FormErrors, FormMode};

/// A create or edit form bound to a time zone and a clock.
///
/// Errors are recomputed on every change but only surface for fields the
/// user has left (`blur`) or after the first submit attempt.
pub struct ScheduleForm<Tz: TimeZone> {
    mode: FormMode,
    draft: ScheduleDraft,
    tz: Tz,
    clock: Arc<dyn Clock>,
    touched: HashSet<FieldPath>,
    submitted: bool,
    errors: FormErrors,
}

impl<Tz: TimeZone> ScheduleForm<Tz> {
    pub fn new(mode: FormMode, tz: Tz, clock: Arc<dyn Clock>) -> Self {
        let mut form = Self {
            mode,
            draft: ScheduleDraft::default(),
            tz,
            clock,
            touched: HashSet::new(),
            submitted: false,
            errors: FormErrors::new(),
        };
        form.revalidate();
        form
    }

    /// Replace the draft with the stored schedule and forget interaction state
    pub fn hydrate(&mut self, schedule: &Schedule) {
        self.draft = ScheduleDraft::from_schedule(schedule, &self.tz);
        self.touched.clear();
        self.submitted = false;
        self.revalidate();
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn draft(&self) -> &ScheduleDraft {
        &self.draft
    }

    pub fn time_zone(&self) -> &Tz {
        &self.tz
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.draft.message = message.into();
        self.revalidate();
    }

    pub fn set_date(&mut self, date: impl Into<String>) {
        self.draft.date = date.into();
        self.revalidate();
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.draft.time = time.into();
        self.revalidate();
    }

    pub fn set_kind(&mut self, kind: ScheduleKind) {
        self.draft.kind = kind;
        self.revalidate();
    }

    pub fn set_frequency(&mut self, frequency: Option<Frequency>) {
        self.draft.frequency = frequency;
        self.revalidate();
    }

    pub fn append_contact(&mut self) -> RowId {
        let id = self.draft.contacts.append(ContactDraft::default());
        self.revalidate();
        id
    }

    pub fn can_remove_contact(&self) -> bool {
        self.draft.contacts.can_remove()
    }

    pub fn remove_contact(&mut self, id: RowId) -> bool {
        let removed = self.draft.contacts.remove(id);
        if removed {
            self.touched.remove(&FieldPath::ContactName(id));
            self.touched.remove(&FieldPath::ContactPhone(id));
            self.revalidate();
        }
        removed
    }

    pub fn set_contact_name(&mut self, id: RowId, name: impl Into<String>) -> bool {
        let name = name.into();
        let updated = self.draft.contacts.update(id, |c| c.name = name);
        self.revalidate();
        updated
    }

    pub fn set_contact_phone(&mut self, id: RowId, phone: impl Into<String>) -> bool {
        let phone = phone.into();
        let updated = self.draft.contacts.update(id, |c| c.phone = phone);
        self.revalidate();
        updated
    }

    /// Mark a field as visited so its error becomes visible
    pub fn blur(&mut self, field: FieldPath) {
        self.touched.insert(field);
        // Leaving the type selector is what reveals the frequency rule
        if field == FieldPath::Kind {
            self.touched.insert(FieldPath::Frequency);
        }
        self.revalidate();
    }

    /// Error for a field if it should be shown
    pub fn error(&self, field: &FieldPath) -> Option<&str> {
        if self.is_visible(field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    /// Visible errors as dotted paths against the current row order
    pub fn visible_errors(&self) -> ValidationError {
        let mut visible = ValidationError::new();
        for (path, message) in self.errors.iter() {
            if self.is_visible(path) {
                visible.add_field_error(path.render(&self.draft.contacts), message.clone());
            }
        }
        visible
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validate everything and, if valid, return the payload to send.
    ///
    /// The draft is left untouched either way so a failed submission can be
    /// retried.
    pub fn submit(&mut self) -> Result<SchedulePayload, ValidationError> {
        self.submitted = true;
        match validate_draft(&self.draft, self.mode, &self.tz, self.today()) {
            Ok(payload) => {
                self.errors = FormErrors::new();
                Ok(payload)
            }
            Err(errors) => {
                let report = errors.report(&self.draft.contacts);
                self.errors = errors;
                Err(report)
            }
        }
    }

    fn today(&self) -> NaiveDate {
        self.clock.now().with_timezone(&self.tz).date_naive()
    }

    fn is_visible(&self, field: &FieldPath) -> bool {
        self.submitted || self.touched.contains(field)
    }

    fn revalidate(&mut self) {
        self.errors = match validate_draft(&self.draft, self.mode, &self.tz, self.today()) {
            Ok(_) => FormErrors::new(),
            Err(errors) => errors,
        };
    }
}

impl<Tz: TimeZone> std::fmt::Debug for ScheduleForm<Tz> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleForm")
            .field("mode", &self.mode)
            .field("draft", &self.draft)
            .field("submitted", &self.submitted)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}
