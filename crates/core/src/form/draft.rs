//! Editable form state

use std::fmt;

use agenda_domain::constants::DEFAULT_SCHEDULE_TIME;
use agenda_domain::{Frequency, Schedule, ScheduleKind};
use chrono::TimeZone;
use uuid::Uuid;

use super::compose::split_scheduled_at;

/// Stable identity of one contact row, independent of its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(Uuid);

impl RowId {
    fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub phone: String,
}

impl ContactDraft {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self { name: name.into(), phone: phone.into() }
    }
}

/// Ordered contact rows; never shrinks below one row through [`remove`](Self::remove)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRows {
    rows: Vec<(RowId, ContactDraft)>,
}

impl ContactRows {
    /// One blank row
    pub fn new() -> Self {
        Self { rows: vec![(RowId::generate(), ContactDraft::default())] }
    }

    /// Rows for the given contacts; an empty input yields one blank row
    pub fn from_contacts(contacts: impl IntoIterator<Item = ContactDraft>) -> Self {
        let rows: Vec<_> = contacts.into_iter().map(|c| (RowId::generate(), c)).collect();
        if rows.is_empty() {
            Self::new()
        } else {
            Self { rows }
        }
    }

    pub fn append(&mut self, contact: ContactDraft) -> RowId {
        let id = RowId::generate();
        self.rows.push((id, contact));
        id
    }

    pub fn can_remove(&self) -> bool {
        self.rows.len() > 1
    }

    /// Remove a row; returns `false` when it is the last one or unknown
    pub fn remove(&mut self, id: RowId) -> bool {
        if !self.can_remove() {
            return false;
        }
        match self.index_of(id) {
            Some(index) => {
                self.rows.remove(index);
                true
            }
            None => false,
        }
    }

    /// Apply `edit` to the row; returns `false` for an unknown id
    pub fn update(&mut self, id: RowId, edit: impl FnOnce(&mut ContactDraft)) -> bool {
        match self.rows.iter_mut().find(|(row, _)| *row == id) {
            Some((_, contact)) => {
                edit(contact);
                true
            }
            None => false,
        }
    }

    pub fn index_of(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|(row, _)| *row == id)
    }

    pub fn get(&self, id: RowId) -> Option<&ContactDraft> {
        self.rows.iter().find(|(row, _)| *row == id).map(|(_, contact)| contact)
    }

    pub fn ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|(id, _)| *id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(RowId, ContactDraft)> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl Default for ContactRows {
    fn default() -> Self {
        Self::new()
    }
}

/// Unvalidated create/edit form state
///
/// `date` and `time` hold the raw input text (`YYYY-MM-DD`, `HH:MM`); they
/// are only interpreted by validation. `frequency` may linger after the
/// kind is switched back to once and is dropped from the payload then.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub message: String,
    pub date: String,
    pub time: String,
    pub kind: ScheduleKind,
    pub frequency: Option<Frequency>,
    pub contacts: ContactRows,
}

impl Default for ScheduleDraft {
    fn default() -> Self {
        Self {
            message: String::new(),
            date: String::new(),
            time: DEFAULT_SCHEDULE_TIME.to_string(),
            kind: ScheduleKind::Once,
            frequency: None,
            contacts: ContactRows::new(),
        }
    }
}

impl ScheduleDraft {
    /// Pre-fill from a stored schedule, splitting the instant in `tz`
    pub fn from_schedule<Tz: TimeZone>(schedule: &Schedule, tz: &Tz) -> Self {
        let (date, time) = split_scheduled_at(&schedule.scheduled_at, tz);
        Self {
            message: schedule.message.clone(),
            date: date.format("%Y-%m-%d").to_string(),
            time,
            kind: schedule.cadence.kind(),
            frequency: schedule.cadence.frequency(),
            contacts: ContactRows::from_contacts(
                schedule.contacts.iter().map(|c| ContactDraft::new(&c.name, &c.phone)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removing_the_last_row_is_a_no_op() {
        let mut rows = ContactRows::new();
        let only = rows.ids()[0];

        assert!(!rows.can_remove());
        assert!(!rows.remove(only));
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn row_ids_survive_removal_of_earlier_rows() {
        let mut rows = ContactRows::new();
        let first = rows.ids()[0];
        let second = rows.append(ContactDraft::new("Ana", "+5511"));
        let third = rows.append(ContactDraft::new("Bia", "+5512"));

        assert!(rows.remove(first));

        assert_eq!(rows.index_of(second), Some(0));
        assert_eq!(rows.index_of(third), Some(1));
        assert_eq!(rows.get(third).map(|c| c.name.as_str()), Some("Bia"));
    }

    #[test]
    fn update_targets_the_row_by_id() {
        let mut rows = ContactRows::new();
        let first = rows.ids()[0];
        let second = rows.append(ContactDraft::default());

        assert!(rows.update(second, |c| c.phone = "123".into()));
        assert!(rows.remove(first));

        assert_eq!(rows.get(second).map(|c| c.phone.as_str()), Some("123"));
        assert!(!rows.update(first, |c| c.name = "stale".into()));
    }

    #[test]
    fn empty_contact_list_yields_one_blank_row() {
        let rows = ContactRows::from_contacts(Vec::new());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows.iter().next().map(|(_, c)| c.clone()), Some(ContactDraft::default()));
    }

    #[test]
    fn default_draft_matches_create_form_defaults() {
        let draft = ScheduleDraft::default();
        assert_eq!(draft.time, "09:00");
        assert_eq!(draft.kind, ScheduleKind::Once);
        assert!(draft.message.is_empty());
        assert_eq!(draft.contacts.len(), 1);
    }
}
