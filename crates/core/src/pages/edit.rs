//! Edit form for a pending schedule

use std::sync::Arc;

use agenda_common::time::Clock;
use agenda_domain::{ScheduleId, ScheduleStatus};
use chrono::TimeZone;
use tracing::debug;

use super::{error_view_message, Route, SubmitOutcome};
use crate::form::{FormMode, ScheduleForm};
use crate::schedules::ScheduleService;

pub const SENT_MESSAGE: &str = "Sent schedules cannot be edited";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditState {
    Loading,
    /// No form is shown; the text explains why
    Blocked(String),
    Editing,
}

pub struct EditSchedulePage<Tz: TimeZone> {
    id: ScheduleId,
    form: ScheduleForm<Tz>,
    hydrated: bool,
    state: EditState,
}

impl<Tz: TimeZone> EditSchedulePage<Tz> {
    pub fn new(id: ScheduleId, tz: Tz, clock: Arc<dyn Clock>) -> Self {
        Self {
            id,
            form: ScheduleForm::new(FormMode::Edit, tz, clock),
            hydrated: false,
            state: EditState::Loading,
        }
    }

    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// The form, only while editing is allowed
    pub fn form(&self) -> Option<&ScheduleForm<Tz>> {
        (self.state == EditState::Editing).then_some(&self.form)
    }

    pub fn form_mut(&mut self) -> Option<&mut ScheduleForm<Tz>> {
        if self.state == EditState::Editing {
            Some(&mut self.form)
        } else {
            None
        }
    }

    /// Fetch the schedule; the draft is filled from the first successful load only
    pub async fn load(&mut self, service: &ScheduleService) {
        self.state = match service.get(&self.id).await {
            Err(err) => EditState::Blocked(error_view_message(&err)),
            Ok(schedule) if schedule.status == ScheduleStatus::Sent => {
                EditState::Blocked(SENT_MESSAGE.to_string())
            }
            Ok(schedule) => {
                if !self.hydrated {
                    self.form.hydrate(&schedule);
                    self.hydrated = true;
                } else {
                    debug!(schedule_id = %self.id, "refetch keeps the edited draft");
                }
                EditState::Editing
            }
        };
    }

    /// Validate, update, and on success point at the details view
    pub async fn submit(&mut self, service: &ScheduleService) -> SubmitOutcome {
        match &self.state {
            EditState::Editing => {}
            EditState::Blocked(message) => return SubmitOutcome::Unavailable(message.clone()),
            EditState::Loading => return SubmitOutcome::Unavailable("Schedule is still loading".into()),
        }
        let payload = match self.form.submit() {
            Ok(payload) => payload,
            Err(report) => return SubmitOutcome::Invalid(report),
        };
        match service.update(&self.id, &payload).await {
            Ok(schedule) => SubmitOutcome::Navigate(Route::ScheduleDetails(schedule.id)),
            Err(err) => SubmitOutcome::Failed(err),
        }
    }
}
