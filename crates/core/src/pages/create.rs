//! New schedule form

use std::sync::Arc;

use agenda_common::time::Clock;
use chrono::TimeZone;

use super::{Route, SubmitOutcome};
use crate::form::{FormMode, ScheduleForm};
use crate::schedules::ScheduleService;

pub struct CreateSchedulePage<Tz: TimeZone> {
    form: ScheduleForm<Tz>,
}

impl<Tz: TimeZone> CreateSchedulePage<Tz> {
    pub fn new(tz: Tz, clock: Arc<dyn Clock>) -> Self {
        Self { form: ScheduleForm::new(FormMode::Create, tz, clock) }
    }

    pub fn form(&self) -> &ScheduleForm<Tz> {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ScheduleForm<Tz> {
        &mut self.form
    }

    /// Validate, create, and on success point at the schedule list
    pub async fn submit(&mut self, service: &ScheduleService) -> SubmitOutcome {
        let payload = match self.form.submit() {
            Ok(payload) => payload,
            Err(report) => return SubmitOutcome::Invalid(report),
        };
        match service.create(&payload).await {
            Ok(_) => SubmitOutcome::Navigate(Route::Schedules),
            Err(err) => SubmitOutcome::Failed(err),
        }
    }
}
