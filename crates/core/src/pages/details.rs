//! Read-only view of one schedule with its actions

use agenda_domain::{AgendaError, Result, Schedule, ScheduleId, ScheduleStatus};
use chrono::TimeZone;

use super::format::format_instant;
use super::{error_view_message, Route, ViewState};
use crate::events::{EntityKey, Subscription};
use crate::schedules::ScheduleService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactLine {
    pub name: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailsView {
    pub id: ScheduleId,
    pub status: ScheduleStatus,
    pub status_label: &'static str,
    pub cadence_label: String,
    pub scheduled_at: String,
    pub created_at: String,
    pub updated_at: String,
    pub message: String,
    pub contacts: Vec<ContactLine>,
}

impl DetailsView {
    fn new<Tz: TimeZone>(schedule: &Schedule, tz: &Tz) -> Self {
        Self {
            id: schedule.id.clone(),
            status: schedule.status,
            status_label: schedule.status.label(),
            cadence_label: schedule.cadence.label(),
            scheduled_at: format_instant(&schedule.scheduled_at, tz),
            created_at: format_instant(&schedule.created_at, tz),
            updated_at: format_instant(&schedule.updated_at, tz),
            message: schedule.message.clone(),
            contacts: schedule
                .contacts
                .iter()
                .map(|c| ContactLine { name: c.name.clone(), phone: c.phone.clone() })
                .collect(),
        }
    }

    /// Edit and cancel are offered only while the schedule is pending
    pub fn has_actions(&self) -> bool {
        self.status.is_pending()
    }
}

pub struct ScheduleDetailsPage<Tz: TimeZone> {
    id: ScheduleId,
    tz: Tz,
    state: ViewState<DetailsView>,
    changes: Option<Subscription>,
}

impl<Tz: TimeZone> ScheduleDetailsPage<Tz> {
    pub fn new(id: ScheduleId, tz: Tz) -> Self {
        Self { id, tz, state: ViewState::Loading, changes: None }
    }

    pub fn id(&self) -> &ScheduleId {
        &self.id
    }

    pub fn state(&self) -> &ViewState<DetailsView> {
        &self.state
    }

    pub async fn load(&mut self, service: &ScheduleService) {
        let id = self.id.clone();
        self.changes
            .get_or_insert_with(|| service.subscribe(EntityKey::Schedule(id)))
            .drain();

        self.state = match service.get(&self.id).await {
            Ok(schedule) => ViewState::Ready(DetailsView::new(&schedule, &self.tz)),
            Err(err) => ViewState::Error(error_view_message(&err)),
        };
    }

    /// Reload if this schedule changed since the last load
    pub async fn refresh_if_changed(&mut self, service: &ScheduleService) -> bool {
        let changed = self.changes.as_mut().is_some_and(Subscription::drain);
        if changed {
            self.load(service).await;
        }
        changed
    }

    pub fn edit_route(&self) -> Option<Route> {
        self.state
            .ready()
            .filter(|view| view.has_actions())
            .map(|view| Route::EditSchedule(view.id.clone()))
    }

    /// Cancel directly from the details view; success leads back to the list
    pub async fn cancel(&mut self, service: &ScheduleService) -> Result<Route> {
        if !self.state.ready().is_some_and(DetailsView::has_actions) {
            return Err(AgendaError::InvalidInput(
                "Only scheduled messages can be canceled".to_string(),
            ));
        }
        service.cancel(&self.id).await?;
        Ok(Route::Schedules)
    }
}
