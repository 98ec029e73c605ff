//! REST adapter for the schedule gateway port

use std::sync::Arc;

use agenda_core::pages::NOT_FOUND_MESSAGE;
use agenda_core::ScheduleGateway;
use agenda_domain::{
    AgendaError, ApiEnvelope, ListQuery, PaginatedEnvelope, Result, Schedule, ScheduleId,
    SchedulePage, SchedulePayload,
};
use async_trait::async_trait;
use tracing::{debug, instrument};
use urlencoding::encode;

use super::client::ApiClient;

const SCHEDULES_PATH: &str = "/schedules";

/// [`ScheduleGateway`] backed by the HTTP API
pub struct SchedulesApi {
    client: Arc<ApiClient>,
}

impl SchedulesApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    fn entity_path(id: &ScheduleId) -> String {
        format!("{}/{}", SCHEDULES_PATH, encode(id.as_str()))
    }

    /// A 2xx envelope without `data` means the entity is gone
    fn unwrap_entity(envelope: ApiEnvelope<Schedule>) -> Result<Schedule> {
        envelope.data.ok_or_else(|| {
            let message = envelope
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| NOT_FOUND_MESSAGE.to_string());
            AgendaError::NotFound(message)
        })
    }
}

#[async_trait]
impl ScheduleGateway for SchedulesApi {
    #[instrument(skip(self), fields(status = ?query.status, page = ?query.page, limit = ?query.limit))]
    async fn list(&self, query: &ListQuery) -> Result<SchedulePage> {
        let envelope: PaginatedEnvelope<Schedule> =
            self.client.get(SCHEDULES_PATH, Some(query)).await.map_err(AgendaError::from)?;
        let page = SchedulePage::from_envelope(envelope, query);
        debug!(items = page.items.len(), total = page.pagination.total, "Schedules listed");
        Ok(page)
    }

    #[instrument(skip(self), fields(schedule_id = %id))]
    async fn get(&self, id: &ScheduleId) -> Result<Schedule> {
        let envelope: ApiEnvelope<Schedule> = self
            .client
            .get::<(), _>(&Self::entity_path(id), None)
            .await
            .map_err(AgendaError::from)?;
        Self::unwrap_entity(envelope)
    }

    #[instrument(skip(self, payload), fields(contacts = payload.contacts.len()))]
    async fn create(&self, payload: &SchedulePayload) -> Result<Schedule> {
        let envelope: ApiEnvelope<Schedule> =
            self.client.post(SCHEDULES_PATH, payload).await.map_err(AgendaError::from)?;
        let schedule = Self::unwrap_entity(envelope)?;
        debug!(schedule_id = %schedule.id, "Schedule created");
        Ok(schedule)
    }

    #[instrument(skip(self, payload), fields(schedule_id = %id))]
    async fn update(&self, id: &ScheduleId, payload: &SchedulePayload) -> Result<Schedule> {
        let envelope: ApiEnvelope<Schedule> =
            self.client.put(&Self::entity_path(id), payload).await.map_err(AgendaError::from)?;
        Self::unwrap_entity(envelope)
    }

    #[instrument(skip(self), fields(schedule_id = %id))]
    async fn cancel(&self, id: &ScheduleId) -> Result<Schedule> {
        let path = format!("{}/cancel", Self::entity_path(id));
        let envelope: ApiEnvelope<Schedule> =
            self.client.patch(&path).await.map_err(AgendaError::from)?;
        Self::unwrap_entity(envelope)
    }
}
