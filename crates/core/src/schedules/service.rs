//! Schedule service - queries and mutations over the gateway

use std::sync::Arc;

use agenda_domain::{
    AgendaError, CacheConfig, ListQuery, Result, Schedule, ScheduleId, SchedulePage,
    SchedulePayload,
};
use tracing::{debug, error, info, instrument};

use super::ports::{Notification, Notifier, ScheduleGateway};
use crate::events::{ChangeEvent, ChangeKind, EntityKey, EventBus, Subscription};
use crate::query::QueryCache;

/// Outcome texts for one mutation
struct MutationLabels {
    success: &'static str,
    failure: &'static str,
    kind: ChangeKind,
}

const CREATE: MutationLabels = MutationLabels {
    success: "Schedule created",
    failure: "Failed to create schedule",
    kind: ChangeKind::Created,
};
const UPDATE: MutationLabels = MutationLabels {
    success: "Schedule updated",
    failure: "Failed to update schedule",
    kind: ChangeKind::Updated,
};
const CANCEL: MutationLabels = MutationLabels {
    success: "Schedule canceled",
    failure: "Failed to cancel schedule",
    kind: ChangeKind::Canceled,
};

/// Schedule service
///
/// Reads go through the query cache. Mutations are sent once; after the
/// backend acknowledges one, change events for the list and the entity are
/// published (the cache drops the affected entries) and a success
/// notification is shown. Failures notify with the normalized message and
/// leave cached state untouched.
pub struct ScheduleService {
    gateway: Arc<dyn ScheduleGateway>,
    notifier: Arc<dyn Notifier>,
    cache: Arc<QueryCache>,
    events: Arc<EventBus>,
}

impl ScheduleService {
    /// Create a service with its own cache registered on a fresh event bus
    pub fn new(
        gateway: Arc<dyn ScheduleGateway>,
        notifier: Arc<dyn Notifier>,
        cache_config: &CacheConfig,
    ) -> Self {
        let cache = Arc::new(QueryCache::new(cache_config));
        let events = Arc::new(EventBus::new());
        events.register(cache.clone());
        Self { gateway, notifier, cache, events }
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    /// Subscribe to changes of one cached entity
    pub fn subscribe(&self, key: EntityKey) -> Subscription {
        self.events.subscribe(Some(key))
    }

    #[instrument(skip(self))]
    pub async fn list(&self, query: ListQuery) -> Result<SchedulePage> {
        if let Some(page) = self.cache.list(&query) {
            return Ok(page);
        }

        let generation = self.cache.generation();
        let page = self.gateway.list(&query).await?;
        self.cache.store_list(query, page.clone(), generation);
        debug!(items = page.items.len(), total = page.pagination.total, "schedules listed");
        Ok(page)
    }

    #[instrument(skip(self), fields(schedule_id = %id))]
    pub async fn get(&self, id: &ScheduleId) -> Result<Schedule> {
        if let Some(schedule) = self.cache.detail(id) {
            return Ok(schedule);
        }

        let generation = self.cache.generation();
        let schedule = self.gateway.get(id).await?;
        self.cache.store_detail(schedule.clone(), generation);
        Ok(schedule)
    }

    #[instrument(skip_all)]
    pub async fn create(&self, payload: &SchedulePayload) -> Result<Schedule> {
        let result = self.gateway.create(payload).await;
        self.settle(result, &CREATE)
    }

    #[instrument(skip(self, payload), fields(schedule_id = %id))]
    pub async fn update(&self, id: &ScheduleId, payload: &SchedulePayload) -> Result<Schedule> {
        let result = self.gateway.update(id, payload).await;
        self.settle(result, &UPDATE)
    }

    #[instrument(skip(self), fields(schedule_id = %id))]
    pub async fn cancel(&self, id: &ScheduleId) -> Result<Schedule> {
        let result = self.gateway.cancel(id).await;
        self.settle(result, &CANCEL)
    }

    fn settle(&self, result: Result<Schedule>, labels: &MutationLabels) -> Result<Schedule> {
        match result {
            Ok(schedule) => {
                self.events.publish(ChangeEvent::new(EntityKey::ScheduleList, labels.kind));
                self.events
                    .publish(ChangeEvent::new(EntityKey::Schedule(schedule.id.clone()), labels.kind));
                info!(schedule_id = %schedule.id, "{}", labels.success);
                self.notifier.notify(Notification::success(labels.success));
                Ok(schedule)
            }
            Err(err) => {
                error!(error = %err, kind = err.label(), "{}", labels.failure);
                self.notifier.notify(Notification::error(labels.failure, err.message()));
                Err(err)
            }
        }
    }
}

impl std::fmt::Debug for ScheduleService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduleService").finish_non_exhaustive()
    }
}

/// Convenience for views that treat "not found" separately
pub fn is_not_found(err: &AgendaError) -> bool {
    matches!(err, AgendaError::NotFound(_))
}
