//! Read-through cache for schedule queries
//!
//! Keyed by list query and by schedule id. Entries expire after the
//! configured staleness window and are dropped early when a change event
//! names them. Errors are never cached.

use std::sync::atomic::{AtomicU64, Ordering};

use agenda_domain::{CacheConfig, ListQuery, Schedule, ScheduleId, SchedulePage};
use moka::sync::Cache;

use crate::events::{ChangeEvent, ChangeListener, EntityKey};

/// Snapshot of the invalidation counter taken before a fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Generation(u64);

pub struct QueryCache {
    lists: Cache<ListQuery, SchedulePage>,
    details: Cache<ScheduleId, Schedule>,
    generation: AtomicU64,
}

impl QueryCache {
    pub fn new(config: &CacheConfig) -> Self {
        tracing::info!(
            stale_after_secs = config.stale_after_secs,
            max_capacity = config.max_capacity,
            "query cache configuration loaded"
        );

        let lists = Cache::builder()
            .time_to_live(config.stale_after())
            .max_capacity(config.max_capacity)
            .build();
        let details = Cache::builder()
            .time_to_live(config.stale_after())
            .max_capacity(config.max_capacity)
            .build();

        Self { lists, details, generation: AtomicU64::new(0) }
    }

    /// Current invalidation generation; pass it back to the `store_*` calls
    pub fn generation(&self) -> Generation {
        Generation(self.generation.load(Ordering::Acquire))
    }

    pub fn list(&self, query: &ListQuery) -> Option<SchedulePage> {
        let hit = self.lists.get(query);
        tracing::debug!(?query, hit = hit.is_some(), "list cache lookup");
        hit
    }

    pub fn detail(&self, id: &ScheduleId) -> Option<Schedule> {
        let hit = self.details.get(id);
        tracing::debug!(schedule_id = %id, hit = hit.is_some(), "detail cache lookup");
        hit
    }

    /// Store a fetched page unless an invalidation happened since `fetched_at`
    pub fn store_list(&self, query: ListQuery, page: SchedulePage, fetched_at: Generation) -> bool {
        if self.generation() != fetched_at {
            tracing::debug!(?query, "discarding list result fetched before invalidation");
            return false;
        }
        self.lists.insert(query, page);
        true
    }

    /// Store a fetched schedule unless an invalidation happened since `fetched_at`
    pub fn store_detail(&self, schedule: Schedule, fetched_at: Generation) -> bool {
        if self.generation() != fetched_at {
            tracing::debug!(schedule_id = %schedule.id, "discarding detail fetched before invalidation");
            return false;
        }
        self.details.insert(schedule.id.clone(), schedule);
        true
    }

    pub fn invalidate(&self, key: &EntityKey) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        match key {
            EntityKey::ScheduleList => self.lists.invalidate_all(),
            EntityKey::Schedule(id) => self.details.invalidate(id),
        }
        tracing::debug!(?key, "query cache invalidated");
    }
}

impl ChangeListener for QueryCache {
    fn on_change(&self, event: &ChangeEvent) {
        self.invalidate(&event.key);
    }
}

#[cfg(test)]
mod tests {
    use agenda_domain::{Cadence, PaginationInfo, ScheduleStatus};
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::events::ChangeKind;

    fn schedule(id: &str) -> Schedule {
        let at = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).single().unwrap_or_default();
        Schedule {
            id: ScheduleId::new(id),
            message: "hello".into(),
            scheduled_at: at,
            status: ScheduleStatus::Scheduled,
            cadence: Cadence::Once,
            contacts: Vec::new(),
            created_at: at,
            updated_at: at,
        }
    }

    fn page(items: Vec<Schedule>) -> SchedulePage {
        let total = items.len() as u64;
        SchedulePage {
            items,
            pagination: PaginationInfo { page: 1, limit: 10, total, total_pages: 1 },
        }
    }

    #[test]
    fn stores_and_serves_lists_per_query() {
        let cache = QueryCache::new(&CacheConfig::default());
        let scheduled = ListQuery::new().status(ScheduleStatus::Scheduled);
        let gen = cache.generation();

        assert!(cache.store_list(scheduled, page(vec![schedule("a")]), gen));

        assert_eq!(cache.list(&scheduled).map(|p| p.items.len()), Some(1));
        assert!(cache.list(&ListQuery::new()).is_none());
    }

    #[test]
    fn list_event_drops_every_list_but_keeps_details() {
        let cache = QueryCache::new(&CacheConfig::default());
        let gen = cache.generation();
        cache.store_list(ListQuery::new(), page(vec![schedule("a")]), gen);
        cache.store_list(ListQuery::new().page(2), page(vec![]), gen);
        cache.store_detail(schedule("a"), gen);

        cache.on_change(&ChangeEvent::new(EntityKey::ScheduleList, ChangeKind::Created));

        assert!(cache.list(&ListQuery::new()).is_none());
        assert!(cache.list(&ListQuery::new().page(2)).is_none());
        assert!(cache.detail(&ScheduleId::new("a")).is_some());
    }

    #[test]
    fn entity_event_drops_only_that_schedule() {
        let cache = QueryCache::new(&CacheConfig::default());
        let gen = cache.generation();
        cache.store_detail(schedule("a"), gen);
        cache.store_detail(schedule("b"), gen);

        cache.on_change(&ChangeEvent::new(
            EntityKey::Schedule(ScheduleId::new("a")),
            ChangeKind::Canceled,
        ));

        assert!(cache.detail(&ScheduleId::new("a")).is_none());
        assert!(cache.detail(&ScheduleId::new("b")).is_some());
    }

    #[test]
    fn results_fetched_before_an_invalidation_are_discarded() {
        let cache = QueryCache::new(&CacheConfig::default());
        let before = cache.generation();

        cache.invalidate(&EntityKey::ScheduleList);

        assert!(!cache.store_list(ListQuery::new(), page(vec![]), before));
        assert!(cache.list(&ListQuery::new()).is_none());
        assert!(cache.store_list(ListQuery::new(), page(vec![]), cache.generation()));
    }
}
