//! In-memory implementations of the core ports
//!
//! `FakeGateway` keeps schedules in memory, paginates like the backend and
//! records every call; failures can be injected per operation.

use agenda_core::pages::NOT_FOUND_MESSAGE;
use agenda_core::{Notification, Notifier, ScheduleGateway};
use agenda_domain::{
    AgendaError, Contact, ListQuery, PaginationInfo, Result, Schedule, ScheduleId, SchedulePage,
    SchedulePayload, ScheduleStatus,
};
use async_trait::async_trait;
use parking_lot::Mutex;

use super::fixtures::at;

/// One recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List(ListQuery),
    Get(ScheduleId),
    Create,
    Update(ScheduleId),
    Cancel(ScheduleId),
}

/// Which operation the next injected failure applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    List,
    Get,
    Create,
    Update,
    Cancel,
}

/// Backend stand-in that keeps schedules in memory and records every call
#[derive(Default)]
pub struct FakeGateway {
    schedules: Mutex<Vec<Schedule>>,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<(Op, AgendaError)>>,
    status_failures: Mutex<Vec<ScheduleStatus>>,
}

impl FakeGateway {
    pub fn with(schedules: Vec<Schedule>) -> std::sync::Arc<Self> {
        let gateway = Self::default();
        *gateway.schedules.lock() = schedules;
        std::sync::Arc::new(gateway)
    }

    /// Make the next call of `op` fail with `err`
    pub fn fail_next(&self, op: Op, err: AgendaError) {
        self.failures.lock().push((op, err));
    }

    /// Make every list call filtered by `status` fail
    pub fn fail_status(&self, status: ScheduleStatus) {
        self.status_failures.lock().push(status);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn count(&self, matches: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().iter().filter(|call| matches(call)).count()
    }

    pub fn mutation_count(&self) -> usize {
        self.count(|c| matches!(c, Call::Create | Call::Update(_) | Call::Cancel(_)))
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    pub fn stored(&self, id: &str) -> Option<Schedule> {
        self.schedules.lock().iter().find(|s| s.id.as_str() == id).cloned()
    }

    fn take_failure(&self, op: Op) -> Result<()> {
        let mut failures = self.failures.lock();
        match failures.iter().position(|(o, _)| *o == op) {
            Some(index) => Err(failures.remove(index).1),
            None => Ok(()),
        }
    }

    fn not_found() -> AgendaError {
        AgendaError::NotFound(NOT_FOUND_MESSAGE.into())
    }
}

#[async_trait]
impl ScheduleGateway for FakeGateway {
    async fn list(&self, query: &ListQuery) -> Result<SchedulePage> {
        self.calls.lock().push(Call::List(*query));
        self.take_failure(Op::List)?;
        if let Some(status) = query.status {
            if self.status_failures.lock().contains(&status) {
                return Err(AgendaError::Network("count unavailable".into()));
            }
        }

        let matching: Vec<Schedule> = self
            .schedules
            .lock()
            .iter()
            .filter(|s| query.status.map_or(true, |status| s.status == status))
            .cloned()
            .collect();
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).max(1);
        let total = matching.len() as u64;
        let total_pages = u32::try_from(matching.len().div_ceil(limit as usize)).unwrap_or(u32::MAX);
        let items = matching
            .into_iter()
            .skip(((page - 1) * limit) as usize)
            .take(limit as usize)
            .collect();

        Ok(SchedulePage { items, pagination: PaginationInfo { page, limit, total, total_pages } })
    }

    async fn get(&self, id: &ScheduleId) -> Result<Schedule> {
        self.calls.lock().push(Call::Get(id.clone()));
        self.take_failure(Op::Get)?;
        self.stored(id.as_str()).ok_or_else(Self::not_found)
    }

    async fn create(&self, payload: &SchedulePayload) -> Result<Schedule> {
        self.calls.lock().push(Call::Create);
        self.take_failure(Op::Create)?;
        let mut schedules = self.schedules.lock();
        let id = ScheduleId::new(format!("s-{}", schedules.len() + 1));
        let schedule = from_payload(id, payload);
        schedules.push(schedule.clone());
        Ok(schedule)
    }

    async fn update(&self, id: &ScheduleId, payload: &SchedulePayload) -> Result<Schedule> {
        self.calls.lock().push(Call::Update(id.clone()));
        self.take_failure(Op::Update)?;
        let mut schedules = self.schedules.lock();
        let stored = schedules.iter_mut().find(|s| s.id == *id).ok_or_else(Self::not_found)?;
        let updated = Schedule { status: stored.status, ..from_payload(id.clone(), payload) };
        *stored = updated.clone();
        Ok(updated)
    }

    async fn cancel(&self, id: &ScheduleId) -> Result<Schedule> {
        self.calls.lock().push(Call::Cancel(id.clone()));
        self.take_failure(Op::Cancel)?;
        let mut schedules = self.schedules.lock();
        let stored = schedules.iter_mut().find(|s| s.id == *id).ok_or_else(Self::not_found)?;
        stored.status = ScheduleStatus::Canceled;
        Ok(stored.clone())
    }
}

/// Notifier that keeps every notification for assertions
#[derive(Default)]
pub struct RecordingNotifier {
    seen: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn titles(&self) -> Vec<String> {
        self.seen.lock().iter().map(|n| n.title.clone()).collect()
    }

    pub fn all(&self) -> Vec<Notification> {
        self.seen.lock().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.seen.lock().push(notification);
    }
}

fn from_payload(id: ScheduleId, payload: &SchedulePayload) -> Schedule {
    let now = at(2025, 3, 1, 12, 0);
    Schedule {
        contacts: payload
            .contacts
            .iter()
            .enumerate()
            .map(|(i, c)| Contact {
                id: format!("{id}-c{i}"),
                name: c.name.clone(),
                phone: c.phone.clone(),
                schedule_id: id.clone(),
            })
            .collect(),
        id,
        message: payload.message.clone(),
        scheduled_at: payload.scheduled_at,
        status: ScheduleStatus::Scheduled,
        cadence: payload.cadence,
        created_at: now,
        updated_at: now,
    }
}
