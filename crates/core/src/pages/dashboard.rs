//! Dashboard: totals per status and the most recent schedules

use agenda_domain::{ListQuery, Result, SchedulePage, ScheduleStatus};
use chrono::TimeZone;
use tracing::warn;

use super::format::ScheduleRow;
use super::{error_view_message, ViewState};
use crate::schedules::ScheduleService;

pub const EMPTY_MESSAGE: &str = "No schedules yet";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: u64,
    pub scheduled: u64,
    pub sent: u64,
    pub canceled: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub counts: StatusCounts,
    pub recent: Vec<ScheduleRow>,
}

impl DashboardView {
    /// Text to show in place of the recent list, if any
    pub fn empty_message(&self) -> Option<&'static str> {
        self.recent.is_empty().then_some(EMPTY_MESSAGE)
    }
}

pub struct DashboardPage<Tz: TimeZone> {
    tz: Tz,
    recent_limit: u32,
    state: ViewState<DashboardView>,
}

impl<Tz: TimeZone> DashboardPage<Tz> {
    pub fn new(tz: Tz, recent_limit: u32) -> Self {
        Self { tz, recent_limit, state: ViewState::Loading }
    }

    pub fn state(&self) -> &ViewState<DashboardView> {
        &self.state
    }

    /// Fetch the recent list and the three per-status counts concurrently.
    ///
    /// Only the recent list decides between error and ready; a failed count
    /// shows as zero.
    pub async fn load(&mut self, service: &ScheduleService) {
        self.state = ViewState::Loading;

        let (recent, scheduled, sent, canceled) = futures::join!(
            service.list(ListQuery::new().limit(self.recent_limit)),
            service.list(Self::count_query(ScheduleStatus::Scheduled)),
            service.list(Self::count_query(ScheduleStatus::Sent)),
            service.list(Self::count_query(ScheduleStatus::Canceled)),
        );

        self.state = match recent {
            Ok(page) => ViewState::Ready(DashboardView {
                counts: StatusCounts {
                    total: page.pagination.total,
                    scheduled: count(ScheduleStatus::Scheduled, scheduled),
                    sent: count(ScheduleStatus::Sent, sent),
                    canceled: count(ScheduleStatus::Canceled, canceled),
                },
                recent: page.items.iter().map(|s| ScheduleRow::from_schedule(s, &self.tz)).collect(),
            }),
            Err(err) => ViewState::Error(error_view_message(&err)),
        };
    }

    fn count_query(status: ScheduleStatus) -> ListQuery {
        ListQuery::new().status(status).limit(1)
    }
}

fn count(status: ScheduleStatus, result: Result<SchedulePage>) -> u64 {
    match result {
        Ok(page) => page.pagination.total,
        Err(err) => {
            warn!(%status, error = %err, "status count unavailable");
            0
        }
    }
}
