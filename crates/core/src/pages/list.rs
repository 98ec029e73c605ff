//! Paginated, filterable schedule list with a cancel confirmation dialog

use std::fmt;
use std::str::FromStr;

use agenda_domain::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use agenda_domain::{ListQuery, PaginationInfo, Result, Schedule, ScheduleId, ScheduleStatus};
use chrono::TimeZone;
use tracing::debug;

use super::format::ScheduleRow;
use super::{error_view_message, ViewState};
use crate::events::{EntityKey, Subscription};
use crate::schedules::ScheduleService;

pub const EMPTY_MESSAGE: &str = "No schedules found";

/// Status filter of the list ("all" or one status)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ScheduleStatus),
}

impl StatusFilter {
    pub fn status(self) -> Option<ScheduleStatus> {
        match self {
            Self::All => None,
            Self::Only(status) => Some(status),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(status) => status.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub rows: Vec<ScheduleRow>,
    pub pagination: PaginationInfo,
}

impl ListView {
    pub fn has_previous(&self) -> bool {
        self.pagination.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.pagination.page < self.pagination.total_pages
    }

    pub fn summary(&self) -> String {
        format!(
            "Page {} of {} ({} total)",
            self.pagination.page,
            self.pagination.total_pages.max(1),
            self.pagination.total
        )
    }

    pub fn empty_message(&self) -> Option<&'static str> {
        self.rows.is_empty().then_some(EMPTY_MESSAGE)
    }

    fn row(&self, id: &ScheduleId) -> Option<&ScheduleRow> {
        self.rows.iter().find(|row| row.id == *id)
    }
}

pub struct SchedulesListPage<Tz: TimeZone> {
    tz: Tz,
    page: u32,
    limit: u32,
    filter: StatusFilter,
    pending_cancel: Option<ScheduleId>,
    state: ViewState<ListView>,
    changes: Option<Subscription>,
}

impl<Tz: TimeZone> SchedulesListPage<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self {
            tz,
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            filter: StatusFilter::All,
            pending_cancel: None,
            state: ViewState::Loading,
            changes: None,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }

    /// Start on a given page (before the total is known)
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn state(&self) -> &ViewState<ListView> {
        &self.state
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn query(&self) -> ListQuery {
        let query = ListQuery::new().page(self.page).limit(self.limit);
        match self.filter.status() {
            Some(status) => query.status(status),
            None => query,
        }
    }

    pub async fn load(&mut self, service: &ScheduleService) {
        let changes = self.changes.get_or_insert_with(|| service.subscribe(EntityKey::ScheduleList));
        changes.drain();

        let query = self.query();
        debug!(?query, "loading schedule list");
        self.state = match service.list(query).await {
            Ok(page) => ViewState::Ready(ListView {
                rows: page.items.iter().map(|s| ScheduleRow::from_schedule(s, &self.tz)).collect(),
                pagination: page.pagination,
            }),
            Err(err) => ViewState::Error(error_view_message(&err)),
        };
    }

    /// Reload if a list change was published since the last load
    pub async fn refresh_if_changed(&mut self, service: &ScheduleService) -> bool {
        let changed = self.changes.as_mut().is_some_and(Subscription::drain);
        if changed {
            self.load(service).await;
        }
        changed
    }

    /// Change the filter; the page goes back to 1. Returns whether it changed.
    pub fn set_filter(&mut self, filter: StatusFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.page = DEFAULT_PAGE;
        true
    }

    pub fn next_page(&mut self) -> bool {
        match self.state.ready() {
            Some(view) if view.has_next() => {
                self.page += 1;
                true
            }
            _ => false,
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page > 1 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    /// Open the confirmation dialog for a scheduled row on this page
    pub fn request_cancel(&mut self, id: &ScheduleId) -> bool {
        let cancelable = self
            .state
            .ready()
            .and_then(|view| view.row(id))
            .is_some_and(ScheduleRow::is_cancelable);
        if cancelable {
            self.pending_cancel = Some(id.clone());
        }
        cancelable
    }

    pub fn pending_cancel(&self) -> Option<&ScheduleId> {
        self.pending_cancel.as_ref()
    }

    pub fn dismiss_cancel(&mut self) {
        self.pending_cancel = None;
    }

    /// Cancel the schedule in the open dialog.
    ///
    /// The dialog closes and the list reloads whatever the outcome. After a
    /// failure the reload is served from the cache. `None` when no dialog
    /// was open.
    pub async fn confirm_cancel(&mut self, service: &ScheduleService) -> Option<Result<Schedule>> {
        let id = self.pending_cancel.take()?;
        let result = service.cancel(&id).await;
        self.load(service).await;
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn filter_parses_all_and_statuses() {
        assert_eq!("all".parse::<StatusFilter>(), Ok(StatusFilter::All));
        assert_eq!("Sent".parse::<StatusFilter>(), Ok(StatusFilter::Only(ScheduleStatus::Sent)));
        assert!("pending".parse::<StatusFilter>().is_err());
        assert_eq!(StatusFilter::Only(ScheduleStatus::Canceled).to_string(), "canceled");
    }

    #[test]
    fn changing_the_filter_resets_the_page() {
        let mut page = SchedulesListPage::new(Utc).with_page(3);

        assert!(page.set_filter(StatusFilter::Only(ScheduleStatus::Sent)));
        assert_eq!(page.page(), 1);
        assert!(!page.set_filter(StatusFilter::Only(ScheduleStatus::Sent)));

        let query = page.query();
        assert_eq!(query.status, Some(ScheduleStatus::Sent));
        assert_eq!(query.page, Some(1));
        assert_eq!(query.limit, Some(10));
    }

    #[test]
    fn paging_needs_a_loaded_view() {
        let mut page = SchedulesListPage::new(Utc);
        assert!(!page.next_page());
        assert!(!page.prev_page());
    }

    #[test]
    fn summary_never_shows_zero_pages() {
        let view = ListView {
            rows: Vec::new(),
            pagination: PaginationInfo { page: 1, limit: 10, total: 0, total_pages: 0 },
        };
        assert_eq!(view.summary(), "Page 1 of 1 (0 total)");
        assert_eq!(view.empty_message(), Some(EMPTY_MESSAGE));
        assert!(!view.has_next());
    }
}
