//! Page controllers
//!
//! Each page owns its view state and talks to the [`ScheduleService`];
//! front ends only render the state and forward user intents. Navigation is
//! expressed as a returned [`Route`].
//!
//! [`ScheduleService`]: crate::schedules::ScheduleService

pub mod create;
pub mod dashboard;
pub mod details;
pub mod edit;
pub mod format;
pub mod list;

use std::fmt;

use agenda_common::validation::ValidationError;
use agenda_domain::{AgendaError, ScheduleId};

pub use create::CreateSchedulePage;
pub use dashboard::{DashboardPage, DashboardView, StatusCounts};
pub use details::{ContactLine, DetailsView, ScheduleDetailsPage};
pub use edit::{EditSchedulePage, EditState};
pub use format::{format_instant, ScheduleRow};
pub use list::{ListView, SchedulesListPage, StatusFilter};

pub const NOT_FOUND_MESSAGE: &str = "Schedule not found";

/// Page a controller asks the front end to show next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Schedules,
    NewSchedule,
    ScheduleDetails(ScheduleId),
    EditSchedule(ScheduleId),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => "/".to_string(),
            Self::Schedules => "/schedules".to_string(),
            Self::NewSchedule => "/schedules/new".to_string(),
            Self::ScheduleDetails(id) => format!("/schedules/{id}"),
            Self::EditSchedule(id) => format!("/schedules/{id}/edit"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Loading / error / ready state of a page's query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> ViewState<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Error view text for a failed query
///
/// The backend's text is shown as is; a not-found without one gets
/// [`NOT_FOUND_MESSAGE`].
pub(crate) fn error_view_message(err: &AgendaError) -> String {
    match err {
        AgendaError::NotFound(message) if message.trim().is_empty() => {
            NOT_FOUND_MESSAGE.to_string()
        }
        other => other.message(),
    }
}

/// Result of submitting a create or edit form
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Saved; show this route next
    Navigate(Route),
    /// Draft failed validation; nothing was sent
    Invalid(ValidationError),
    /// Backend rejected the request; the draft is kept
    Failed(AgendaError),
    /// The form is not available (still loading or blocked)
    Unavailable(String),
}
