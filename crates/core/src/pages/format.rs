//! Display helpers shared by the pages

use agenda_domain::{Schedule, ScheduleId, ScheduleStatus};
use chrono::{DateTime, TimeZone, Utc};

const PREVIEW_CHARS: usize = 60;

/// `dd/MM/yyyy HH:mm` in `tz`
pub fn format_instant<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> String {
    instant.with_timezone(tz).naive_local().format("%d/%m/%Y %H:%M").to_string()
}

/// One schedule as a list or dashboard row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub id: ScheduleId,
    pub preview: String,
    pub scheduled_at: String,
    pub status: ScheduleStatus,
    pub status_label: &'static str,
    pub cadence_label: String,
    pub contact_count: usize,
}

impl ScheduleRow {
    pub fn from_schedule<Tz: TimeZone>(schedule: &Schedule, tz: &Tz) -> Self {
        Self {
            id: schedule.id.clone(),
            preview: preview(&schedule.message),
            scheduled_at: format_instant(&schedule.scheduled_at, tz),
            status: schedule.status,
            status_label: schedule.status.label(),
            cadence_label: schedule.cadence.label(),
            contact_count: schedule.contacts.len(),
        }
    }

    pub fn is_cancelable(&self) -> bool {
        self.status.is_pending()
    }
}

fn preview(message: &str) -> String {
    let single_line = message.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= PREVIEW_CHARS {
        return single_line;
    }
    let cut: String = single_line.chars().take(PREVIEW_CHARS - 3).collect();
    format!("{}...", cut.trim_end())
}
