//! Plain-text rendering of page views

use std::fmt::Write as _;

use agenda_common::validation::ValidationError;
use agenda_core::pages::{DashboardView, DetailsView, ListView, ScheduleRow};
use agenda_core::{Notification, NotificationLevel};

const HEADERS: [&str; 6] = ["ID", "WHEN", "STATUS", "TYPE", "CONTACTS", "MESSAGE"];

/// Aligned table of schedule rows
pub fn rows_table(rows: &[ScheduleRow]) -> String {
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|row| {
            [
                row.id.to_string(),
                row.scheduled_at.clone(),
                row.status_label.to_string(),
                row.cadence_label.clone(),
                row.contact_count.to_string(),
                row.preview.clone(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for line in &cells {
        for (width, cell) in widths.iter_mut().zip(line) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    for line in &cells {
        push_line(&mut out, line, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let last = cells.len() - 1;
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i == last {
            out.push_str(cell);
        } else {
            let _ = write!(out, "{cell:<width$}  ");
        }
    }
    out.push('\n');
}

pub fn dashboard(view: &DashboardView) -> String {
    let counts = &view.counts;
    let mut out = format!(
        "Total {} | Scheduled {} | Sent {} | Canceled {}\n\nRecent schedules\n",
        counts.total, counts.scheduled, counts.sent, counts.canceled
    );
    match view.empty_message() {
        Some(message) => {
            out.push_str(message);
            out.push('\n');
        }
        None => out.push_str(&rows_table(&view.recent)),
    }
    out
}

pub fn list(view: &ListView) -> String {
    let mut out = match view.empty_message() {
        Some(message) => format!("{message}\n"),
        None => rows_table(&view.rows),
    };
    out.push('\n');
    out.push_str(&view.summary());
    out.push('\n');
    out
}

pub fn details(view: &DetailsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Schedule {}", view.id);
    let _ = writeln!(out, "Status:     {}", view.status_label);
    let _ = writeln!(out, "Type:       {}", view.cadence_label);
    let _ = writeln!(out, "Scheduled:  {}", view.scheduled_at);
    let _ = writeln!(out, "Created:    {}", view.created_at);
    let _ = writeln!(out, "Updated:    {}", view.updated_at);
    let _ = writeln!(out, "\nMessage\n{}", view.message);
    let _ = writeln!(out, "\nContacts ({})", view.contacts.len());
    for contact in &view.contacts {
        let _ = writeln!(out, "  {}  {}", contact.name, contact.phone);
    }
    out
}

/// One line per field error, in report order
pub fn field_errors(report: &ValidationError) -> String {
    report.errors.iter().fold(String::new(), |mut out, error| {
        let _ = writeln!(out, "  {}: {}", error.field, error.message);
        out
    })
}

pub fn notification(notification: &Notification) -> String {
    let marker = match notification.level {
        NotificationLevel::Success => "ok",
        NotificationLevel::Error => "error",
    };
    match &notification.description {
        Some(description) => format!("[{marker}] {}: {description}\n", notification.title),
        None => format!("[{marker}] {}\n", notification.title),
    }
}

#[cfg(test)]
mod tests {
    use agenda_core::pages::details::ContactLine;
    use agenda_core::pages::StatusCounts;
    use agenda_domain::{PaginationInfo, ScheduleId, ScheduleStatus};

    use super::*;

    fn row(id: &str) -> ScheduleRow {
        ScheduleRow {
            id: ScheduleId::new(id),
            preview: "Bom dia".into(),
            scheduled_at: "10/03/2025 14:30".into(),
            status: ScheduleStatus::Scheduled,
            status_label: "Scheduled",
            cadence_label: "Once".into(),
            contact_count: 2,
        }
    }

    #[test]
    fn table_aligns_columns() {
        let table = rows_table(&[row("a"), row("long-id")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID       WHEN"));
        assert!(lines[1].starts_with("a        10/03/2025 14:30"));
        assert!(lines[2].ends_with("2         Bom dia"));
    }

    #[test]
    fn empty_dashboard_says_so() {
        let view = DashboardView { counts: StatusCounts::default(), recent: vec![] };
        let text = dashboard(&view);
        assert!(text.starts_with("Total 0 | Scheduled 0 | Sent 0 | Canceled 0"));
        assert!(text.contains("No schedules yet"));
    }

    #[test]
    fn list_ends_with_summary() {
        let view = ListView {
            rows: vec![row("a")],
            pagination: PaginationInfo { page: 1, limit: 10, total: 11, total_pages: 2 },
        };
        assert!(list(&view).ends_with("Page 1 of 2 (11 total)\n"));
    }

    #[test]
    fn details_lists_contacts() {
        let view = DetailsView {
            id: ScheduleId::new("s-1"),
            status: ScheduleStatus::Sent,
            status_label: "Sent",
            cadence_label: "Recurring (weekly)".into(),
            scheduled_at: "10/03/2025 14:30".into(),
            created_at: "01/03/2025 09:00".into(),
            updated_at: "01/03/2025 09:00".into(),
            message: "Bom dia".into(),
            contacts: vec![ContactLine { name: "Ana".into(), phone: "+55".into() }],
        };
        let text = details(&view);
        assert!(text.contains("Type:       Recurring (weekly)"));
        assert!(text.contains("Contacts (1)\n  Ana  +55\n"));
    }

    #[test]
    fn error_notification_includes_description() {
        let text = notification(&Notification::error("Failed to cancel schedule", "Already sent"));
        assert_eq!(text, "[error] Failed to cancel schedule: Already sent\n");
        assert_eq!(notification(&Notification::success("Schedule created")), "[ok] Schedule created\n");
    }
}
