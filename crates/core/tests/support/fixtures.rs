//! Schedule fixtures and fixed instants

use agenda_domain::{Cadence, Contact, Schedule, ScheduleId, ScheduleStatus};
use chrono::{DateTime, TimeZone, Utc};

pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
}

pub fn schedule(id: &str, status: ScheduleStatus) -> Schedule {
    let when = at(2025, 3, 10, 14, 30);
    Schedule {
        id: ScheduleId::new(id),
        message: format!("Message {id}"),
        scheduled_at: when,
        status,
        cadence: Cadence::Once,
        contacts: vec![Contact {
            id: format!("c-{id}"),
            name: "Ana".into(),
            phone: "+5511999990000".into(),
            schedule_id: ScheduleId::new(id),
        }],
        created_at: at(2025, 3, 1, 9, 0),
        updated_at: at(2025, 3, 1, 9, 0),
    }
}

