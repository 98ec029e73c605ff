//! Date + time field composition
//!
//! The form edits a calendar date and a wall-clock time separately; the
//! backend stores one UTC instant. Both directions use the same zone.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Timelike, Utc};

/// Parse `HH:MM` (24-hour)
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    let (hour, minute) = value.split_once(':')?;
    if hour.len() != 2 || minute.len() != 2 {
        return None;
    }
    NaiveTime::from_hms_opt(hour.parse().ok()?, minute.parse().ok()?, 0)
}

/// Parse `YYYY-MM-DD`
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// Combine a date and a time of day in `tz` into a UTC instant.
///
/// Seconds and sub-seconds are zero. An ambiguous local time (clocks moved
/// back) resolves to the earliest instant; a local time skipped by a DST
/// transition yields `None`.
pub fn compose_scheduled_at<Tz: TimeZone>(
    date: NaiveDate,
    time: NaiveTime,
    tz: &Tz,
) -> Option<DateTime<Utc>> {
    let time = time.with_second(0)?.with_nanosecond(0)?;
    tz.from_local_datetime(&date.and_time(time)).earliest().map(|local| local.with_timezone(&Utc))
}

/// Split a stored instant into the date and `HH:MM` shown in `tz`
pub fn split_scheduled_at<Tz: TimeZone>(instant: &DateTime<Utc>, tz: &Tz) -> (NaiveDate, String) {
    let local = instant.with_timezone(tz).naive_local();
    (local.date(), local.format("%H:%M").to_string())
}
