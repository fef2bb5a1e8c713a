//! Session-time helpers for the Istanbul reporting timezone.
//!
//! Timestamps in the data model are epoch milliseconds (the shape the chart
//! consumers expect); this module is the single place where they are turned
//! into wall-clock labels and session boundaries.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
use chrono_tz::Tz;

use crate::constants::{
    FOREIGN_CUTOFF_UTC_HOUR, FOREIGN_CUTOFF_UTC_MINUTE, SESSION_CLOSE_HOUR, SESSION_CUTOFF_HOUR,
    SESSION_CUTOFF_MINUTE, SESSION_OPEN_HOUR,
};

/// Canonical timezone for session boundaries and HH:MM labels.
pub const REPORTING_TZ: Tz = chrono_tz::Europe::Istanbul;

/// Formats an epoch-millis timestamp as an HH:MM label in the reporting
/// timezone. Out-of-range timestamps produce a placeholder label rather than
/// panicking.
pub fn hhmm_label(timestamp_ms: i64) -> String {
    match Utc.timestamp_millis_opt(timestamp_ms).single() {
        Some(instant) => instant
            .with_timezone(&REPORTING_TZ)
            .format("%H:%M")
            .to_string(),
        None => "--:--".to_string(),
    }
}

/// The session day an instant belongs to, as a reporting-timezone date.
pub fn session_day(instant: DateTime<Utc>) -> NaiveDate {
    instant.with_timezone(&REPORTING_TZ).date_naive()
}

/// The 18:10 matched-order cutoff on the same session day as `timestamp_ms`.
///
/// Derived from the timestamp's own day, not from "today": on a weekend the
/// last data point is Friday's, and the cutoff must be Friday's close.
pub fn session_cutoff_on(timestamp_ms: i64) -> i64 {
    let day = match Utc.timestamp_millis_opt(timestamp_ms).single() {
        Some(instant) => session_day(instant),
        None => return timestamp_ms,
    };
    local_ms(day, SESSION_CUTOFF_HOUR, SESSION_CUTOFF_MINUTE).unwrap_or(timestamp_ms)
}

/// The 10:00-18:00 session window of `now`'s session day, as epoch millis.
pub fn session_window(now: DateTime<Utc>) -> (i64, i64) {
    let day = session_day(now);
    let now_ms = now.timestamp_millis();
    let open = local_ms(day, SESSION_OPEN_HOUR, 0).unwrap_or(now_ms);
    let close = local_ms(day, SESSION_CLOSE_HOUR, 0).unwrap_or(now_ms);
    (open, close)
}

/// Time window for foreign-listed assets, bounded by the 17:30 Istanbul
/// (14:30 UTC) cutoff: the previous cutoff up to the current one. Weekends
/// show the Friday session and Monday stretches back to Friday so the curve
/// never starts inside a market closure.
pub fn foreign_session_range(now: DateTime<Utc>) -> (i64, i64) {
    let today = session_day(now);
    let (start_day, end_day) = match now.with_timezone(&REPORTING_TZ).weekday() {
        Weekday::Sat => (today - Duration::days(1), today),
        Weekday::Sun => (today - Duration::days(2), today - Duration::days(1)),
        Weekday::Mon => (today - Duration::days(3), today),
        _ => (today - Duration::days(1), today),
    };
    (foreign_cutoff_ms(start_day), foreign_cutoff_ms(end_day))
}

fn foreign_cutoff_ms(day: NaiveDate) -> i64 {
    day.and_hms_opt(FOREIGN_CUTOFF_UTC_HOUR, FOREIGN_CUTOFF_UTC_MINUTE, 0)
        .map(|naive| naive.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// Epoch millis of a reporting-timezone wall-clock time on `day`. `None` only
/// for times that do not exist in the timezone (Istanbul has no DST folds
/// since 2016, but the conversion is still fallible by type).
fn local_ms(day: NaiveDate, hour: u32, minute: u32) -> Option<i64> {
    let naive = day.and_hms_opt(hour, minute, 0)?;
    REPORTING_TZ
        .from_local_datetime(&naive)
        .single()
        .map(|instant| instant.timestamp_millis())
}
