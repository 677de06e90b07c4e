//! Read-only views over a meeting collection
//!
//! Pure functions; callers pass the snapshot and `now` explicitly.

use chrono::{DateTime, TimeZone, Utc};
use schoolhub_domain::utils::{is_within_day_window, is_within_horizon, parse_timestamp};
use schoolhub_domain::{Meeting, Result};

/// Meetings scheduled on the calendar day of `now`, in `now`'s time zone.
pub fn today<'a, Tz: TimeZone>(meetings: &'a [Meeting], now: &DateTime<Tz>) -> Vec<&'a Meeting> {
    meetings.iter().filter(|m| is_within_day_window(m.scheduled_time, now)).collect()
}

/// Meetings starting within the next `hours`, earliest first.
pub fn upcoming(meetings: &[Meeting], now: DateTime<Utc>, hours: i64) -> Vec<&Meeting> {
    let mut found: Vec<&Meeting> =
        meetings.iter().filter(|m| is_within_horizon(m.scheduled_time, now, hours)).collect();
    found.sort_by_key(|m| m.scheduled_time);
    found
}

/// Meetings hosted by `user_id` or listing them as a participant.
pub fn for_user<'a>(meetings: &'a [Meeting], user_id: &str) -> Vec<&'a Meeting> {
    meetings.iter().filter(|m| m.host_id == user_id || m.has_participant(user_id)).collect()
}

/// Case-insensitive substring search over title, description, host name and
/// type tag. A blank query matches everything.
pub fn search<'a>(meetings: &'a [Meeting], query: &str) -> Vec<&'a Meeting> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return meetings.iter().collect();
    }

    meetings
        .iter()
        .filter(|m| {
            [
                Some(m.title.as_str()),
                Some(m.description.as_str()),
                Some(m.host_name.as_str()),
                m.meeting_type.as_deref(),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Parse a caller-supplied `now`.
///
/// # Errors
/// Returns `InvalidTimestamp` when the value is not RFC 3339.
pub fn parse_now(value: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(value)
}
