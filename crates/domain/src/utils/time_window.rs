//! Pure time-window arithmetic for meeting admission and day bucketing
//!
//! Nothing here reads the system clock; callers pass `now` explicitly.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Utc};

use crate::constants::JOIN_GRACE_MINUTES;
use crate::errors::{Result, SchoolHubError};

/// Parse an RFC 3339 timestamp into UTC.
///
/// # Errors
/// Returns `InvalidTimestamp` when the input does not parse.
///
/// # Examples
///
/// ```
/// use schoolhub_domain::utils::time_window::parse_timestamp;
///
/// assert!(parse_timestamp("2025-03-10T09:00:00+01:00").is_ok());
/// assert!(parse_timestamp("next tuesday").is_err());
/// ```
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| SchoolHubError::InvalidTimestamp(format!("{value}: {e}")))
}

/// Midnight of the reference's calendar day, in the reference's own zone.
///
/// When local midnight does not exist (a DST gap), the day starts at the
/// first instant of that date instead.
pub fn start_of_day<Tz: TimeZone>(reference: &DateTime<Tz>) -> DateTime<Utc> {
    let midnight = reference.date_naive().and_time(NaiveTime::MIN);

    match reference.timezone().from_local_datetime(&midnight).earliest() {
        Some(start) => start.with_timezone(&Utc),
        None => {
            let since_midnight = reference.time() - NaiveTime::MIN;
            reference.with_timezone(&Utc) - since_midnight
        }
    }
}

/// `time` falls on the reference's calendar day: `[start_of_day, +24h)`.
pub fn is_within_day_window<Tz: TimeZone>(
    time: DateTime<Utc>,
    reference_day: &DateTime<Tz>,
) -> bool {
    let start = start_of_day(reference_day);
    start <= time && time < start + Duration::hours(24)
}

/// `now <= time <= now + hours`.
///
/// A horizon past the representable date range has no upper bound.
pub fn is_within_horizon(time: DateTime<Utc>, now: DateTime<Utc>, hours: i64) -> bool {
    if time < now {
        return false;
    }
    match Duration::try_hours(hours).and_then(|span| now.checked_add_signed(span)) {
        Some(end) => time <= end,
        None => hours > 0,
    }
}

/// `now` lies in `[scheduled - 60min, scheduled + duration + 60min]`.
///
/// Status is not considered here; see the admission service for the
/// combined check.
pub fn is_joinable(
    scheduled_time: DateTime<Utc>,
    duration_minutes: u32,
    now: DateTime<Utc>,
) -> bool {
    let grace = Duration::minutes(JOIN_GRACE_MINUTES);
    let opens = scheduled_time - grace;
    let closes = scheduled_time + Duration::minutes(i64::from(duration_minutes)) + grace;
    opens <= now && now <= closes
}
