use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use tracing::warn;

/// Timestamp format used by workout-tracker CSV exports,
/// e.g. `"26 Feb 2024, 18:30"`.
pub const EXPORT_TIMESTAMP_FORMAT: &str = "%d %b %Y, %H:%M";

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Parse an export timestamp such as `"26 Feb 2024, 18:30"`.
///
/// Returns `None` for empty or malformed strings; callers drop those rows.
///
/// # Examples
///
/// ```
/// use liftboard_core::time_utils::parse_export_timestamp;
///
/// let dt = parse_export_timestamp("26 Feb 2024, 18:30").unwrap();
/// assert_eq!(dt.to_string(), "2024-02-26 18:30:00");
/// assert!(parse_export_timestamp("yesterday-ish").is_none());
/// ```
pub fn parse_export_timestamp(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDateTime::parse_from_str(trimmed, EXPORT_TIMESTAMP_FORMAT).ok()
}

// ── Calendar bucketing ────────────────────────────────────────────────────────

/// Month bucket key in `YYYY-MM` form; lexicographic order is chronological.
pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// The Monday of the week containing `date`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use liftboard_core::time_utils::week_start;
///
/// let sunday = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
/// assert_eq!(week_start(sunday), NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

// ── Timezone handling ─────────────────────────────────────────────────────────

/// Detect the IANA timezone name of the running system.
///
/// Uses the `iana-time-zone` crate directly – no subprocess calls.
/// Falls back to `"UTC"` if detection fails.
pub fn get_system_timezone() -> String {
    iana_time_zone::get_timezone().unwrap_or_else(|_| "UTC".to_string())
}

/// Resolve an IANA timezone name to a [`Tz`].
///
/// If `tz_name` is not a recognised IANA timezone, falls back to UTC and
/// logs a warning.
pub fn resolve_timezone(tz_name: &str) -> Tz {
    tz_name.parse::<Tz>().unwrap_or_else(|_| {
        warn!(
            "unrecognised timezone \"{}\", falling back to UTC",
            tz_name
        );
        Tz::UTC
    })
}

/// Today's calendar date in the given timezone.
///
/// Used for the "days since last workout" and this-week/month/year counters,
/// which should roll over at the user's local midnight rather than UTC's.
pub fn today_in(tz: Tz) -> NaiveDate {
    Utc::now().with_timezone(&tz).date_naive()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
