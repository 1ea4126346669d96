//! Date display formatting.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

const LOCALE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

/// Format a timestamp string for display in local time.
///
/// Missing or empty input renders as "N/A"; input that cannot be parsed
/// renders as "Invalid Date".
pub fn format_date(date: Option<&str>) -> String {
    let Some(date) = date.filter(|d| !d.is_empty()) else {
        return "N/A".to_string();
    };
    match parse_timestamp(date) {
        Some(parsed) => format_local(&parsed.with_timezone(&Local)),
        None => "Invalid Date".to_string(),
    }
}

/// Format in an explicit time zone; used where output must be stable.
pub fn format_date_in<Tz: TimeZone>(date: Option<&str>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    let Some(date) = date.filter(|d| !d.is_empty()) else {
        return "N/A".to_string();
    };
    match parse_timestamp(date) {
        Some(parsed) => format_local(&parsed.with_timezone(tz)),
        None => "Invalid Date".to_string(),
    }
}

fn format_local<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    date.format(LOCALE_FORMAT).to_string()
}

/// RFC 3339 first, then a bare date-time or date read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}
