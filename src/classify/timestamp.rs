use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::fmt::Display;

/// Rendered for an empty timestamp.
pub const NOT_AVAILABLE: &str = "N/A";

/// Rendered for a timestamp that does not parse.
pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format an ISO-8601 timestamp in the viewer's local time zone.
pub fn format_timestamp(ts: &str) -> String {
    format_timestamp_in(ts, &Local)
}

/// Format an ISO-8601 timestamp in `tz`.
///
/// Empty input yields [`NOT_AVAILABLE`]; unparsable input yields
/// [`INVALID_DATE`]. Offset-less date-times are read as local to `tz`,
/// bare dates as UTC midnight.
pub fn format_timestamp_in<Tz>(ts: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let ts = ts.trim();
    if ts.is_empty() {
        return NOT_AVAILABLE.to_string();
    }

    match parse(ts, tz) {
        Some(dt) => dt.format(DISPLAY_FORMAT).to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// ISO-8601 variants carrying an offset, tried after RFC 3339.
const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%dT%H:%M%z"];

/// Offset-less variants, read as local to the target zone.
const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

fn parse<Tz: TimeZone>(ts: &str, tz: &Tz) -> Option<DateTime<Tz>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(ts) {
        return Some(dt.with_timezone(tz));
    }

    // `%z` does not accept a literal `Z`.
    let zulu = ts.strip_suffix(['Z', 'z']);
    let with_offset = zulu.map(|t| format!("{}+00:00", t));
    let offset_input = with_offset.as_deref().unwrap_or(ts);
    if let Some(dt) = OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(offset_input, f).ok())
    {
        return Some(dt.with_timezone(tz));
    }
    if zulu.is_some() {
        return None;
    }

    if let Some(naive) = LOCAL_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(ts, f).ok())
    {
        return tz.from_local_datetime(&naive).earliest();
    }
    if let Ok(date) = NaiveDate::parse_from_str(ts, "%Y-%m-%d") {
        let midnight = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&midnight).with_timezone(tz));
    }
    None
}
