use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M%#z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Calendar date of an `MDEntryTime` value as seen from `tz`.
///
/// Offset-bearing timestamps are converted into `tz`; naive ones are taken as
/// wall-clock time already in `tz`.
pub fn parse_entry_date<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let with_offset = DateTime::parse_from_rfc3339(raw).ok().or_else(|| {
        OFFSET_FORMATS
            .iter()
            .find_map(|format| DateTime::parse_from_str(raw, format).ok())
    });
    if let Some(timestamp) = with_offset {
        return Some(timestamp.with_timezone(tz).date_naive());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|timestamp| timestamp.date())
        .or_else(|| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
}

/// Whether the entry was recorded on `now`'s calendar day. Missing or
/// unparsable timestamps are never fresh.
pub fn is_todays_fresh_data<Tz: TimeZone>(entry_time: Option<&str>, now: &DateTime<Tz>) -> bool {
    let Some(raw) = entry_time else {
        return false;
    };

    match parse_entry_date(raw, &now.timezone()) {
        Some(entry_date) => entry_date == now.date_naive(),
        None => {
            tracing::trace!(entry_time = raw, "unparsable entry time");
            false
        }
    }
}
