//! "Recently updated" detection for sheet timestamps

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Default window for the NEW badge
pub const DEFAULT_WINDOW_DAYS: i64 = 7;

/// Parse a timestamp as written in the sheet.
///
/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD`, `YYYY/MM/DD` and
/// the spreadsheet `Date(y,m,d[,h,mi,s])` literal with a zero-based month.
/// Zone-less values are read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| Utc.from_utc_datetime(&naive));
        }
    }
    parse_sheet_date(raw)
}

fn parse_sheet_date(raw: &str) -> Option<DateTime<Utc>> {
    let inner = raw.strip_prefix("Date(")?.strip_suffix(')')?;
    let parts = inner
        .split(',')
        .map(|part| part.trim().parse::<u32>().ok())
        .collect::<Option<Vec<_>>>()?;

    let (year, month0, day) = match parts.as_slice() {
        [y, m, d, ..] => (i32::try_from(*y).ok()?, *m, *d),
        _ => return None,
    };
    let field = |i: usize| parts.get(i).copied().unwrap_or(0);

    NaiveDate::from_ymd_opt(year, month0.checked_add(1)?, day)?
        .and_hms_opt(field(3), field(4), field(5))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Whether `updated_at` lies within `window_days` before `now`.
///
/// Missing or unparseable timestamps are never recent.
pub fn is_recently_updated(updated_at: Option<&str>, now: DateTime<Utc>, window_days: i64) -> bool {
    let Some(window) = Duration::try_days(window_days) else {
        return false;
    };
    match updated_at.and_then(parse_timestamp) {
        Some(updated) => now.signed_duration_since(updated) <= window,
        None => false,
    }
}
