//! Lenient parsing of source-dependent date strings.
//!
//! Sources hand the pipeline anything from RFC 2822 RSS timestamps to
//! bare `dd/mm/yyyy` strings scraped out of HTML. Parsing is best-effort:
//! a value that matches none of the known shapes yields `None`, never an
//! error. The persistence gate stores an absent timestamp instead.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Datetime formats without an offset, assumed UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only formats, assumed midnight UTC.
const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y"];

/// Parse a raw date string leniently into a UTC instant.
///
/// Tries RFC 3339, then RFC 2822, then the known offset-less formats.
/// Returns `None` when nothing matches.
#[must_use]
pub fn parse_lenient(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    for fmt in NAIVE_DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, fmt) {
            let naive = date.and_hms_opt(0, 0, 0)?;
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    None
}
