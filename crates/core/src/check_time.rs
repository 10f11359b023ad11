//! Timezone-aware datetime parsing and check-time resolution.
//!
//! Every time accepted over the API must carry an explicit offset. A
//! well-formed but naive datetime is rejected with a dedicated message so
//! clients can tell it apart from garbage input.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};

use crate::types::Timestamp;
use crate::validation::FieldErrors;

/// Rejection message for a datetime without an offset.
pub const TIMEZONE_REQUIRED: &str = "Timezone is required";

/// Rejection message for input that is not a datetime at all.
pub const INVALID_DATETIME: &str = "Datetime has wrong format. Use one of these formats instead: \
     YYYY-MM-DDThh:mm[:ss[.uuuuuu]][+HH:MM|-HH:MM|Z].";

const AWARE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// The moment a parking check is evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTime {
    pub time: Timestamp,
    /// `true` when the caller supplied the time instead of using "now".
    pub overridden: bool,
}

/// Parse an ISO 8601 datetime that must include a UTC offset.
///
/// The result is normalised to UTC.
pub fn parse_aware_datetime(raw: &str) -> Result<Timestamp, &'static str> {
    let raw = raw.trim();

    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    for format in AWARE_FORMATS {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    // RFC 3339 also allows a trailing `Z`, which `%z` does not parse.
    if let Some(without_z) = raw.strip_suffix('Z').or_else(|| raw.strip_suffix('z')) {
        if let Some(naive) = parse_naive(without_z) {
            return Ok(naive.and_utc());
        }
    }

    if parse_naive(raw).is_some() {
        return Err(TIMEZONE_REQUIRED);
    }
    Err(INVALID_DATETIME)
}

/// Parse `raw` as an aware datetime, reporting failures under `field`.
pub fn parse_field(field: &str, raw: &str) -> Result<Timestamp, FieldErrors> {
    parse_aware_datetime(raw).map_err(|message| FieldErrors::single(field, message))
}

/// Resolve the time a check is evaluated at.
///
/// A missing time means "now" and is not counted as an override. The result
/// is truncated to microseconds, the precision of `TIMESTAMPTZ`, so the
/// returned instant is exactly the one stored with the check.
pub fn resolve(requested: Option<&str>, now: Timestamp) -> Result<CheckTime, FieldErrors> {
    let (time, overridden) = match requested {
        None => (now, false),
        Some(raw) => (parse_field("time", raw)?, true),
    };
    Ok(CheckTime {
        time: time.trunc_subsecs(6),
        overridden,
    })
}

fn parse_naive(raw: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
