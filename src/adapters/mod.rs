// Adapters layer: concrete effort sources behind the `EffortLookup` port.

pub mod effort_log;
pub mod strava;

use crate::utils::error::{GreensError, Result};
use chrono::{DateTime, NaiveDate};

/// Calendar date of an effort timestamp.
///
/// Accepts RFC 3339 timestamps (`2024-03-15T07:12:00Z`) and plain `YYYY-MM-DD`.
/// Strava's `start_date_local` carries local wall time with a `Z` suffix, so
/// the date is taken as written rather than converted.
pub fn parse_effort_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Ok(timestamp.naive_local().date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| GreensError::InvalidInput {
        message: format!("unrecognised effort date '{}': {}", raw, e),
    })
}
