//! Date parsing for request bodies and query strings.
//!
//! ## Summary
//! Clients send dates as ISO strings, either a full RFC 3339 timestamp or a
//! bare `YYYY-MM-DD` date. Bare dates resolve to midnight UTC; naive
//! datetimes are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::{CoreError, CoreResult};

/// Parses a client-supplied date string into a UTC timestamp.
///
/// ## Errors
/// Returns `CoreError::ParseError` if the input matches none of the accepted
/// forms.
pub fn parse_date(input: &str) -> CoreResult<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(dt.and_utc());
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(CoreError::ParseError(format!("invalid date: {input}")))
}
