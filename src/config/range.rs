//! Reporting window

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::ConfigError;

/// Timestamp format used for query parameters and the report header.
/// Fractional seconds are printed only when present.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

/// The `(since, until)` window bounding which commits are counted.
///
/// Boundary inclusiveness is whatever the commits endpoint does with the
/// `since` and `until` parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    since: DateTime<Utc>,
    until: DateTime<Utc>,
}

#[derive(Clone, Copy)]
enum Bound {
    Start,
    End,
}

impl DateRange {
    pub fn new(since: DateTime<Utc>, until: DateTime<Utc>) -> Result<Self, ConfigError> {
        if since > until {
            return Err(ConfigError::Invalid(format!(
                "since ({}) is after until ({})",
                since.format(TIMESTAMP_FORMAT),
                until.format(TIMESTAMP_FORMAT)
            )));
        }
        Ok(Self { since, until })
    }

    /// Parse both bounds from RFC 3339 timestamps or bare `YYYY-MM-DD` dates.
    ///
    /// A bare `since` date starts at midnight, a bare `until` date ends at
    /// 23:59:59, both in UTC.
    pub fn parse(since: &str, until: &str) -> Result<Self, ConfigError> {
        Self::new(
            parse_bound(since, Bound::Start)?,
            parse_bound(until, Bound::End)?,
        )
    }

    /// `since` as sent to the API
    pub fn since_param(&self) -> String {
        self.since.format(TIMESTAMP_FORMAT).to_string()
    }

    /// `until` as sent to the API
    pub fn until_param(&self) -> String {
        self.until.format(TIMESTAMP_FORMAT).to_string()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.since_param(), self.until_param())
    }
}

fn parse_bound(input: &str, bound: Bound) -> Result<DateTime<Utc>, ConfigError> {
    let input = input.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| ConfigError::InvalidDate(input.to_string()))?;
    let time = match bound {
        Bound::Start => NaiveTime::from_hms_opt(0, 0, 0),
        Bound::End => NaiveTime::from_hms_opt(23, 59, 59),
    }
    .ok_or_else(|| ConfigError::InvalidDate(input.to_string()))?;

    Ok(date.and_time(time).and_utc())
}
