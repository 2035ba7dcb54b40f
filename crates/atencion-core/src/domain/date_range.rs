//! Date Range Validation
//!
//! Dates arrive as HTML date-input strings (`YYYY-MM-DD`, optionally with a
//! `THH:MM` time part from datetime inputs).

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Longest span a query may cover
pub const MAX_RANGE_DAYS: i64 = 30;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Inline validation error shown under the date inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateRangeError {
    ExceedsMaxSpan,
    EndBeforeStart,
}

impl std::fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateRangeError::ExceedsMaxSpan => write!(
                f,
                "La diferencia entre las fechas no puede ser mayor a {} días",
                MAX_RANGE_DAYS
            ),
            DateRangeError::EndBeforeStart => {
                write!(f, "La fecha final debe ser mayor o igual a la fecha inicial")
            }
        }
    }
}

impl std::error::Error for DateRangeError {}

/// Parse a date or datetime input value; blank or malformed input is `None`
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M") {
        return Some(dt);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Days from `from` to `to`, rounded up; negative when `to` precedes `from`
pub fn day_span(from: &str, to: &str) -> Option<i64> {
    let from = parse_date(from)?;
    let to = parse_date(to)?;
    let secs = (to - from).num_seconds();
    // ceil for both signs
    Some(secs.div_euclid(SECONDS_PER_DAY) + i64::from(secs.rem_euclid(SECONDS_PER_DAY) != 0))
}

/// Check a from/to pair. Incomplete pairs are not an error.
pub fn validate_range(from: &str, to: &str) -> Result<(), DateRangeError> {
    match day_span(from, to) {
        Some(days) if days > MAX_RANGE_DAYS => Err(DateRangeError::ExceedsMaxSpan),
        Some(days) if days < 0 => Err(DateRangeError::EndBeforeStart),
        _ => Ok(()),
    }
}
