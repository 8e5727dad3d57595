//! Date and datetime value generators.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use synth_core::Value;
use synth_expr::functions::date::{self, DATETIME_FORMAT, DATE_FORMAT};

/// Default inclusive date range.
pub const DEFAULT_DATE_START: &str = "2020-01-01";
pub const DEFAULT_DATE_END: &str = "2024-12-31";

pub fn default_date_range() -> Result<(NaiveDate, NaiveDate), String> {
    Ok((date::parse_date(DEFAULT_DATE_START)?, date::parse_date(DEFAULT_DATE_END)?))
}

/// The default date range widened to whole days.
pub fn default_datetime_range() -> Result<(NaiveDateTime, NaiveDateTime), String> {
    let (start, end) = default_date_range()?;
    let (first_second, last_second) = NaiveTime::from_hms_opt(0, 0, 0)
        .zip(NaiveTime::from_hms_opt(23, 59, 59))
        .ok_or_else(|| "invalid time of day".to_string())?;
    Ok((start.and_time(first_second), end.and_time(last_second)))
}

/// Random `YYYY-MM-DD` date in `[start, end]`.
pub fn generate_date<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> Value {
    let day = date::random_date(rng, start, end).unwrap_or(start);
    Value::String(day.format(DATE_FORMAT).to_string())
}

/// Random `YYYY-MM-DD HH:MM:SS` datetime in `[start, end]`.
pub fn generate_datetime<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Value {
    let at = date::random_datetime(rng, start, end).unwrap_or(start);
    Value::String(at.format(DATETIME_FORMAT).to_string())
}
