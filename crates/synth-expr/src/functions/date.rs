//! `date.*` and `datetime.*` functions.
//!
//! Dates are exchanged as `YYYY-MM-DD` strings and datetimes as
//! `YYYY-MM-DD HH:MM:SS`. Relative functions count from [`REFERENCE_DATE`]
//! instead of the wall clock so output only depends on the rng.

use super::{size_arg, str_arg, FunctionSpec};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use rand::{Rng, RngCore};
use synth_core::Value;

/// Anchor for `date.past` / `date.future`.
pub const REFERENCE_DATE: &str = "2024-12-31";

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest day span accepted by the relative functions (about 1000 years).
const MAX_DAYS: usize = 366_000;

pub(crate) static FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec {
        name: "date.between",
        min_args: 2,
        max_args: Some(2),
        signature: "date.between(start, end)",
        description: "Uniform date in [start, end] (YYYY-MM-DD)",
        call: date_between,
    },
    FunctionSpec {
        name: "date.past",
        min_args: 1,
        max_args: Some(1),
        signature: "date.past(days)",
        description: "Date at most `days` days before the reference date",
        call: date_past,
    },
    FunctionSpec {
        name: "date.future",
        min_args: 1,
        max_args: Some(1),
        signature: "date.future(days)",
        description: "Date at most `days` days after the reference date",
        call: date_future,
    },
    FunctionSpec {
        name: "datetime.between",
        min_args: 2,
        max_args: Some(2),
        signature: "datetime.between(start, end)",
        description: "Uniform datetime in [start, end], second resolution",
        call: datetime_between,
    },
];

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .map_err(|_| format!("'{s}' is not a date (expected YYYY-MM-DD)"))
}

/// Parse a datetime in `YYYY-MM-DD HH:MM:SS`, RFC 3339 or date-only form.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime, String> {
    let s = s.trim();
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return Ok(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    if let Some(dt) = parse_date(s).ok().and_then(|d| d.and_hms_opt(0, 0, 0)) {
        return Ok(dt);
    }
    Err(format!("'{s}' is not a datetime (expected YYYY-MM-DD HH:MM:SS)"))
}

/// Uniform date in `[start, end]`.
pub fn random_date<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<NaiveDate, String> {
    if start > end {
        return Err(format!("start ({start}) is after end ({end})"));
    }
    let span = (end - start).num_days();
    Ok(start + Duration::days(rng.gen_range(0..=span)))
}

/// Uniform datetime in `[start, end]` at second resolution.
pub fn random_datetime<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<NaiveDateTime, String> {
    if start > end {
        return Err(format!("start ({start}) is after end ({end})"));
    }
    let span = (end - start).num_seconds();
    Ok(start + Duration::seconds(rng.gen_range(0..=span)))
}

fn date_between(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let start = parse_date(str_arg(args, 0, "start")?)?;
    let end = parse_date(str_arg(args, 1, "end")?)?;
    let date = random_date(rng, start, end)?;
    Ok(Value::String(date.format(DATE_FORMAT).to_string()))
}

fn date_past(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let days = size_arg(args, 0, "days", MAX_DAYS)?;
    let reference = parse_date(REFERENCE_DATE)?;
    let start = reference - Duration::days(days as i64);
    let date = random_date(rng, start, reference)?;
    Ok(Value::String(date.format(DATE_FORMAT).to_string()))
}

fn date_future(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let days = size_arg(args, 0, "days", MAX_DAYS)?;
    let reference = parse_date(REFERENCE_DATE)?;
    let end = reference + Duration::days(days as i64);
    let date = random_date(rng, reference, end)?;
    Ok(Value::String(date.format(DATE_FORMAT).to_string()))
}

fn datetime_between(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let start = parse_datetime(str_arg(args, 0, "start")?)?;
    let end = parse_datetime(str_arg(args, 1, "end")?)?;
    let dt = random_datetime(rng, start, end)?;
    Ok(Value::String(dt.format(DATETIME_FORMAT).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn text(value: Value) -> String {
        value.as_str().unwrap().to_string()
    }

    #[test]
    fn test_date_between() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let value = date_between(
                &mut rng,
                &[Value::from("2023-01-01"), Value::from("2023-01-31")],
            )
            .unwrap();
            let date = parse_date(&text(value)).unwrap();
            assert!(date >= parse_date("2023-01-01").unwrap());
            assert!(date <= parse_date("2023-01-31").unwrap());
        }
    }

    #[test]
    fn test_date_between_rejects_bad_input() {
        let mut rng = StdRng::seed_from_u64(42);
        assert!(date_between(&mut rng, &[Value::from("2023-02-01"), Value::from("2023-01-01")]).is_err());
        assert!(date_between(&mut rng, &[Value::from("yesterday"), Value::from("2023-01-01")]).is_err());
        assert!(date_between(&mut rng, &[Value::Integer(1), Value::from("2023-01-01")]).is_err());
    }

    #[test]
    fn test_past_and_future_are_anchored() {
        let reference = parse_date(REFERENCE_DATE).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let past = parse_date(&text(date_past(&mut rng, &[Value::Integer(30)]).unwrap())).unwrap();
            assert!(past <= reference && past >= reference - Duration::days(30));

            let future =
                parse_date(&text(date_future(&mut rng, &[Value::Integer(30)]).unwrap())).unwrap();
            assert!(future >= reference && future <= reference + Duration::days(30));
        }
        assert_eq!(
            date_past(&mut rng, &[Value::Integer(0)]),
            Ok(Value::from(REFERENCE_DATE))
        );
    }

    #[test]
    fn test_datetime_between_formats() {
        let mut rng = StdRng::seed_from_u64(42);
        let value = datetime_between(
            &mut rng,
            &[
                Value::from("2024-01-01T00:00:00Z"),
                Value::from("2024-01-01 12:00:00"),
            ],
        )
        .unwrap();
        let dt = parse_datetime(&text(value.clone())).unwrap();
        assert!(dt >= parse_datetime("2024-01-01").unwrap());
        assert!(dt <= parse_datetime("2024-01-01 12:00:00").unwrap());
        assert_eq!(text(value).len(), "2024-01-01 00:00:00".len());
    }
}
