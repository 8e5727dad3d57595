//! Numeric value generators.

use rand::Rng;
use synth_core::Value;

/// Default inclusive integer range.
pub const DEFAULT_INT_MIN: i64 = 0;
pub const DEFAULT_INT_MAX: i64 = 100;

/// Default inclusive float range.
pub const DEFAULT_FLOAT_MIN: f64 = 0.0;
pub const DEFAULT_FLOAT_MAX: f64 = 100.0;

/// Floats are rounded to this many decimals.
pub const FLOAT_DECIMALS: i32 = 2;

/// Largest magnitude accepted for integer bounds given as floats.
const MAX_SAFE_INT: f64 = 9_007_199_254_740_992.0;

/// Resolve optional bounds against the integer defaults.
///
/// A missing bound that would contradict the given one is placed 100 away
/// from it, so `min_value: 500` alone yields `500..=600`.
pub fn int_bounds(min: Option<f64>, max: Option<f64>) -> Result<(i64, i64), String> {
    let lo = match min {
        Some(v) => to_int_bound(v.ceil(), "min_value")?,
        None => DEFAULT_INT_MIN,
    };
    let hi = match max {
        Some(v) => to_int_bound(v.floor(), "max_value")?,
        None => DEFAULT_INT_MAX,
    };
    let (lo, hi) = match (min, max) {
        (None, Some(_)) if lo > hi => (hi.saturating_sub(100), hi),
        (Some(_), None) if lo > hi => (lo, lo.saturating_add(100)),
        _ => (lo, hi),
    };
    if lo > hi {
        return Err(format!("no integer lies within [{lo}, {hi}]"));
    }
    Ok((lo, hi))
}

fn to_int_bound(v: f64, what: &str) -> Result<i64, String> {
    if !v.is_finite() || v.abs() > MAX_SAFE_INT {
        return Err(format!("{what} {v} is out of range"));
    }
    Ok(v as i64)
}

/// Resolve optional bounds against the float defaults.
pub fn float_bounds(min: Option<f64>, max: Option<f64>) -> Result<(f64, f64), String> {
    for (v, what) in [(min, "min_value"), (max, "max_value")] {
        if let Some(v) = v {
            if !v.is_finite() {
                return Err(format!("{what} {v} is not finite"));
            }
        }
    }
    let lo = min.unwrap_or(DEFAULT_FLOAT_MIN);
    let hi = max.unwrap_or(DEFAULT_FLOAT_MAX);
    let (lo, hi) = match (min, max) {
        (None, Some(_)) if lo > hi => (hi - 100.0, hi),
        (Some(_), None) if lo > hi => (lo, lo + 100.0),
        _ => (lo, hi),
    };
    if lo > hi {
        return Err(format!("min_value {lo} is greater than max_value {hi}"));
    }
    if !(hi - lo).is_finite() {
        return Err(format!("range [{lo}, {hi}] is too wide"));
    }
    Ok((lo, hi))
}

/// Generate a random integer in the given range (inclusive).
pub fn generate_int_range<R: Rng + ?Sized>(rng: &mut R, min: i64, max: i64) -> Value {
    Value::Integer(rng.gen_range(min..=max))
}

/// Generate a random float in the given range, rounded to [`FLOAT_DECIMALS`].
///
/// The rounded value is clamped so it never leaves the range.
pub fn generate_float_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> Value {
    let raw = if min == max {
        min
    } else {
        rng.gen_range(min..=max)
    };
    let factor = 10f64.powi(FLOAT_DECIMALS);
    Value::Float(((raw * factor).round() / factor).clamp(min, max))
}
