//! String and faker-backed value generators.

use rand::Rng;
use synth_core::{DataType, Value};
use synth_expr::functions::{faker, random};

/// Default inclusive length range for plain strings.
pub const DEFAULT_STRING_MIN_LEN: usize = 5;
pub const DEFAULT_STRING_MAX_LEN: usize = 20;

/// Longest string a `max_length` constraint may ask for.
pub const MAX_STRING_LEN: usize = 10_000;

/// Resolve optional length constraints against the defaults.
pub fn length_bounds(min: Option<usize>, max: Option<usize>) -> Result<(usize, usize), String> {
    for (v, what) in [(min, "min_length"), (max, "max_length")] {
        if let Some(v) = v {
            if v > MAX_STRING_LEN {
                return Err(format!("{what} {v} exceeds the limit of {MAX_STRING_LEN}"));
            }
        }
    }
    let (lo, hi) = match (min, max) {
        (Some(lo), Some(hi)) => (lo, hi),
        (Some(lo), None) => (lo, DEFAULT_STRING_MAX_LEN.max(lo)),
        (None, Some(hi)) => (DEFAULT_STRING_MIN_LEN.min(hi), hi),
        (None, None) => (DEFAULT_STRING_MIN_LEN, DEFAULT_STRING_MAX_LEN),
    };
    if lo > hi {
        return Err(format!("min_length {lo} is greater than max_length {hi}"));
    }
    Ok((lo, hi))
}

/// Random alphanumeric string with a length in `[min_len, max_len]`.
pub fn generate_string<R: Rng + ?Sized>(rng: &mut R, min_len: usize, max_len: usize) -> Value {
    let len = rng.gen_range(min_len..=max_len);
    Value::String(random::alphanumeric(rng, len))
}

/// Builtin types whose values come from the faker tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakerKind {
    Email,
    Phone,
    Name,
    Address,
    City,
    Country,
    Zipcode,
    Company,
    Job,
    Url,
    IpAddress,
}

impl FakerKind {
    pub fn from_data_type(data_type: DataType) -> Option<Self> {
        Some(match data_type {
            DataType::Email => Self::Email,
            DataType::Phone => Self::Phone,
            DataType::Name => Self::Name,
            DataType::Address => Self::Address,
            DataType::City => Self::City,
            DataType::Country => Self::Country,
            DataType::Zipcode => Self::Zipcode,
            DataType::Company => Self::Company,
            DataType::Job => Self::Job,
            DataType::Url => Self::Url,
            DataType::IpAddress => Self::IpAddress,
            _ => return None,
        })
    }

    pub fn generate<R: Rng>(self, rng: &mut R) -> Value {
        let text = match self {
            Self::Email => faker::email(rng),
            Self::Phone => faker::phone(rng),
            Self::Name => faker::name(rng),
            Self::Address => faker::address(rng),
            Self::City => faker::city(rng),
            Self::Country => faker::country(rng),
            Self::Zipcode => faker::zipcode(rng),
            Self::Company => faker::company(rng),
            Self::Job => faker::job(rng),
            Self::Url => faker::url(rng),
            Self::IpAddress => faker::ip(rng),
        };
        Value::String(text)
    }
}
