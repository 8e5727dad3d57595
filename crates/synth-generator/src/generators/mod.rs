//! Builtin value generators, one per [`DataType`].
//!
//! A [`BuiltinGenerator`] is resolved once per field while the request is
//! validated, so bad constraints are reported before any record exists.
//! Constraints apply in priority order: `allowed_values` (uniform choice),
//! then `pattern`, then length/value bounds for the types that have them.

pub mod numeric;
pub mod pattern;
pub mod text;
pub mod timestamp;

use chrono::{NaiveDate, NaiveDateTime};
use pattern::Pattern;
use rand::Rng;
use synth_core::{DataType, FieldConstraints, Value};
use synth_expr::functions::random::uuid_from_rng;
use text::FakerKind;

/// A resolved generator for one builtin-typed field.
#[derive(Debug, Clone, PartialEq)]
pub enum BuiltinGenerator {
    OneOf(Vec<Value>),
    Pattern(Pattern),
    String { min_len: usize, max_len: usize },
    Integer { min: i64, max: i64 },
    Float { min: f64, max: f64 },
    Boolean,
    Date { start: NaiveDate, end: NaiveDate },
    Datetime { start: NaiveDateTime, end: NaiveDateTime },
    Faker(FakerKind),
    Uuid,
}

impl BuiltinGenerator {
    /// Build the generator for `data_type` under `constraints`.
    ///
    /// Fails with a description of the offending constraint.
    pub fn new(data_type: DataType, constraints: &FieldConstraints) -> Result<Self, String> {
        if !constraints.allowed_values.is_empty() {
            return Ok(Self::OneOf(constraints.allowed_values.clone()));
        }
        if let Some(pattern) = &constraints.pattern {
            return Pattern::parse(pattern)
                .map(Self::Pattern)
                .map_err(|e| format!("pattern '{pattern}': {e}"));
        }

        let generator = match data_type {
            DataType::String => {
                let (min_len, max_len) =
                    text::length_bounds(constraints.min_length, constraints.max_length)?;
                Self::String { min_len, max_len }
            }
            DataType::Integer => {
                let (min, max) = numeric::int_bounds(constraints.min_value, constraints.max_value)?;
                Self::Integer { min, max }
            }
            DataType::Float => {
                let (min, max) =
                    numeric::float_bounds(constraints.min_value, constraints.max_value)?;
                Self::Float { min, max }
            }
            DataType::Boolean => Self::Boolean,
            DataType::Date => {
                let (start, end) = timestamp::default_date_range()?;
                Self::Date { start, end }
            }
            DataType::Datetime => {
                let (start, end) = timestamp::default_datetime_range()?;
                Self::Datetime { start, end }
            }
            DataType::Uuid => Self::Uuid,
            other => match FakerKind::from_data_type(other) {
                Some(kind) => Self::Faker(kind),
                None => return Err(format!("no builtin generator for '{other}'")),
            },
        };
        Ok(generator)
    }

    /// Generate one value for record `index`.
    pub fn generate<R: Rng>(&self, rng: &mut R, index: u64) -> Value {
        match self {
            Self::OneOf(values) => values[rng.gen_range(0..values.len())].clone(),
            Self::Pattern(pattern) => Value::String(pattern.generate(rng, index)),
            Self::String { min_len, max_len } => text::generate_string(rng, *min_len, *max_len),
            Self::Integer { min, max } => numeric::generate_int_range(rng, *min, *max),
            Self::Float { min, max } => numeric::generate_float_range(rng, *min, *max),
            Self::Boolean => Value::Bool(rng.gen_bool(0.5)),
            Self::Date { start, end } => timestamp::generate_date(rng, *start, *end),
            Self::Datetime { start, end } => timestamp::generate_datetime(rng, *start, *end),
            Self::Faker(kind) => kind.generate(rng),
            Self::Uuid => Value::String(uuid_from_rng(rng).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn build(data_type: DataType, constraints: FieldConstraints) -> BuiltinGenerator {
        BuiltinGenerator::new(data_type, &constraints).unwrap()
    }

    #[test]
    fn test_every_data_type_has_a_generator() {
        let mut rng = StdRng::seed_from_u64(42);
        for data_type in DataType::ALL {
            let generator = build(data_type, FieldConstraints::default());
            let value = generator.generate(&mut rng, 0);
            assert!(!value.is_null(), "{data_type} produced null");
        }
    }

    #[test]
    fn test_value_types() {
        let mut rng = StdRng::seed_from_u64(42);
        let cases = [
            (DataType::String, "string"),
            (DataType::Integer, "integer"),
            (DataType::Float, "float"),
            (DataType::Boolean, "boolean"),
            (DataType::Date, "string"),
            (DataType::Uuid, "string"),
        ];
        for (data_type, expected) in cases {
            let value = build(data_type, FieldConstraints::default()).generate(&mut rng, 0);
            assert_eq!(value.type_name(), expected, "{data_type}");
        }
    }

    #[test]
    fn test_allowed_values_win() {
        let constraints = FieldConstraints {
            allowed_values: vec![Value::from("red"), Value::from("blue")],
            pattern: Some("ignored".to_string()),
            ..Default::default()
        };
        let generator = build(DataType::Integer, constraints);
        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..20 {
            let value = generator.generate(&mut rng, i);
            assert!(value == Value::from("red") || value == Value::from("blue"));
        }
    }

    #[test]
    fn test_pattern_beats_bounds() {
        let constraints = FieldConstraints {
            pattern: Some("SKU-{index}".to_string()),
            max_length: Some(2),
            ..Default::default()
        };
        let generator = build(DataType::String, constraints);
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(generator.generate(&mut rng, 7), Value::from("SKU-7"));
    }

    #[test]
    fn test_integer_bounds_are_honoured() {
        let constraints = FieldConstraints {
            min_value: Some(18.0),
            max_value: Some(65.0),
            ..Default::default()
        };
        let generator = build(DataType::Integer, constraints);
        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..100 {
            match generator.generate(&mut rng, i) {
                Value::Integer(n) => assert!((18..=65).contains(&n)),
                other => panic!("expected integer, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_invalid_constraints() {
        let bad_range = FieldConstraints {
            min_value: Some(10.0),
            max_value: Some(1.0),
            ..Default::default()
        };
        assert!(BuiltinGenerator::new(DataType::Float, &bad_range).is_err());

        let bad_pattern = FieldConstraints {
            pattern: Some("[a-z]+".to_string()),
            ..Default::default()
        };
        let err = BuiltinGenerator::new(DataType::String, &bad_pattern).unwrap_err();
        assert!(err.contains("[a-z]+"));

        // Value bounds do not apply to strings.
        assert!(BuiltinGenerator::new(DataType::String, &bad_range).is_ok());
    }
}
