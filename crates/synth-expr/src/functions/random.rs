//! `random.*` functions and `uuid()`.

use super::{int_arg, number_arg, size_arg, FunctionSpec};
use rand::{Rng, RngCore};
use synth_core::Value;
use uuid::Uuid;

/// Longest string `random.string` / `random.digits` will build.
pub const MAX_RANDOM_LENGTH: usize = 10_000;

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

pub(crate) static FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec {
        name: "random.int",
        min_args: 2,
        max_args: Some(2),
        signature: "random.int(min, max)",
        description: "Uniform integer in [min, max]",
        call: random_int,
    },
    FunctionSpec {
        name: "random.float",
        min_args: 2,
        max_args: Some(2),
        signature: "random.float(min, max)",
        description: "Uniform float in [min, max], rounded to 2 decimals",
        call: random_float,
    },
    FunctionSpec {
        name: "random.bool",
        min_args: 0,
        max_args: Some(1),
        signature: "random.bool([p])",
        description: "true with probability p (default 0.5)",
        call: random_bool,
    },
    FunctionSpec {
        name: "random.choice",
        min_args: 1,
        max_args: None,
        signature: "random.choice(v1, v2, ...) | random.choice([v1, v2, ...])",
        description: "One of the given values, uniformly",
        call: random_choice,
    },
    FunctionSpec {
        name: "random.string",
        min_args: 1,
        max_args: Some(2),
        signature: "random.string(len) | random.string(min, max)",
        description: "Random alphanumeric string",
        call: random_string,
    },
    FunctionSpec {
        name: "random.digits",
        min_args: 1,
        max_args: Some(1),
        signature: "random.digits(n)",
        description: "String of n random decimal digits",
        call: random_digits,
    },
    FunctionSpec {
        name: "uuid",
        min_args: 0,
        max_args: Some(0),
        signature: "uuid()",
        description: "Random v4 UUID drawn from the record stream",
        call: uuid_v4,
    },
];

fn random_int(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let min = int_arg(args, 0, "min")?;
    let max = int_arg(args, 1, "max")?;
    if min > max {
        return Err(format!("min ({min}) is greater than max ({max})"));
    }
    Ok(Value::Integer(rng.gen_range(min..=max)))
}

fn random_float(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let min = number_arg(args, 0, "min")?;
    let max = number_arg(args, 1, "max")?;
    if !min.is_finite() || !max.is_finite() || min > max || !(max - min).is_finite() {
        return Err(format!("invalid range [{min}, {max}]"));
    }
    let value = if min == max {
        min
    } else {
        rng.gen_range(min..=max)
    };
    let rounded = (value * 100.0).round() / 100.0;
    Ok(Value::Float(if rounded.is_finite() { rounded } else { value }))
}

fn random_bool(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let p = if args.is_empty() {
        0.5
    } else {
        number_arg(args, 0, "probability")?
    };
    if !(0.0..=1.0).contains(&p) {
        return Err(format!("probability must be within [0, 1], got {p}"));
    }
    Ok(Value::Bool(rng.gen_bool(p)))
}

fn random_choice(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    if args.is_empty() {
        return Err("no values to choose from".to_string());
    }
    Ok(args[rng.gen_range(0..args.len())].clone())
}

fn random_string(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let min = size_arg(args, 0, "length", MAX_RANDOM_LENGTH)?;
    let max = if args.len() > 1 {
        size_arg(args, 1, "max length", MAX_RANDOM_LENGTH)?
    } else {
        min
    };
    if min > max {
        return Err(format!("min length ({min}) is greater than max length ({max})"));
    }
    let len = rng.gen_range(min..=max);
    Ok(Value::String(alphanumeric(rng, len)))
}

fn random_digits(rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let n = size_arg(args, 0, "digit count", MAX_RANDOM_LENGTH)?;
    let digits = (0..n)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect();
    Ok(Value::String(digits))
}

fn uuid_v4(rng: &mut dyn RngCore, _args: &[Value]) -> Result<Value, String> {
    Ok(Value::String(uuid_from_rng(rng).to_string()))
}

/// Random alphanumeric string of exactly `len` characters.
pub fn alphanumeric<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(ALPHANUMERIC[rng.gen_range(0..ALPHANUMERIC.len())]))
        .collect()
}

/// Build a v4 UUID from 16 rng bytes.
pub fn uuid_from_rng<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn call(f: super::super::FunctionImpl, args: &[Value]) -> Result<Value, String> {
        let mut rng = StdRng::seed_from_u64(42);
        f(&mut rng, args)
    }

    #[test]
    fn test_random_int_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let value = random_int(&mut rng, &[Value::Integer(10), Value::Integer(20)]).unwrap();
            assert!((10..=20).contains(&value.as_i64().unwrap()));
        }
        assert!(call(random_int, &[Value::Integer(5), Value::Integer(1)]).is_err());
        assert_eq!(
            call(random_int, &[Value::Integer(7), Value::Integer(7)]),
            Ok(Value::Integer(7))
        );
    }

    #[test]
    fn test_random_float_rounding() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let value = random_float(&mut rng, &[Value::Integer(0), Value::Float(1.5)])
                .unwrap()
                .as_f64()
                .unwrap();
            assert!((0.0..=1.5).contains(&value));
            assert_eq!((value * 100.0).round() / 100.0, value);
        }
    }

    #[test]
    fn test_random_float_rejects_overflowing_span() {
        assert!(call(random_float, &[Value::Float(-1e308), Value::Float(1e308)]).is_err());
        assert!(call(random_float, &[Value::Float(f64::NAN), Value::Integer(1)]).is_err());
        let value = call(random_float, &[Value::Float(1e306), Value::Float(1e307)])
            .unwrap()
            .as_f64()
            .unwrap();
        assert!(value.is_finite());
    }

    #[test]
    fn test_random_bool_probability() {
        assert_eq!(call(random_bool, &[Value::Integer(1)]), Ok(Value::Bool(true)));
        assert_eq!(call(random_bool, &[Value::Integer(0)]), Ok(Value::Bool(false)));
        assert!(call(random_bool, &[Value::Float(1.5)]).is_err());
    }

    #[test]
    fn test_random_choice_picks_an_argument() {
        let options = vec![Value::from("a"), Value::from("b"), Value::Integer(3)];
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let chosen = random_choice(&mut rng, &options).unwrap();
            assert!(options.contains(&chosen));
        }
    }

    #[test]
    fn test_random_string_and_digits() {
        let value = call(random_string, &[Value::Integer(12)]).unwrap();
        let s = value.as_str().unwrap();
        assert_eq!(s.len(), 12);
        assert!(s.chars().all(|c| c.is_ascii_alphanumeric()));

        let value = call(random_string, &[Value::Integer(3), Value::Integer(5)]).unwrap();
        assert!((3..=5).contains(&value.as_str().unwrap().len()));

        let value = call(random_digits, &[Value::Integer(6)]).unwrap();
        let s = value.as_str().unwrap();
        assert_eq!(s.len(), 6);
        assert!(s.chars().all(|c| c.is_ascii_digit()));

        assert!(call(random_digits, &[Value::Integer(-2)]).is_err());
    }

    #[test]
    fn test_uuid_is_deterministic_v4() {
        let a = call(uuid_v4, &[]).unwrap();
        let b = call(uuid_v4, &[]).unwrap();
        assert_eq!(a, b);

        let parsed = Uuid::parse_str(a.as_str().unwrap()).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }
}
