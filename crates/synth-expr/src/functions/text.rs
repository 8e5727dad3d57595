//! Pure helper functions. None of them touch the rng.

use super::{int_arg, number_arg, size_arg, str_arg, FunctionSpec};
use rand::RngCore;
use synth_core::Value;

/// Widest padding `pad` will produce.
const MAX_PAD_WIDTH: usize = 10_000;

pub(crate) static FUNCTIONS: &[FunctionSpec] = &[
    FunctionSpec {
        name: "upper",
        min_args: 1,
        max_args: Some(1),
        signature: "upper(s)",
        description: "Uppercase a string",
        call: upper,
    },
    FunctionSpec {
        name: "lower",
        min_args: 1,
        max_args: Some(1),
        signature: "lower(s)",
        description: "Lowercase a string",
        call: lower,
    },
    FunctionSpec {
        name: "len",
        min_args: 1,
        max_args: Some(1),
        signature: "len(s)",
        description: "Number of characters in a string",
        call: len,
    },
    FunctionSpec {
        name: "concat",
        min_args: 1,
        max_args: None,
        signature: "concat(v1, v2, ...)",
        description: "Concatenate the text form of all arguments",
        call: concat,
    },
    FunctionSpec {
        name: "str",
        min_args: 1,
        max_args: Some(1),
        signature: "str(v)",
        description: "Text form of a value",
        call: to_str,
    },
    FunctionSpec {
        name: "int",
        min_args: 1,
        max_args: Some(1),
        signature: "int(v)",
        description: "Convert a number, boolean or numeric string to an integer (truncating)",
        call: to_int,
    },
    FunctionSpec {
        name: "float",
        min_args: 1,
        max_args: Some(1),
        signature: "float(v)",
        description: "Convert a number or numeric string to a float",
        call: to_float,
    },
    FunctionSpec {
        name: "round",
        min_args: 1,
        max_args: Some(2),
        signature: "round(x[, digits])",
        description: "Round to `digits` decimals (default 0)",
        call: round,
    },
    FunctionSpec {
        name: "abs",
        min_args: 1,
        max_args: Some(1),
        signature: "abs(x)",
        description: "Absolute value",
        call: abs,
    },
    FunctionSpec {
        name: "min",
        min_args: 1,
        max_args: None,
        signature: "min(x1, x2, ...)",
        description: "Smallest number",
        call: min,
    },
    FunctionSpec {
        name: "max",
        min_args: 1,
        max_args: None,
        signature: "max(x1, x2, ...)",
        description: "Largest number",
        call: max,
    },
    FunctionSpec {
        name: "pad",
        min_args: 2,
        max_args: Some(3),
        signature: "pad(v, width[, fill])",
        description: "Left-pad the text form of v to `width` characters (fill defaults to '0')",
        call: pad,
    },
];

fn upper(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    Ok(Value::String(str_arg(args, 0, "argument")?.to_uppercase()))
}

fn lower(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    Ok(Value::String(str_arg(args, 0, "argument")?.to_lowercase()))
}

fn len(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let count = str_arg(args, 0, "argument")?.chars().count();
    Ok(Value::Integer(count as i64))
}

fn concat(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    Ok(Value::String(args.iter().map(|v| v.to_string()).collect()))
}

fn to_str(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    Ok(Value::String(args[0].to_string()))
}

fn to_int(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Integer(i) => Ok(Value::Integer(*i)),
        Value::Bool(b) => Ok(Value::Integer(i64::from(*b))),
        Value::Float(f) => float_to_int(*f),
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(Value::Integer(i));
            }
            match s.parse::<f64>() {
                Ok(f) => float_to_int(f),
                Err(_) => Err(format!("cannot convert '{s}' to an integer")),
            }
        }
        Value::Null => Err("cannot convert null to an integer".to_string()),
    }
}

fn float_to_int(f: f64) -> Result<Value, String> {
    let truncated = f.trunc();
    if !truncated.is_finite() || truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return Err(format!("{f} is out of integer range"));
    }
    Ok(Value::Integer(truncated as i64))
}

fn to_float(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::Float)
            .ok_or_else(|| format!("cannot convert '{s}' to a float")),
        other => other
            .as_f64()
            .map(Value::Float)
            .ok_or_else(|| format!("cannot convert {} to a float", other.type_name())),
    }
}

fn round(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let digits = if args.len() > 1 {
        int_arg(args, 1, "digits")?
    } else {
        0
    };
    if !(0..=15).contains(&digits) {
        return Err(format!("digits must be within 0..=15, got {digits}"));
    }
    match &args[0] {
        Value::Integer(i) => Ok(Value::Integer(*i)),
        _ => {
            let x = number_arg(args, 0, "x")?;
            let factor = 10f64.powi(digits as i32);
            let rounded = (x * factor).round() / factor;
            if digits == 0 {
                float_to_int(rounded)
            } else {
                Ok(Value::Float(rounded))
            }
        }
    }
}

fn abs(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    match &args[0] {
        Value::Integer(i) => i
            .checked_abs()
            .map(Value::Integer)
            .ok_or_else(|| format!("abs({i}) overflows")),
        _ => Ok(Value::Float(number_arg(args, 0, "x")?.abs())),
    }
}

fn min(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    extreme(args, |candidate: f64, best: f64| candidate < best)
}

fn max(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    extreme(args, |candidate: f64, best: f64| candidate > best)
}

/// Pick the argument preferred by `better`, keeping its original type.
fn extreme(args: &[Value], better: fn(f64, f64) -> bool) -> Result<Value, String> {
    let mut best = (number_arg(args, 0, "argument 1")?, &args[0]);
    for (i, value) in args.iter().enumerate().skip(1) {
        let n = number_arg(args, i, &format!("argument {}", i + 1))?;
        if better(n, best.0) {
            best = (n, value);
        }
    }
    Ok(best.1.clone())
}

fn pad(_rng: &mut dyn RngCore, args: &[Value]) -> Result<Value, String> {
    let text = args[0].to_string();
    let width = size_arg(args, 1, "width", MAX_PAD_WIDTH)?;
    let fill = if args.len() > 2 {
        let fill = str_arg(args, 2, "fill")?;
        let mut chars = fill.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(format!("fill must be a single character, got '{fill}'")),
        }
    } else {
        '0'
    };
    let current = text.chars().count();
    if current >= width {
        return Ok(Value::String(text));
    }
    let mut padded: String = std::iter::repeat(fill).take(width - current).collect();
    padded.push_str(&text);
    Ok(Value::String(padded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    fn call(f: super::super::FunctionImpl, args: &[Value]) -> Result<Value, String> {
        f(&mut StepRng::new(0, 1), args)
    }

    #[test]
    fn test_case_and_length() {
        assert_eq!(call(upper, &[Value::from("abc")]), Ok(Value::from("ABC")));
        assert_eq!(call(lower, &[Value::from("AbC")]), Ok(Value::from("abc")));
        assert_eq!(call(len, &[Value::from("héllo")]), Ok(Value::Integer(5)));
        assert!(call(upper, &[Value::Integer(1)]).is_err());
    }

    #[test]
    fn test_conversions() {
        assert_eq!(
            call(concat, &[Value::from("id-"), Value::Integer(7), Value::Bool(true)]),
            Ok(Value::from("id-7true"))
        );
        assert_eq!(call(to_str, &[Value::Float(2.0)]), Ok(Value::from("2.0")));
        assert_eq!(call(to_int, &[Value::from(" 42 ")]), Ok(Value::Integer(42)));
        assert_eq!(call(to_int, &[Value::Float(-3.9)]), Ok(Value::Integer(-3)));
        assert_eq!(call(to_int, &[Value::from("2.5")]), Ok(Value::Integer(2)));
        assert!(call(to_int, &[Value::from("abc")]).is_err());
        assert!(call(to_int, &[Value::Float(1e300)]).is_err());
        assert_eq!(call(to_float, &[Value::Integer(3)]), Ok(Value::Float(3.0)));
        assert_eq!(call(to_float, &[Value::from("1.25")]), Ok(Value::Float(1.25)));
        assert!(call(to_float, &[Value::Null]).is_err());
    }

    #[test]
    fn test_numeric_helpers() {
        assert_eq!(call(round, &[Value::Float(2.567), Value::Integer(2)]), Ok(Value::Float(2.57)));
        assert_eq!(call(round, &[Value::Float(2.5)]), Ok(Value::Integer(3)));
        assert_eq!(call(round, &[Value::Integer(9), Value::Integer(2)]), Ok(Value::Integer(9)));
        assert_eq!(call(abs, &[Value::Integer(-4)]), Ok(Value::Integer(4)));
        assert!(call(abs, &[Value::Integer(i64::MIN)]).is_err());
        assert_eq!(
            call(min, &[Value::Integer(3), Value::Float(1.5), Value::Integer(2)]),
            Ok(Value::Float(1.5))
        );
        assert_eq!(
            call(max, &[Value::Integer(3), Value::Float(1.5), Value::Integer(2)]),
            Ok(Value::Integer(3))
        );
    }

    #[test]
    fn test_pad() {
        assert_eq!(call(pad, &[Value::Integer(7), Value::Integer(3)]), Ok(Value::from("007")));
        assert_eq!(
            call(pad, &[Value::from("ab"), Value::Integer(4), Value::from("*")]),
            Ok(Value::from("**ab"))
        );
        assert_eq!(call(pad, &[Value::from("abcd"), Value::Integer(2)]), Ok(Value::from("abcd")));
        assert!(call(pad, &[Value::from("a"), Value::Integer(3), Value::from("xy")]).is_err());
    }
}
