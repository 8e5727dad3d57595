//! The closed function library callable from expressions.
//!
//! Every function is a plain `fn(&mut dyn RngCore, &[Value])` registered in a
//! static table with its arity. Names are resolved at compile time, so an
//! unknown name never reaches evaluation. Randomness comes exclusively from
//! the supplied rng; no function reads the wall clock.
//!
//! The table is versioned by [`FUNCTION_LIBRARY_VERSION`]. Adding a function is
//! backwards compatible; changing how an existing function consumes the rng
//! changes generated output for a fixed seed and bumps the version.

pub mod date;
pub mod faker;
pub mod random;
pub mod text;

use rand::RngCore;
use synth_core::Value;

/// Version of the function library.
pub const FUNCTION_LIBRARY_VERSION: u32 = 1;

/// Implementation signature shared by all library functions.
///
/// Errors are plain messages; the evaluator wraps them with the function name.
pub type FunctionImpl = fn(&mut dyn RngCore, &[Value]) -> Result<Value, String>;

/// One entry of the function library.
#[derive(Debug)]
pub struct FunctionSpec {
    /// Fully qualified name, e.g. `random.int`
    pub name: &'static str,
    /// Minimum number of arguments
    pub min_args: usize,
    /// Maximum number of arguments, `None` for variadic functions
    pub max_args: Option<usize>,
    /// Human-readable signature
    pub signature: &'static str,
    /// One-line description
    pub description: &'static str,
    /// Implementation
    pub call: FunctionImpl,
}

impl FunctionSpec {
    /// Whether `count` arguments satisfy this function's arity.
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_args && self.max_args.map_or(true, |max| count <= max)
    }

    /// Arity description used in error messages, e.g. `2`, `1..=2`, `at least 1`.
    pub fn arity(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{}..={}", self.min_args, max),
            None => format!("at least {}", self.min_args),
        }
    }
}

/// Iterate over every function in the library, grouped by namespace.
pub fn library() -> impl Iterator<Item = &'static FunctionSpec> {
    random::FUNCTIONS
        .iter()
        .chain(date::FUNCTIONS)
        .chain(faker::FUNCTIONS)
        .chain(text::FUNCTIONS)
}

/// Look up a function by its fully qualified name.
pub fn lookup(name: &str) -> Option<&'static FunctionSpec> {
    library().find(|spec| spec.name == name)
}

pub(crate) fn int_arg(args: &[Value], index: usize, what: &str) -> Result<i64, String> {
    match args.get(index) {
        Some(Value::Integer(i)) => Ok(*i),
        Some(Value::Float(f)) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(*f as i64),
        Some(other) => Err(format!(
            "{what} must be an integer, got {}",
            other.type_name()
        )),
        None => Err(format!("missing {what}")),
    }
}

pub(crate) fn number_arg(args: &[Value], index: usize, what: &str) -> Result<f64, String> {
    match args.get(index) {
        Some(value) => value
            .as_f64()
            .ok_or_else(|| format!("{what} must be a number, got {}", value.type_name())),
        None => Err(format!("missing {what}")),
    }
}

pub(crate) fn str_arg<'a>(args: &'a [Value], index: usize, what: &str) -> Result<&'a str, String> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(format!("{what} must be a string, got {}", other.type_name())),
        None => Err(format!("missing {what}")),
    }
}

/// Non-negative size argument (lengths, counts, day spans).
pub(crate) fn size_arg(args: &[Value], index: usize, what: &str, limit: usize) -> Result<usize, String> {
    let n = int_arg(args, index, what)?;
    let n = usize::try_from(n).map_err(|_| format!("{what} must not be negative, got {n}"))?;
    if n > limit {
        return Err(format!("{what} must be at most {limit}, got {n}"));
    }
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let mut seen = HashSet::new();
        for spec in library() {
            assert!(seen.insert(spec.name), "duplicate function {}", spec.name);
            if let Some(max) = spec.max_args {
                assert!(max >= spec.min_args, "bad arity for {}", spec.name);
            }
        }
    }

    #[test]
    fn test_lookup_and_arity() {
        let spec = lookup("random.int").unwrap();
        assert!(spec.accepts(2));
        assert!(!spec.accepts(1));
        assert_eq!(spec.arity(), "2");

        assert_eq!(lookup("random.bool").unwrap().arity(), "0..=1");
        assert_eq!(lookup("random.choice").unwrap().arity(), "at least 1");
        assert!(lookup("random.nope").is_none());
    }

    #[test]
    fn test_argument_helpers() {
        let args = vec![Value::Integer(3), Value::Float(2.0), Value::from("x")];
        assert_eq!(int_arg(&args, 0, "n"), Ok(3));
        assert_eq!(int_arg(&args, 1, "n"), Ok(2));
        assert!(int_arg(&args, 2, "n").is_err());
        assert_eq!(number_arg(&args, 0, "n"), Ok(3.0));
        assert_eq!(str_arg(&args, 2, "s"), Ok("x"));
        assert!(size_arg(&[Value::Integer(-1)], 0, "len", 10).is_err());
        assert!(size_arg(&[Value::Integer(11)], 0, "len", 10).is_err());
    }
}
