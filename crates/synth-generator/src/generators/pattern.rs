//! Pattern-template string generator.
//!
//! A pattern is literal text with a few generators mixed in:
//! - `\d` - one random digit
//! - `\d{N}` - N random digits
//! - `{index}` - record index
//! - `{rand:N}` - random N-digit number (no leading zero)
//! - `{uuid}` - random UUID
//!
//! A leading `^` and trailing `$` are ignored so that anchored schema
//! patterns such as `^\d{5}$` can be used as-is. `\` escapes any other
//! punctuation character. Remaining regex syntax (classes, groups,
//! quantifiers, alternation) is rejected when the pattern is parsed.

use rand::Rng;
use synth_expr::functions::random::uuid_from_rng;

/// Largest digit run accepted in `\d{N}` and `{rand:N}`.
pub const MAX_DIGITS: usize = 1000;

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Digits(usize),
    RandomNumber(usize),
    Index,
    Uuid,
}

/// A parsed pattern template.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parse a pattern template.
    pub fn parse(pattern: &str) -> Result<Self, String> {
        let body = pattern.strip_prefix('^').unwrap_or(pattern);
        let body = match body.strip_suffix('$') {
            Some(stripped) if !stripped.ends_with('\\') => stripped,
            _ => body,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = body.char_indices().peekable();

        while let Some((pos, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, 'd')) => {
                        let mut count = 1;
                        if chars.peek().map(|&(_, c)| c) == Some('{') {
                            let rest = &body[pos + 2..];
                            let (n, consumed) = braced_count(rest)
                                .ok_or_else(|| format!("invalid repetition after \\d at {pos}"))?;
                            count = n;
                            for _ in 0..consumed {
                                chars.next();
                            }
                        }
                        flush(&mut literal, &mut segments);
                        segments.push(Segment::Digits(count));
                    }
                    Some((_, escaped)) if escaped.is_ascii_punctuation() => literal.push(escaped),
                    Some((_, other)) => {
                        return Err(format!("unsupported escape '\\{other}' at {pos}"));
                    }
                    None => return Err("pattern ends with '\\'".to_string()),
                },
                '{' => {
                    let rest = &body[pos..];
                    let end = rest
                        .find('}')
                        .ok_or_else(|| format!("unclosed '{{' at {pos}"))?;
                    let placeholder = &rest[1..end];
                    let segment = match placeholder {
                        "index" => Segment::Index,
                        "uuid" => Segment::Uuid,
                        _ => match placeholder.strip_prefix("rand:") {
                            Some(n) => Segment::RandomNumber(digit_count(n).ok_or_else(|| {
                                format!("invalid digit count in '{{{placeholder}}}'")
                            })?),
                            None => {
                                return Err(format!("unknown placeholder '{{{placeholder}}}'"));
                            }
                        },
                    };
                    for _ in 0..placeholder.chars().count() + 1 {
                        chars.next();
                    }
                    flush(&mut literal, &mut segments);
                    segments.push(segment);
                }
                '[' | ']' | '(' | ')' | '*' | '+' | '?' | '|' | '}' => {
                    return Err(format!("unsupported pattern syntax '{c}' at {pos}"));
                }
                other => literal.push(other),
            }
        }
        flush(&mut literal, &mut segments);
        Ok(Self { segments })
    }

    /// Render the pattern for one record.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, index: u64) -> String {
        let mut result = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => result.push_str(text),
                Segment::Digits(n) => {
                    for _ in 0..*n {
                        result.push(digit(rng.gen_range(0..10)));
                    }
                }
                Segment::RandomNumber(n) => result.push_str(&generate_random_digits(rng, *n)),
                Segment::Index => result.push_str(&index.to_string()),
                Segment::Uuid => result.push_str(&uuid_from_rng(rng).to_string()),
            }
        }
        result
    }
}

fn flush(literal: &mut String, segments: &mut Vec<Segment>) {
    if !literal.is_empty() {
        segments.push(Segment::Literal(std::mem::take(literal)));
    }
}

/// Parse `{N}` at the start of `rest`; returns N and the chars consumed.
fn braced_count(rest: &str) -> Option<(usize, usize)> {
    let inner = rest.strip_prefix('{')?;
    let end = inner.find('}')?;
    let n = digit_count(&inner[..end])?;
    Some((n, end + 2))
}

fn digit_count(s: &str) -> Option<usize> {
    let n: usize = s.trim().parse().ok()?;
    (n <= MAX_DIGITS).then_some(n)
}

fn digit(d: u32) -> char {
    char::from_digit(d, 10).unwrap_or('0')
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng + ?Sized>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // First digit should be 1-9 to avoid leading zeros
    result.push(digit(rng.gen_range(1..10)));

    // Remaining digits can be 0-9
    for _ in 1..digits {
        result.push(digit(rng.gen_range(0..10)));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn render(pattern: &str, index: u64) -> String {
        let mut rng = StdRng::seed_from_u64(42);
        Pattern::parse(pattern).unwrap().generate(&mut rng, index)
    }

    #[test]
    fn test_generate_pattern_index() {
        assert_eq!(render("user_{index}@example.com", 123), "user_123@example.com");
    }

    #[test]
    fn test_generate_pattern_uuid() {
        let s = render("id-{uuid}", 0);
        assert!(s.starts_with("id-"));
        assert_eq!(s.len(), 3 + 36); // "id-" + UUID
        assert_eq!(s, render("id-{uuid}", 0));
    }

    #[test]
    fn test_generate_pattern_random_digits() {
        let s = render("code-{rand:6}", 0);
        assert!(s.starts_with("code-"));
        assert_eq!(s.len(), 5 + 6); // "code-" + 6 digits
        let random_part = &s[5..];
        assert!(random_part.chars().all(|c| c.is_ascii_digit()));
        assert_ne!(&random_part[..1], "0");
    }

    #[test]
    fn test_generate_pattern_multiple_placeholders() {
        let s = render("user_{index}_code_{rand:4}", 42);
        assert!(s.starts_with("user_42_code_"));
        // Total length: "user_42_code_" (13) + 4 digits
        assert_eq!(s.len(), 13 + 4);
    }

    #[test]
    fn test_digit_classes_and_anchors() {
        let s = render(r"^\d{5}$", 0);
        assert_eq!(s.len(), 5);
        assert!(s.chars().all(|c| c.is_ascii_digit()));

        let s = render(r"\d\d-\d{3}\.x", 0);
        assert_eq!(s.len(), "00-000.x".len());
        assert_eq!(&s[2..3], "-");
        assert!(s.ends_with(".x"));
    }

    #[test]
    fn test_unsupported_syntax_is_rejected() {
        for pattern in ["[A-Z]{3}", "a+", "(ab)", "a|b", r"\w", "{name}", "{rand:x}", "{index", r"\d{2"] {
            assert!(Pattern::parse(pattern).is_err(), "{pattern} should be rejected");
        }
    }
}
