//! Tokenizer for the expression language.

use crate::error::{ExpressionError, Position};
use std::fmt;

/// Token kinds produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Integer(i64),
    Float(f64),
    Str(String),
    Ident(String),
    True,
    False,
    Null,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    NotEq,
    Lt,
    Le,
    Gt,
    Ge,
    AndAnd,
    OrOr,
    Bang,
    Question,
    Colon,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s:?}"),
            Self::Ident(name) => write!(f, "{name}"),
            Self::True => write!(f, "true"),
            Self::False => write!(f, "false"),
            Self::Null => write!(f, "null"),
            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Percent => write!(f, "%"),
            Self::EqEq => write!(f, "=="),
            Self::NotEq => write!(f, "!="),
            Self::Lt => write!(f, "<"),
            Self::Le => write!(f, "<="),
            Self::Gt => write!(f, ">"),
            Self::Ge => write!(f, ">="),
            Self::AndAnd => write!(f, "&&"),
            Self::OrOr => write!(f, "||"),
            Self::Bang => write!(f, "!"),
            Self::Question => write!(f, "?"),
            Self::Colon => write!(f, ":"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::LBracket => write!(f, "["),
            Self::RBracket => write!(f, "]"),
            Self::Comma => write!(f, ","),
            Self::Dot => write!(f, "."),
            Self::Eof => write!(f, "end of input"),
        }
    }
}

/// A token with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: Position,
}

/// Split `source` into tokens. The result always ends with [`TokenKind::Eof`].
pub fn tokenize(source: &str) -> Result<Vec<Token>, ExpressionError> {
    Lexer::new(source).run()
}

struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.chars.peek() == Some(&expected) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn run(mut self) -> Result<Vec<Token>, ExpressionError> {
        let mut tokens = Vec::new();
        loop {
            while self.chars.peek().is_some_and(|c| c.is_whitespace()) {
                self.bump();
            }
            let position = self.position();
            let Some(c) = self.bump() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    position,
                });
                return Ok(tokens);
            };

            let kind = match c {
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '%' => TokenKind::Percent,
                '?' => TokenKind::Question,
                ':' => TokenKind::Colon,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                '[' => TokenKind::LBracket,
                ']' => TokenKind::RBracket,
                ',' => TokenKind::Comma,
                '.' => TokenKind::Dot,
                '=' if self.eat('=') => TokenKind::EqEq,
                '!' if self.eat('=') => TokenKind::NotEq,
                '!' => TokenKind::Bang,
                '<' if self.eat('=') => TokenKind::Le,
                '<' => TokenKind::Lt,
                '>' if self.eat('=') => TokenKind::Ge,
                '>' => TokenKind::Gt,
                '&' if self.eat('&') => TokenKind::AndAnd,
                '|' if self.eat('|') => TokenKind::OrOr,
                '\'' | '"' => self.string(c, position)?,
                c if c.is_ascii_digit() => self.number(c, position)?,
                c if c.is_alphabetic() || c == '_' => self.ident(c),
                '=' => {
                    return Err(ExpressionError::syntax(
                        position,
                        "unexpected '='; use '==' for comparison",
                    ))
                }
                other => {
                    return Err(ExpressionError::syntax(
                        position,
                        format!("unexpected character '{other}'"),
                    ))
                }
            };
            tokens.push(Token { kind, position });
        }
    }

    fn string(&mut self, quote: char, start: Position) -> Result<TokenKind, ExpressionError> {
        let mut value = String::new();
        loop {
            let escape_pos = self.position();
            match self.bump() {
                None => return Err(ExpressionError::syntax(start, "unterminated string literal")),
                Some(c) if c == quote => return Ok(TokenKind::Str(value)),
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some(c @ ('\\' | '\'' | '"')) => value.push(c),
                    Some(other) => {
                        return Err(ExpressionError::syntax(
                            escape_pos,
                            format!("unknown escape sequence '\\{other}'"),
                        ))
                    }
                    None => {
                        return Err(ExpressionError::syntax(start, "unterminated string literal"))
                    }
                },
                Some(c) => value.push(c),
            }
        }
    }

    fn number(&mut self, first: char, start: Position) -> Result<TokenKind, ExpressionError> {
        let mut text = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.bump();
        }

        // A '.' only continues the number when a digit follows it.
        let mut lookahead = self.chars.clone();
        let is_fraction =
            lookahead.next() == Some('.') && lookahead.next().is_some_and(|c| c.is_ascii_digit());
        if !is_fraction {
            return text.parse().map(TokenKind::Integer).map_err(|_| {
                ExpressionError::syntax(start, format!("integer literal {text} is out of range"))
            });
        }

        self.bump();
        text.push('.');
        while let Some(&c) = self.chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.bump();
        }
        text.parse()
            .map(TokenKind::Float)
            .map_err(|_| ExpressionError::syntax(start, format!("invalid number '{text}'")))
    }

    fn ident(&mut self, first: char) -> TokenKind {
        let mut name = String::from(first);
        while let Some(&c) = self.chars.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            self.bump();
        }
        match name.as_str() {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "null" => TokenKind::Null,
            _ => TokenKind::Ident(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_operators_and_literals() {
        assert_eq!(
            kinds("1 + 2.5 * x >= 'a' && !true"),
            vec![
                TokenKind::Integer(1),
                TokenKind::Plus,
                TokenKind::Float(2.5),
                TokenKind::Star,
                TokenKind::Ident("x".to_string()),
                TokenKind::Ge,
                TokenKind::Str("a".to_string()),
                TokenKind::AndAnd,
                TokenKind::Bang,
                TokenKind::True,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_dotted_names_stay_separate_tokens() {
        assert_eq!(
            kinds("faker.name"),
            vec![
                TokenKind::Ident("faker".to_string()),
                TokenKind::Dot,
                TokenKind::Ident("name".to_string()),
                TokenKind::Eof,
            ]
        );
        // "1." is an integer followed by a dot
        assert_eq!(
            kinds("1.x"),
            vec![
                TokenKind::Integer(1),
                TokenKind::Dot,
                TokenKind::Ident("x".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\n" 'it\'s'"#),
            vec![
                TokenKind::Str("a\"b\n".to_string()),
                TokenKind::Str("it's".to_string()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens = tokenize("1 +\n  foo").unwrap();
        assert_eq!(tokens[0].position, Position::new(1, 1));
        assert_eq!(tokens[1].position, Position::new(1, 3));
        assert_eq!(tokens[2].position, Position::new(2, 3));
    }

    #[test]
    fn test_lex_errors() {
        let err = tokenize("1 + #").unwrap_err();
        assert_eq!(err.position(), Some(Position::new(1, 5)));

        let err = tokenize("'open").unwrap_err();
        assert_eq!(err.position(), Some(Position::new(1, 1)));

        let err = tokenize("a = 1").unwrap_err();
        assert!(err.to_string().contains("'=='"));

        let err = tokenize("99999999999999999999").unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
