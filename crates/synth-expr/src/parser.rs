//! Recursive-descent parser.
//!
//! Precedence, lowest first:
//!
//! ```text
//! ?:            (right associative)
//! ||
//! &&
//! == !=
//! < <= > >=
//! + -
//! * / %
//! - !           (unary)
//! ```
//!
//! Function names and arities are resolved here, so evaluation never sees an
//! unknown function.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::{ExpressionError, Position};
use crate::functions;
use crate::lexer::{Token, TokenKind};
use synth_core::Value;

/// Deepest accepted nesting of parentheses, calls, operators and branches.
pub const MAX_NESTING_DEPTH: usize = 64;

/// Parse a token stream (ending in [`TokenKind::Eof`]) into one expression.
pub fn parse(tokens: &[Token]) -> Result<Expr, ExpressionError> {
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.expression()?;
    let trailing = parser.peek();
    if trailing.kind != TokenKind::Eof {
        return Err(ExpressionError::syntax(
            trailing.position,
            format!("unexpected '{}' after end of expression", trailing.kind),
        ));
    }
    Ok(expr)
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    depth: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> &'t Token {
        // The lexer always terminates the stream with Eof.
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn peek_at(&self, offset: usize) -> Option<&'t Token> {
        self.tokens.get(self.pos + offset)
    }

    fn advance(&mut self) -> &'t Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, context: &str) -> Result<&'t Token, ExpressionError> {
        let token = self.peek();
        if token.kind == kind {
            Ok(self.advance())
        } else {
            Err(ExpressionError::syntax(
                token.position,
                format!("expected '{kind}' {context}, found '{}'", token.kind),
            ))
        }
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ExpressionError>,
    ) -> Result<T, ExpressionError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ExpressionError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                position: self.peek().position,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn expression(&mut self) -> Result<Expr, ExpressionError> {
        self.nested(Self::conditional)
    }

    fn conditional(&mut self) -> Result<Expr, ExpressionError> {
        let condition = self.or()?;
        if !self.eat(&TokenKind::Question) {
            return Ok(condition);
        }
        let then_branch = self.expression()?;
        self.expect(TokenKind::Colon, "in conditional expression")?;
        let else_branch = self.expression()?;
        Ok(Expr::Conditional {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn binary_level(
        &mut self,
        next: fn(&mut Self) -> Result<Expr, ExpressionError>,
        operator: fn(&TokenKind) -> Option<BinaryOp>,
    ) -> Result<Expr, ExpressionError> {
        let mut left = next(self)?;
        while let Some(op) = operator(&self.peek().kind) {
            self.advance();
            let right = next(self)?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn or(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(Self::and, |kind| {
            matches!(kind, TokenKind::OrOr).then_some(BinaryOp::Or)
        })
    }

    fn and(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(Self::equality, |kind| {
            matches!(kind, TokenKind::AndAnd).then_some(BinaryOp::And)
        })
    }

    fn equality(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(Self::comparison, |kind| match kind {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::Ne),
            _ => None,
        })
    }

    fn comparison(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(Self::additive, |kind| match kind {
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Le => Some(BinaryOp::Le),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Ge => Some(BinaryOp::Ge),
            _ => None,
        })
    }

    fn additive(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(Self::multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn multiplicative(&mut self) -> Result<Expr, ExpressionError> {
        self.binary_level(Self::unary, |kind| match kind {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Rem),
            _ => None,
        })
    }

    fn unary(&mut self) -> Result<Expr, ExpressionError> {
        let op = match self.peek().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.primary(),
        };
        self.advance();
        let operand = self.nested(Self::unary)?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn primary(&mut self) -> Result<Expr, ExpressionError> {
        let token = self.advance();
        match &token.kind {
            TokenKind::Integer(i) => Ok(Expr::Literal(Value::Integer(*i))),
            TokenKind::Float(f) => Ok(Expr::Literal(Value::Float(*f))),
            TokenKind::Str(s) => Ok(Expr::Literal(Value::String(s.clone()))),
            TokenKind::True => Ok(Expr::Literal(Value::Bool(true))),
            TokenKind::False => Ok(Expr::Literal(Value::Bool(false))),
            TokenKind::Null => Ok(Expr::Literal(Value::Null)),
            TokenKind::LParen => {
                let inner = self.expression()?;
                self.expect(TokenKind::RParen, "to close '('")?;
                Ok(inner)
            }
            TokenKind::LBracket => Err(ExpressionError::syntax(
                token.position,
                "list literals are only allowed as function arguments",
            )),
            TokenKind::Ident(first) => self.name(first, token.position),
            TokenKind::Eof => Err(ExpressionError::syntax(
                token.position,
                "unexpected end of expression",
            )),
            other => Err(ExpressionError::syntax(
                token.position,
                format!("unexpected '{other}'"),
            )),
        }
    }

    /// Dotted name: variable, `row.<field>`, or function reference.
    fn name(&mut self, first: &str, position: Position) -> Result<Expr, ExpressionError> {
        let mut path = first.to_string();
        while self.peek().kind == TokenKind::Dot {
            match self.peek_at(1).map(|t| &t.kind) {
                Some(TokenKind::Ident(segment)) => {
                    path.push('.');
                    path.push_str(segment);
                    self.pos += 2;
                }
                _ => {
                    let dot = self.peek();
                    return Err(ExpressionError::syntax(
                        dot.position,
                        "expected a name after '.'",
                    ));
                }
            }
        }

        if path == "record_index" {
            return Ok(Expr::RecordIndex);
        }
        if let Some(field) = path.strip_prefix("row.") {
            if field.contains('.') {
                return Err(ExpressionError::syntax(
                    position,
                    format!("'{path}' is not a valid field reference; use row.<field>"),
                ));
            }
            return Ok(Expr::Field(field.to_string()));
        }
        if path == "row" {
            return Err(ExpressionError::syntax(
                position,
                "'row' must be followed by a field name, e.g. row.age",
            ));
        }

        let called = self.eat(&TokenKind::LParen);
        let Some(function) = functions::lookup(&path) else {
            return Err(if called || path.contains('.') {
                ExpressionError::UnknownFunction {
                    name: path,
                    position,
                }
            } else {
                ExpressionError::UnknownIdentifier {
                    name: path,
                    position,
                }
            });
        };

        let args = if called {
            self.nested(Self::arguments)?
        } else {
            Vec::new()
        };
        if !function.accepts(args.len()) {
            return Err(ExpressionError::Arity {
                name: path,
                expected: function.arity(),
                found: args.len(),
                position,
            });
        }
        Ok(Expr::Call { function, args })
    }

    /// Argument list after '('. List literals are spliced into the list.
    fn arguments(&mut self) -> Result<Vec<Expr>, ExpressionError> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            if self.eat(&TokenKind::LBracket) {
                if !self.eat(&TokenKind::RBracket) {
                    loop {
                        args.push(self.expression()?);
                        if !self.eat(&TokenKind::Comma) {
                            break;
                        }
                    }
                    self.expect(TokenKind::RBracket, "to close list literal")?;
                }
            } else {
                args.push(self.expression()?);
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(TokenKind::RParen, "to close argument list")?;
        Ok(args)
    }
}
