//! Expression errors.
//!
//! Compile-time errors carry the [`Position`] of the offending token.
//! Evaluation errors carry the operator or function that failed.

use serde::Serialize;
use std::fmt;

/// A 1-based line/column position in expression source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Machine-readable expression error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionErrorKind {
    Syntax,
    UnknownFunction,
    UnknownIdentifier,
    Arity,
    TooLong,
    TooDeep,
    DivisionByZero,
    Overflow,
    Type,
    Function,
    FieldUnavailable,
}

/// Error compiling or evaluating an expression.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
    /// Unexpected or malformed token
    #[error("Syntax error at {position}: {message}")]
    Syntax { position: Position, message: String },

    /// Call to a name missing from the function library
    #[error("Unknown function '{name}' at {position}")]
    UnknownFunction { name: String, position: Position },

    /// Bare identifier that is neither a variable nor a zero-argument function
    #[error("Unknown identifier '{name}' at {position}")]
    UnknownIdentifier { name: String, position: Position },

    /// Wrong number of arguments for a library function
    #[error("Function '{name}' at {position} expects {expected} argument(s), got {found}")]
    Arity {
        name: String,
        expected: String,
        found: usize,
        position: Position,
    },

    /// Source longer than the accepted maximum
    #[error("Expression is {length} bytes long; the maximum is {limit}")]
    TooLong { length: usize, limit: usize },

    /// Nesting deeper than the accepted maximum
    #[error("Expression nesting exceeds {limit} levels at {position}")]
    TooDeep { limit: usize, position: Position },

    /// `/` or `%` with a zero divisor
    #[error("Division by zero in '{operator}'")]
    DivisionByZero { operator: String },

    /// Integer overflow or non-finite float result
    #[error("Numeric overflow in '{operator}'")]
    Overflow { operator: String },

    /// Operand of the wrong type
    #[error("Type error in '{operator}': {message}")]
    Type { operator: String, message: String },

    /// A library function rejected its arguments
    #[error("Function '{function}' failed: {message}")]
    Function { function: String, message: String },

    /// `row.<field>` read outside a record, or before the field was generated
    #[error("Field '{field}' is not available in this context")]
    FieldUnavailable { field: String },
}

impl ExpressionError {
    /// Machine-readable kind.
    pub fn kind(&self) -> ExpressionErrorKind {
        match self {
            Self::Syntax { .. } => ExpressionErrorKind::Syntax,
            Self::UnknownFunction { .. } => ExpressionErrorKind::UnknownFunction,
            Self::UnknownIdentifier { .. } => ExpressionErrorKind::UnknownIdentifier,
            Self::Arity { .. } => ExpressionErrorKind::Arity,
            Self::TooLong { .. } => ExpressionErrorKind::TooLong,
            Self::TooDeep { .. } => ExpressionErrorKind::TooDeep,
            Self::DivisionByZero { .. } => ExpressionErrorKind::DivisionByZero,
            Self::Overflow { .. } => ExpressionErrorKind::Overflow,
            Self::Type { .. } => ExpressionErrorKind::Type,
            Self::Function { .. } => ExpressionErrorKind::Function,
            Self::FieldUnavailable { .. } => ExpressionErrorKind::FieldUnavailable,
        }
    }

    /// Whether the error was raised while compiling rather than evaluating.
    pub fn is_compile_error(&self) -> bool {
        matches!(
            self.kind(),
            ExpressionErrorKind::Syntax
                | ExpressionErrorKind::UnknownFunction
                | ExpressionErrorKind::UnknownIdentifier
                | ExpressionErrorKind::Arity
                | ExpressionErrorKind::TooLong
                | ExpressionErrorKind::TooDeep
        )
    }

    /// Source position for compile errors.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Syntax { position, .. }
            | Self::UnknownFunction { position, .. }
            | Self::UnknownIdentifier { position, .. }
            | Self::Arity { position, .. }
            | Self::TooDeep { position, .. } => Some(*position),
            _ => None,
        }
    }

    pub(crate) fn syntax(position: Position, message: impl Into<String>) -> Self {
        Self::Syntax {
            position,
            message: message.into(),
        }
    }

    pub(crate) fn type_error(operator: &str, message: impl Into<String>) -> Self {
        Self::Type {
            operator: operator.to_string(),
            message: message.into(),
        }
    }
}
