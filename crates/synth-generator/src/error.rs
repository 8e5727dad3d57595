//! Error type for registry and generator operations.

use serde::Serialize;
use synth_core::{ConfigurationError, SchemaError};
use synth_expr::ExpressionError;

/// Top-level error category, one per failure family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    Schema,
    Configuration,
    Expression,
}

/// Error type for generator operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeneratorError {
    /// Malformed or unsupported schema document
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Invalid request, detected before any record is generated
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// Expression failed to compile or evaluate
    #[error("{}", describe_expression(.field, .custom_type, .record_index, .source))]
    Expression {
        /// Field being generated, if any
        field: Option<String>,
        /// Custom type the expression came from, if any
        custom_type: Option<String>,
        /// Record being generated; `None` for compile-time failures
        record_index: Option<u64>,
        #[source]
        source: ExpressionError,
    },
}

fn describe_expression(
    field: &Option<String>,
    custom_type: &Option<String>,
    record_index: &Option<u64>,
    source: &ExpressionError,
) -> String {
    let mut location = Vec::new();
    if let Some(field) = field {
        location.push(format!("field '{field}'"));
    }
    if let Some(custom_type) = custom_type {
        location.push(format!("custom type '{custom_type}'"));
    }
    if let Some(index) = record_index {
        location.push(format!("record {index}"));
    }
    if location.is_empty() {
        format!("Expression error: {source}")
    } else {
        format!("Expression error in {}: {source}", location.join(", "))
    }
}

impl GeneratorError {
    /// Failure family.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Schema(_) => ErrorCategory::Schema,
            Self::Configuration(_) => ErrorCategory::Configuration,
            Self::Expression { .. } => ErrorCategory::Expression,
        }
    }

    /// Field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Configuration(e) => e.field(),
            Self::Expression { field, .. } => field.as_deref(),
            Self::Schema(_) => None,
        }
    }

    /// Record index at which generation failed, if any.
    pub fn record_index(&self) -> Option<u64> {
        match self {
            Self::Expression { record_index, .. } => *record_index,
            _ => None,
        }
    }

    /// The underlying expression error, if any.
    pub fn expression_error(&self) -> Option<&ExpressionError> {
        match self {
            Self::Expression { source, .. } => Some(source),
            _ => None,
        }
    }

    pub(crate) fn expression(
        field: Option<&str>,
        custom_type: Option<&str>,
        record_index: Option<u64>,
        source: ExpressionError,
    ) -> Self {
        Self::Expression {
            field: field.map(str::to_string),
            custom_type: custom_type.map(str::to_string),
            record_index,
            source,
        }
    }
}
