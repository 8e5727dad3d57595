//! Error types shared by the introspector and the generator.

use crate::types::SchemaDialect;
use serde::Serialize;
use std::fmt;

/// Machine-readable category of a [`SchemaError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaErrorKind {
    /// Document is not valid UTF-8
    Encoding,
    /// Document is not well-formed JSON or XML
    Syntax,
    /// Root is not an object / not an `<xs:schema>` element
    UnsupportedRoot,
    /// No record structure (properties, complexType/sequence) could be found
    MissingStructure,
    /// A property or element definition has an invalid shape
    InvalidDefinition,
    /// Two top-level elements share a name
    DuplicateElement,
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Encoding => "encoding",
            Self::Syntax => "syntax",
            Self::UnsupportedRoot => "unsupported_root",
            Self::MissingStructure => "missing_structure",
            Self::InvalidDefinition => "invalid_definition",
            Self::DuplicateElement => "duplicate_element",
        };
        f.write_str(name)
    }
}

/// Malformed or unsupported schema document.
///
/// Every parser-level failure is normalized into this type; the `location` is a
/// JSON pointer for the JSON dialect and `line X, column Y` or an element path
/// for the XML dialect.
#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize)]
#[error("{dialect} schema error ({kind}) at {location}: {message}")]
pub struct SchemaError {
    /// Dialect the document was parsed as
    pub dialect: SchemaDialect,
    /// Error category
    pub kind: SchemaErrorKind,
    /// Human-readable location hint
    pub location: String,
    /// Description of the problem
    pub message: String,
}

impl SchemaError {
    /// Create a new schema error.
    pub fn new(
        dialect: SchemaDialect,
        kind: SchemaErrorKind,
        location: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            dialect,
            kind,
            location: location.into(),
            message: message.into(),
        }
    }
}

/// Machine-readable category of a [`ConfigurationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationErrorKind {
    EmptyFieldName,
    DuplicateField,
    UnresolvedDataType,
    InvalidCount,
    CountLimitExceeded,
    InvalidConstraint,
    UnknownFieldReference,
    InvalidCustomTypeName,
    InvalidConfigFile,
}

/// Invalid generation request or configuration.
///
/// Raised during validation, before any record is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigurationError {
    /// A field definition has an empty name
    #[error("Field at position {position} has an empty name")]
    EmptyFieldName { position: usize },

    /// Two field definitions share a name
    #[error("Duplicate field name: '{0}'")]
    DuplicateField(String),

    /// `data_type` is neither a builtin nor a registered custom type
    #[error("Field '{field}' has unresolved data type '{data_type}'")]
    UnresolvedDataType { field: String, data_type: String },

    /// Negative record count
    #[error("Invalid record count {0}: count must be >= 0")]
    InvalidCount(i64),

    /// Record count above the configured ceiling
    #[error("Record count {count} exceeds the configured maximum of {max}")]
    CountLimitExceeded { count: i64, max: u64 },

    /// Contradictory or unsupported field constraints
    #[error("Field '{field}' has an invalid constraint: {message}")]
    InvalidConstraint { field: String, message: String },

    /// An expression reads `row.<name>` for a field not generated before it
    #[error("Field '{field}' references field '{reference}' which is not defined before it")]
    UnknownFieldReference { field: String, reference: String },

    /// A custom type name is empty or has surrounding whitespace
    #[error("Invalid custom type name: '{0}'")]
    InvalidCustomTypeName(String),

    /// A configuration file could not be read or parsed
    #[error("Invalid configuration: {0}")]
    InvalidConfigFile(String),
}

impl ConfigurationError {
    /// Machine-readable kind.
    pub fn kind(&self) -> ConfigurationErrorKind {
        match self {
            Self::EmptyFieldName { .. } => ConfigurationErrorKind::EmptyFieldName,
            Self::DuplicateField(_) => ConfigurationErrorKind::DuplicateField,
            Self::UnresolvedDataType { .. } => ConfigurationErrorKind::UnresolvedDataType,
            Self::InvalidCount(_) => ConfigurationErrorKind::InvalidCount,
            Self::CountLimitExceeded { .. } => ConfigurationErrorKind::CountLimitExceeded,
            Self::InvalidConstraint { .. } => ConfigurationErrorKind::InvalidConstraint,
            Self::UnknownFieldReference { .. } => ConfigurationErrorKind::UnknownFieldReference,
            Self::InvalidCustomTypeName(_) => ConfigurationErrorKind::InvalidCustomTypeName,
            Self::InvalidConfigFile(_) => ConfigurationErrorKind::InvalidConfigFile,
        }
    }

    /// Field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::DuplicateField(field) => Some(field),
            Self::UnresolvedDataType { field, .. }
            | Self::InvalidConstraint { field, .. }
            | Self::UnknownFieldReference { field, .. } => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::new(
            SchemaDialect::Json,
            SchemaErrorKind::InvalidDefinition,
            "/properties/age",
            "property definition must be an object",
        );
        assert_eq!(
            err.to_string(),
            "json schema error (invalid_definition) at /properties/age: property definition must be an object"
        );
    }

    #[test]
    fn test_configuration_error_kind_and_field() {
        let err = ConfigurationError::UnresolvedDataType {
            field: "status".to_string(),
            data_type: "mood".to_string(),
        };
        assert_eq!(err.kind(), ConfigurationErrorKind::UnresolvedDataType);
        assert_eq!(err.field(), Some("status"));
        assert_eq!(ConfigurationError::InvalidCount(-1).field(), None);
    }
}
