//! Schema introspection for synthgen.
//!
//! Turns a schema document into an ordered list of canonical
//! [`SchemaElement`]s. Two dialects are supported, each behind the common
//! [`Introspector`] trait:
//!
//! - [`JsonSchemaIntrospector`] - JSON-Schema-like objects (`properties`, `required`)
//! - [`XsdIntrospector`] - XML Schema Definitions (`complexType/sequence`)
//!
//! The dialect is always chosen by the caller; documents are never sniffed.
//! Every parser-level failure is reported as a [`SchemaError`].
//!
//! # Example
//!
//! ```rust
//! use schema_introspect::introspect;
//! use synth_core::{ElementType, SchemaDialect};
//!
//! let doc = br#"{
//!   "type": "object",
//!   "properties": {
//!     "id": {"type": "integer"},
//!     "email": {"type": "string", "description": "Contact address"}
//!   },
//!   "required": ["id"]
//! }"#;
//!
//! let elements = introspect(doc, SchemaDialect::Json).unwrap();
//! assert_eq!(elements.len(), 2);
//! assert_eq!(elements[0].element_type, ElementType::Integer);
//! assert!(elements[0].required);
//! assert!(!elements[1].required);
//! ```

pub mod json;
pub mod xsd;

pub use json::JsonSchemaIntrospector;
pub use xsd::XsdIntrospector;

use synth_core::{SchemaDialect, SchemaElement, SchemaError, SchemaErrorKind};
use tracing::debug;

/// Extracts canonical elements from one schema dialect.
pub trait Introspector {
    /// Dialect handled by this introspector.
    fn dialect(&self) -> SchemaDialect;

    /// Parse `document` and return its top-level elements in document order.
    fn introspect(&self, document: &[u8]) -> Result<Vec<SchemaElement>, SchemaError>;
}

/// Introspect a schema document in the given dialect.
pub fn introspect(
    document: &[u8],
    dialect: SchemaDialect,
) -> Result<Vec<SchemaElement>, SchemaError> {
    let elements = match dialect {
        SchemaDialect::Json => JsonSchemaIntrospector.introspect(document)?,
        SchemaDialect::Xml => XsdIntrospector.introspect(document)?,
    };
    debug!(
        "Introspected {} elements from {} schema",
        elements.len(),
        dialect
    );
    Ok(elements)
}

/// Decode a document as UTF-8, reporting the first invalid byte offset.
pub(crate) fn decode_utf8(document: &[u8], dialect: SchemaDialect) -> Result<&str, SchemaError> {
    std::str::from_utf8(document).map_err(|e| {
        SchemaError::new(
            dialect,
            SchemaErrorKind::Encoding,
            format!("byte {}", e.valid_up_to()),
            "document is not valid UTF-8",
        )
    })
}
