//! Core types for the synthgen data generator.
//!
//! This crate provides the foundational types used across the generator
//! crates, including:
//!
//! - [`Value`] / [`GeneratedRecord`] - generated scalars and ordered records
//! - [`ElementType`] / [`DataType`] - the introspection and builtin-generator vocabularies
//! - [`SchemaElement`] - canonical element extracted from a schema document
//! - [`FieldDefinition`] / [`CustomTypeDefinition`] / [`GenerationRequest`] - generation input
//! - [`SchemaError`] / [`ConfigurationError`] - shared error taxonomy
//!
//! # Architecture
//!
//! ```text
//! synth-core (this crate)
//!    │
//!    ├─── schema-introspect  (JSON Schema / XSD -> SchemaElement)
//!    ├─── synth-expr         (expression language over Value)
//!    └─── synth-generator    (registry, validation, seeded generation)
//! ```
//!
//! # Example
//!
//! ```rust
//! use synth_core::{FieldDefinition, GenerationRequest};
//!
//! let request = GenerationRequest::new(
//!     vec![
//!         FieldDefinition::new("age", "integer"),
//!         FieldDefinition::with_expression("tag", "\"user-\" + record_index"),
//!     ],
//!     2,
//!     Some(42),
//! );
//! assert_eq!(request.field_definitions.len(), 2);
//! ```

pub mod error;
pub mod schema;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use error::{ConfigurationError, ConfigurationErrorKind, SchemaError, SchemaErrorKind};
pub use schema::{
    CustomTypeDefinition, FieldConstraints, FieldDefinition, GenerationConfig, GenerationRequest,
    SchemaElement,
};
pub use types::{DataType, ElementType, SchemaDialect};
pub use values::{GeneratedRecord, Value};
