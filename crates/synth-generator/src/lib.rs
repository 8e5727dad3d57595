//! Custom type registry and deterministic record generator.
//!
//! A [`GenerationRequest`](synth_core::GenerationRequest) is validated in
//! full before anything is generated ([`plan`]), then produced by a
//! [`DataGenerator`] from a single seeded random stream.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use synth_core::{FieldDefinition, GenerationRequest, Value};
//! use synth_generator::{CustomTypeRegistry, DataGenerator};
//!
//! let registry = Arc::new(CustomTypeRegistry::new());
//! registry.register("sku", "'SKU-' + random.digits(6)").unwrap();
//!
//! let request = GenerationRequest::new(
//!     vec![
//!         FieldDefinition::new("age", "integer"),
//!         FieldDefinition::new("code", "sku"),
//!         FieldDefinition::with_expression("tag", "\"user-\" + record_index"),
//!     ],
//!     2,
//!     Some(42),
//! );
//!
//! let output = DataGenerator::new(registry).generate(&request).unwrap();
//! assert_eq!(output.seed_used, 42);
//! assert_eq!(output.records[1].get("tag"), Some(&Value::from("user-1")));
//! ```

pub mod cache;
pub mod error;
pub mod generator;
pub mod generators;
pub mod plan;
pub mod registry;

pub use cache::ExpressionCache;
pub use error::{ErrorCategory, GeneratorError};
pub use generator::{DataGenerator, GenerationOutput, RecordIterator, NULL_PROBABILITY};
pub use registry::{
    self_test_expression, self_test_source, CustomType, CustomTypeRegistry, SelfTestResult,
    SELF_TEST_SEED,
};
