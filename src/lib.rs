//! synthgen: schema-driven synthetic data generation.
//!
//! The [`Engine`] ties the pieces together:
//!
//! - `introspect` reads a JSON Schema or XSD document into canonical
//!   elements ([`schema_introspect`]).
//! - `register_custom_type` and `self_test` manage named, reusable
//!   expressions ([`synth_generator::CustomTypeRegistry`]).
//! - `generate` validates a request in full, then produces records from a
//!   single seeded random stream ([`synth_generator::DataGenerator`]).
//!
//! The engine does no I/O; the `synthgen` binary handles files and output.
//!
//! # Example
//!
//! ```rust
//! use synth_core::{FieldDefinition, GenerationRequest, Value};
//! use synthgen::Engine;
//!
//! let engine = Engine::default();
//! engine.register_custom_type("x", "1+1").unwrap();
//! assert_eq!(engine.self_test("x").sample_value, Some(Value::Integer(2)));
//!
//! let request = GenerationRequest::new(
//!     vec![
//!         FieldDefinition::new("age", "integer"),
//!         FieldDefinition::with_expression("tag", "\"user-\" + record_index"),
//!     ],
//!     2,
//!     Some(42),
//! );
//! let output = engine.generate(&request).unwrap();
//! assert_eq!(output.records[0].get("tag"), Some(&Value::from("user-0")));
//! ```

pub mod config;
pub mod output;

pub use config::EngineConfig;
pub use output::{write_output, OutputFormat};

use std::sync::Arc;
use synth_core::{
    FieldDefinition, GenerationConfig, GenerationRequest, SchemaDialect, SchemaElement,
    SchemaError,
};
use synth_expr::FunctionSpec;
use synth_generator::{
    CustomType, CustomTypeRegistry, DataGenerator, ExpressionCache, GenerationOutput,
    GeneratorError, SelfTestResult,
};
use tracing::info;

/// Entry point for callers: introspection, custom types and generation.
///
/// Cheap to share behind an `Arc`; all methods take `&self`.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    registry: Arc<CustomTypeRegistry>,
    generator: DataGenerator,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        let registry = Arc::new(CustomTypeRegistry::new());
        let cache = Arc::new(ExpressionCache::new(config.expression_cache_size));
        let generator = DataGenerator::new(Arc::clone(&registry))
            .with_cache(cache)
            .with_max_count(config.max_count);
        Self {
            config,
            registry,
            generator,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &CustomTypeRegistry {
        &self.registry
    }

    /// Parse a schema document into its top-level elements.
    pub fn introspect(
        &self,
        document: &[u8],
        dialect: SchemaDialect,
    ) -> Result<Vec<SchemaElement>, SchemaError> {
        schema_introspect::introspect(document, dialect)
    }

    /// Compile `expression` and register it as custom type `name`.
    pub fn register_custom_type(
        &self,
        name: &str,
        expression: &str,
    ) -> Result<Arc<CustomType>, GeneratorError> {
        self.registry.register(name, expression)
    }

    /// Register every custom type of a generation config, stopping at the
    /// first failure.
    pub fn register_config(&self, config: &GenerationConfig) -> Result<(), GeneratorError> {
        for definition in &config.custom_types {
            self.registry.register_definition(definition)?;
        }
        info!("Registered {} custom types from config", config.custom_types.len());
        Ok(())
    }

    /// Evaluate a registered custom type once. Never fails.
    pub fn self_test(&self, name: &str) -> SelfTestResult {
        self.registry.self_test(name)
    }

    /// Compile and evaluate an unregistered expression once. Never fails.
    pub fn self_test_expression(&self, expression: &str) -> SelfTestResult {
        synth_generator::self_test_source(expression)
    }

    /// Generate the records of `request`.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, GeneratorError> {
        self.generator.generate(request)
    }

    /// Introspect `document` and generate records for all of its elements.
    pub fn generate_from_schema(
        &self,
        document: &[u8],
        dialect: SchemaDialect,
        count: i64,
        seed: Option<u64>,
    ) -> Result<GenerationOutput, GeneratorError> {
        let elements = self.introspect(document, dialect)?;
        let fields = elements.iter().map(FieldDefinition::from_element).collect();
        self.generate(&GenerationRequest::new(fields, count, seed))
    }

    /// The expression function library.
    pub fn functions(&self) -> impl Iterator<Item = &'static FunctionSpec> {
        synth_expr::functions::library()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synth_generator::ErrorCategory;

    #[test]
    fn test_engine_applies_config() {
        let engine = Engine::new(EngineConfig {
            max_count: 5,
            ..Default::default()
        });
        let request = GenerationRequest::new(vec![FieldDefinition::new("n", "integer")], 6, Some(1));
        let err = engine.generate(&request).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn test_generate_from_schema_surfaces_schema_errors() {
        let err = Engine::default()
            .generate_from_schema(b"{not json", SchemaDialect::Json, 1, Some(1))
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Schema);
    }

    #[test]
    fn test_register_config() {
        let config = GenerationConfig::from_yaml(
            "custom_types:\n  - name: sku\n    expression: \"'SKU-' + random.digits(4)\"\n",
        )
        .unwrap();
        let engine = Engine::default();
        engine.register_config(&config).unwrap();
        assert!(engine.registry().contains("sku"));
        assert!(engine.self_test("sku").success);
    }

    #[test]
    fn test_functions_listing() {
        let engine = Engine::default();
        assert!(engine.functions().any(|f| f.name == "random.int"));
    }
}
