//! Custom type registry.
//!
//! A custom type is a named, reusable field expression. Registration
//! compiles the expression eagerly so syntax errors, unknown functions and
//! arity mistakes are reported at registration time. The registry is shared
//! read-mostly state: lookups take a read lock, register/remove take the
//! write lock.

use crate::error::GeneratorError;
use parking_lot::RwLock;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use synth_core::{ConfigurationError, CustomTypeDefinition, Value};
use synth_expr::{CompiledExpression, EvalContext, ExpressionError, ExpressionErrorKind};
use tracing::{debug, info};

/// Seed of the rng used by self-tests.
pub const SELF_TEST_SEED: u64 = 42;

/// A registered custom type.
#[derive(Debug, Clone)]
pub struct CustomType {
    pub name: String,
    pub description: Option<String>,
    pub expression: Arc<CompiledExpression>,
}

impl CustomType {
    /// Source text of the expression.
    pub fn source(&self) -> &str {
        self.expression.source()
    }
}

/// Outcome of a self-test. Never an `Err`: failures are reported in-band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelfTestResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ExpressionErrorKind>,
}

impl SelfTestResult {
    fn passed(value: Value) -> Self {
        Self {
            success: true,
            sample_value: Some(value),
            error: None,
            error_kind: None,
        }
    }

    fn failed(error: &ExpressionError) -> Self {
        Self {
            success: false,
            sample_value: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }
}

/// Evaluate `expression` once with record index 0, no row context and an
/// rng seeded with [`SELF_TEST_SEED`].
pub fn self_test_expression(expression: &CompiledExpression) -> SelfTestResult {
    let mut rng = StdRng::seed_from_u64(SELF_TEST_SEED);
    match expression.evaluate(&mut EvalContext::new(0, &mut rng)) {
        Ok(value) => SelfTestResult::passed(value),
        Err(e) => SelfTestResult::failed(&e),
    }
}

/// Compile and self-test an expression that is not registered.
pub fn self_test_source(source: &str) -> SelfTestResult {
    match synth_expr::compile(source) {
        Ok(expression) => self_test_expression(&expression),
        Err(e) => SelfTestResult::failed(&e),
    }
}

/// Thread-safe registry of custom types keyed by name.
#[derive(Debug, Default)]
pub struct CustomTypeRegistry {
    types: RwLock<HashMap<String, Arc<CustomType>>>,
}

impl CustomTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `source` and register it under `name`, replacing any
    /// existing type of that name.
    pub fn register(&self, name: &str, source: &str) -> Result<Arc<CustomType>, GeneratorError> {
        self.insert(name, None, source)
    }

    /// Register a custom type from its configuration form.
    pub fn register_definition(
        &self,
        definition: &CustomTypeDefinition,
    ) -> Result<Arc<CustomType>, GeneratorError> {
        self.insert(
            &definition.name,
            definition.description.clone(),
            &definition.expression,
        )
    }

    fn insert(
        &self,
        name: &str,
        description: Option<String>,
        source: &str,
    ) -> Result<Arc<CustomType>, GeneratorError> {
        if name.is_empty() || name.trim() != name {
            return Err(ConfigurationError::InvalidCustomTypeName(name.to_string()).into());
        }
        let expression = synth_expr::compile(source)
            .map_err(|e| GeneratorError::expression(None, Some(name), None, e))?;

        let custom_type = Arc::new(CustomType {
            name: name.to_string(),
            description,
            expression: Arc::new(expression),
        });

        let replaced = self
            .types
            .write()
            .insert(name.to_string(), Arc::clone(&custom_type))
            .is_some();
        if replaced {
            info!("Replaced custom type '{}'", name);
        } else {
            info!("Registered custom type '{}'", name);
        }
        debug!("Custom type '{}' expression: {}", name, source);

        Ok(custom_type)
    }

    /// Remove a custom type, returning it if it was registered.
    pub fn remove(&self, name: &str) -> Option<Arc<CustomType>> {
        let removed = self.types.write().remove(name);
        if removed.is_some() {
            info!("Removed custom type '{}'", name);
        }
        removed
    }

    pub fn get(&self, name: &str) -> Option<Arc<CustomType>> {
        self.types.read().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.read().contains_key(name)
    }

    /// All registered types, sorted by name.
    pub fn list(&self) -> Vec<Arc<CustomType>> {
        let mut types: Vec<_> = self.types.read().values().cloned().collect();
        types.sort_by(|a, b| a.name.cmp(&b.name));
        types
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    pub fn clear(&self) {
        self.types.write().clear();
    }

    /// Self-test the named custom type.
    ///
    /// An unknown name is reported as a failed result, not an error.
    pub fn self_test(&self, name: &str) -> SelfTestResult {
        match self.get(name) {
            Some(custom_type) => self_test_expression(&custom_type.expression),
            None => SelfTestResult {
                success: false,
                sample_value: None,
                error: Some(format!("Unknown custom type '{name}'")),
                error_kind: None,
            },
        }
    }
}
