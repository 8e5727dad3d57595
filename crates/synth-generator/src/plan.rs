//! Request validation.
//!
//! Everything that can be checked without generating a value is checked
//! here, before the first record: the record count, field names, data type
//! resolution, constraints, expression compilation and `row.<field>`
//! references. The resulting [`GenerationPlan`] can then be run without any
//! configuration failure.

use crate::cache::ExpressionCache;
use crate::error::GeneratorError;
use crate::generators::BuiltinGenerator;
use crate::registry::CustomTypeRegistry;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;
use synth_core::{
    ConfigurationError, DataType, FieldDefinition, GeneratedRecord, GenerationRequest, Value,
};
use synth_expr::{CompiledExpression, EvalContext};

/// How a field's values are produced.
#[derive(Debug, Clone)]
pub enum FieldSource {
    /// Inline expression, or the expression of `custom_type`
    Expression {
        expression: Arc<CompiledExpression>,
        custom_type: Option<String>,
    },
    Builtin(BuiltinGenerator),
}

/// One validated field.
#[derive(Debug, Clone)]
pub struct FieldPlan {
    pub name: String,
    /// Whether a null decision is drawn before the value
    pub may_be_null: bool,
    pub source: FieldSource,
}

impl FieldPlan {
    /// Produce this field's value for the record being built.
    pub(crate) fn generate<R: Rng>(
        &self,
        rng: &mut R,
        record: &GeneratedRecord,
    ) -> Result<Value, GeneratorError> {
        match &self.source {
            FieldSource::Builtin(generator) => Ok(generator.generate(rng, record.index)),
            FieldSource::Expression {
                expression,
                custom_type,
            } => {
                let mut ctx = EvalContext::new(record.index, rng).with_row(record);
                expression.evaluate(&mut ctx).map_err(|e| {
                    GeneratorError::expression(
                        Some(&self.name),
                        custom_type.as_deref(),
                        Some(record.index),
                        e,
                    )
                })
            }
        }
    }
}

/// A validated request.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub fields: Vec<FieldPlan>,
    pub count: u64,
}

/// Validate `request`.
///
/// Checks run in a fixed order and the first failure is returned:
/// count, then each field in definition order (name, resolution,
/// constraints, row references).
pub fn build_plan(
    request: &GenerationRequest,
    registry: &CustomTypeRegistry,
    cache: &ExpressionCache,
    max_count: Option<u64>,
) -> Result<GenerationPlan, GeneratorError> {
    let count = validate_count(request.count, max_count)?;

    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(request.field_definitions.len());
    for (position, field) in request.field_definitions.iter().enumerate() {
        if field.name.is_empty() {
            return Err(ConfigurationError::EmptyFieldName { position }.into());
        }
        if !seen.insert(field.name.as_str()) {
            return Err(ConfigurationError::DuplicateField(field.name.clone()).into());
        }

        let source = resolve_field(field, registry, cache)?;
        if let FieldSource::Expression { expression, .. } = &source {
            for reference in expression.field_references() {
                let defined_earlier = request.field_definitions[..position]
                    .iter()
                    .any(|earlier| earlier.name == reference);
                if !defined_earlier {
                    return Err(ConfigurationError::UnknownFieldReference {
                        field: field.name.clone(),
                        reference: reference.to_string(),
                    }
                    .into());
                }
            }
        }

        fields.push(FieldPlan {
            name: field.name.clone(),
            may_be_null: field.may_be_null(),
            source,
        });
    }

    Ok(GenerationPlan { fields, count })
}

fn validate_count(count: i64, max_count: Option<u64>) -> Result<u64, ConfigurationError> {
    let count = u64::try_from(count).map_err(|_| ConfigurationError::InvalidCount(count))?;
    match max_count {
        Some(max) if count > max => Err(ConfigurationError::CountLimitExceeded {
            count: count as i64,
            max,
        }),
        _ => Ok(count),
    }
}

/// Resolve a field: inline expression, then custom type, then builtin.
fn resolve_field(
    field: &FieldDefinition,
    registry: &CustomTypeRegistry,
    cache: &ExpressionCache,
) -> Result<FieldSource, GeneratorError> {
    if let Some(source) = &field.expression {
        let expression = cache
            .get_or_compile(source)
            .map_err(|e| GeneratorError::expression(Some(&field.name), None, None, e))?;
        return Ok(FieldSource::Expression {
            expression,
            custom_type: None,
        });
    }

    if let Some(custom_type) = registry.get(&field.data_type) {
        return Ok(FieldSource::Expression {
            expression: Arc::clone(&custom_type.expression),
            custom_type: Some(custom_type.name.clone()),
        });
    }

    let data_type =
        DataType::from_name(&field.data_type).ok_or_else(|| ConfigurationError::UnresolvedDataType {
            field: field.name.clone(),
            data_type: field.data_type.clone(),
        })?;
    let generator = BuiltinGenerator::new(data_type, &field.constraints).map_err(|message| {
        ConfigurationError::InvalidConstraint {
            field: field.name.clone(),
            message,
        }
    })?;
    Ok(FieldSource::Builtin(generator))
}
