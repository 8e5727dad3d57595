//! JSON Schema introspection.
//!
//! Each key under the root `properties` object becomes one element. The
//! `type` keyword is mapped onto the closed element vocabulary:
//!
//! | JSON Schema             | element type |
//! |-------------------------|--------------|
//! | `string`                | `string`     |
//! | `string` + `format: date` / `date-time` | `date` / `datetime` |
//! | `integer`               | `integer`    |
//! | `number`, `float`       | `float`      |
//! | `boolean`               | `boolean`    |
//! | `date`, `datetime`      | verbatim     |
//! | `object`                | `object`     |
//! | `array`, absent, other  | `string`     |

use crate::{decode_utf8, Introspector};
use serde_json::{Map, Value as JsonValue};
use std::collections::HashSet;
use synth_core::{
    ElementType, FieldConstraints, SchemaDialect, SchemaElement, SchemaError, SchemaErrorKind,
    Value,
};

/// Introspector for JSON-Schema-like documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaIntrospector;

impl Introspector for JsonSchemaIntrospector {
    fn dialect(&self) -> SchemaDialect {
        SchemaDialect::Json
    }

    fn introspect(&self, document: &[u8]) -> Result<Vec<SchemaElement>, SchemaError> {
        let text = decode_utf8(document, SchemaDialect::Json)?;
        let root: JsonValue = serde_json::from_str(text).map_err(|e| {
            error(
                SchemaErrorKind::Syntax,
                format!("line {}, column {}", e.line(), e.column()),
                e.to_string(),
            )
        })?;

        let root = root.as_object().ok_or_else(|| {
            error(
                SchemaErrorKind::UnsupportedRoot,
                "/",
                format!("root must be a JSON object, found {}", json_kind(&root)),
            )
        })?;

        check_root_type(root)?;

        let properties = match root.get("properties") {
            None => return Ok(Vec::new()),
            Some(JsonValue::Object(properties)) => properties,
            Some(other) => {
                return Err(error(
                    SchemaErrorKind::InvalidDefinition,
                    "/properties",
                    format!("'properties' must be an object, found {}", json_kind(other)),
                ))
            }
        };

        let required = required_names(root)?;

        properties
            .iter()
            .map(|(name, definition)| parse_property(name, definition, &required))
            .collect()
    }
}

fn error(
    kind: SchemaErrorKind,
    location: impl Into<String>,
    message: impl Into<String>,
) -> SchemaError {
    SchemaError::new(SchemaDialect::Json, kind, location, message)
}

/// Escape a key for use inside a JSON pointer (RFC 6901).
fn pointer_segment(key: &str) -> String {
    key.replace('~', "~0").replace('/', "~1")
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

/// The root may omit `type`, but when present it must describe an object.
fn check_root_type(root: &Map<String, JsonValue>) -> Result<(), SchemaError> {
    let describes_object = match root.get("type") {
        None => true,
        Some(JsonValue::String(t)) => t == "object",
        Some(JsonValue::Array(types)) => types.iter().any(|t| t.as_str() == Some("object")),
        Some(_) => false,
    };
    if describes_object {
        Ok(())
    } else {
        Err(error(
            SchemaErrorKind::UnsupportedRoot,
            "/type",
            "root schema must describe an object",
        ))
    }
}

fn required_names(root: &Map<String, JsonValue>) -> Result<HashSet<&str>, SchemaError> {
    match root.get("required") {
        None => Ok(HashSet::new()),
        Some(JsonValue::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_str().ok_or_else(|| {
                    error(
                        SchemaErrorKind::InvalidDefinition,
                        format!("/required/{i}"),
                        "required entries must be strings",
                    )
                })
            })
            .collect(),
        Some(other) => Err(error(
            SchemaErrorKind::InvalidDefinition,
            "/required",
            format!("'required' must be an array, found {}", json_kind(other)),
        )),
    }
}

fn parse_property(
    name: &str,
    definition: &JsonValue,
    required: &HashSet<&str>,
) -> Result<SchemaElement, SchemaError> {
    let location = format!("/properties/{}", pointer_segment(name));
    let definition = definition.as_object().ok_or_else(|| {
        error(
            SchemaErrorKind::InvalidDefinition,
            location.clone(),
            format!(
                "property definition must be an object, found {}",
                json_kind(definition)
            ),
        )
    })?;

    let (type_name, nullable) = match definition.get("type") {
        Some(JsonValue::String(t)) => (Some(t.as_str()), false),
        Some(JsonValue::Array(types)) => {
            let nullable = types.iter().any(|t| t.as_str() == Some("null"));
            let first = types
                .iter()
                .filter_map(|t| t.as_str())
                .find(|t| *t != "null");
            (first, nullable)
        }
        _ => (None, false),
    };
    let format = definition.get("format").and_then(|f| f.as_str());

    let mut element = SchemaElement::new(
        name,
        map_type(type_name, format),
        required.contains(name),
    );
    element.nullable = nullable;
    element.description = definition
        .get("description")
        .and_then(|d| d.as_str())
        .map(str::to_string);
    element.constraints = parse_constraints(definition, &location)?;
    Ok(element)
}

fn map_type(type_name: Option<&str>, format: Option<&str>) -> ElementType {
    match (type_name, format) {
        (Some("string"), Some("date")) => ElementType::Date,
        (Some("string"), Some("date-time")) => ElementType::Datetime,
        (Some("number"), _) => ElementType::Float,
        (Some("array"), _) | (None, _) => ElementType::String,
        (Some(other), _) => ElementType::from_name(other).unwrap_or(ElementType::String),
    }
}

fn parse_constraints(
    definition: &Map<String, JsonValue>,
    location: &str,
) -> Result<FieldConstraints, SchemaError> {
    let length = |key: &str| -> Result<Option<usize>, SchemaError> {
        match definition.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| {
                    error(
                        SchemaErrorKind::InvalidDefinition,
                        format!("{location}/{key}"),
                        format!("'{key}' must be a non-negative integer"),
                    )
                }),
        }
    };
    let number = |key: &str| -> Result<Option<f64>, SchemaError> {
        match definition.get(key) {
            None => Ok(None),
            Some(v) => v.as_f64().map(Some).ok_or_else(|| {
                error(
                    SchemaErrorKind::InvalidDefinition,
                    format!("{location}/{key}"),
                    format!("'{key}' must be a number"),
                )
            }),
        }
    };

    let allowed_values = match definition.get("enum") {
        None => Vec::new(),
        Some(JsonValue::Array(items)) => items.iter().filter_map(scalar_value).collect(),
        Some(_) => {
            return Err(error(
                SchemaErrorKind::InvalidDefinition,
                format!("{location}/enum"),
                "'enum' must be an array",
            ))
        }
    };

    Ok(FieldConstraints {
        min_length: length("minLength")?,
        max_length: length("maxLength")?,
        min_value: number("minimum")?,
        max_value: number("maximum")?,
        pattern: definition
            .get("pattern")
            .and_then(|p| p.as_str())
            .map(str::to_string),
        allowed_values,
    })
}

/// Convert a scalar JSON value; arrays and objects are not usable as choices.
fn scalar_value(value: &JsonValue) -> Option<Value> {
    match value {
        JsonValue::Null => Some(Value::Null),
        JsonValue::Bool(b) => Some(Value::Bool(*b)),
        JsonValue::Number(n) => n
            .as_i64()
            .map(Value::Integer)
            .or_else(|| n.as_f64().map(Value::Float)),
        JsonValue::String(s) => Some(Value::String(s.clone())),
        JsonValue::Array(_) | JsonValue::Object(_) => None,
    }
}
