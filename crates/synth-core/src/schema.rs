//! Schema and field-mapping definitions.
//!
//! ## Type Hierarchy
//!
//! **Introspection output** (read-only, produced from a schema document):
//! - `SchemaElement` - one named, typed element with optional constraints
//!
//! **Generation input** (owned by the caller):
//! - `FieldDefinition` - how one output field is produced
//! - `CustomTypeDefinition` - a named, reusable expression
//! - `GenerationRequest` - ordered fields + count + optional seed
//! - `GenerationConfig` - file form of all of the above (YAML or JSON)
//!
//! ## YAML Format
//!
//! ```yaml
//! custom_types:
//!   - name: status
//!     expression: "random.choice(['active', 'inactive'])"
//! fields:
//!   - name: id
//!     data_type: uuid
//!   - name: age
//!     data_type: integer
//!     min_value: 18
//!     max_value: 80
//!   - name: state
//!     data_type: status
//!   - name: tag
//!     expression: "\"user-\" + record_index"
//! count: 100
//! seed: 42
//! ```

use crate::error::ConfigurationError;
use crate::types::{DataType, ElementType};
use crate::values::Value;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

fn default_true() -> bool {
    true
}

fn default_data_type() -> String {
    DataType::String.as_str().to_string()
}

/// Optional value constraints carried by schema elements and fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraints {
    /// Minimum string length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,

    /// Maximum string length
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,

    /// Minimum numeric value (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    /// Maximum numeric value (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    /// Pattern template (`\d`, `\d{N}`, `{index}`, `{rand:N}`, `{uuid}`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    /// Explicit set of values to choose from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<Value>,
}

impl FieldConstraints {
    /// Whether no constraint is set.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// One element extracted from a schema document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaElement {
    /// Element name, unique within the schema's top level
    pub name: String,

    /// Inferred element type
    #[serde(rename = "type")]
    pub element_type: ElementType,

    /// Whether the element is required
    pub required: bool,

    /// Whether the schema explicitly allows null (`"null"` in a JSON type
    /// array, `nillable="true"` in XSD)
    #[serde(default)]
    pub nullable: bool,

    /// Description, if the schema provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Constraints found in the schema
    #[serde(default, skip_serializing_if = "FieldConstraints::is_empty")]
    pub constraints: FieldConstraints,
}

impl SchemaElement {
    /// Create a new element with no description or constraints.
    pub fn new(name: impl Into<String>, element_type: ElementType, required: bool) -> Self {
        Self {
            name: name.into(),
            element_type,
            required,
            nullable: false,
            description: None,
            constraints: FieldConstraints::default(),
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// How a single output field is produced.
///
/// Resolution priority: `expression` if present, else a registered custom type
/// named by `data_type`, else the builtin generator named by `data_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Output field name
    pub name: String,

    /// Builtin data type name or registered custom type name
    #[serde(default = "default_data_type")]
    pub data_type: String,

    /// Whether the field is required
    #[serde(default = "default_true")]
    pub required: bool,

    /// Whether the field may be null (only when not required)
    #[serde(default)]
    pub nullable: bool,

    /// Inline expression; overrides `data_type` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Constraints for builtin generators
    #[serde(flatten)]
    pub constraints: FieldConstraints,
}

impl FieldDefinition {
    /// Create a required, non-nullable field bound to a data type.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            required: true,
            nullable: false,
            expression: None,
            description: None,
            constraints: FieldConstraints::default(),
        }
    }

    /// Create a field produced by an inline expression.
    pub fn with_expression(name: impl Into<String>, expression: impl Into<String>) -> Self {
        let mut field = Self::new(name, default_data_type());
        field.expression = Some(expression.into());
        field
    }

    /// Mark the field optional and nullable.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self.nullable = true;
        self
    }

    /// Set the constraints.
    pub fn with_constraints(mut self, constraints: FieldConstraints) -> Self {
        self.constraints = constraints;
        self
    }

    /// Build a field from an introspected schema element.
    pub fn from_element(element: &SchemaElement) -> Self {
        Self {
            name: element.name.clone(),
            data_type: element.element_type.data_type().as_str().to_string(),
            required: element.required,
            nullable: element.nullable,
            expression: None,
            description: element.description.clone(),
            constraints: element.constraints.clone(),
        }
    }

    /// Whether a null decision is drawn for this field.
    pub fn may_be_null(&self) -> bool {
        !self.required && self.nullable
    }
}

/// A named, reusable expression as written by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomTypeDefinition {
    /// Unique name, referenced from `FieldDefinition::data_type`
    pub name: String,

    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Expression source text
    pub expression: String,
}

/// Parameters of one generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Fields in output order
    pub field_definitions: Vec<FieldDefinition>,

    /// Number of records; negative counts are rejected during validation
    pub count: i64,

    /// Seed; a fresh one is drawn and reported back when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl GenerationRequest {
    /// Create a new request.
    pub fn new(field_definitions: Vec<FieldDefinition>, count: i64, seed: Option<u64>) -> Self {
        Self {
            field_definitions,
            count,
            seed,
        }
    }
}

/// File form of a generation setup: custom types, fields and defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Custom types to register before generating
    #[serde(default)]
    pub custom_types: Vec<CustomTypeDefinition>,

    /// Field definitions in output order
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,

    /// Default record count
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<i64>,

    /// Default seed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl GenerationConfig {
    /// Parse a configuration from a YAML string (JSON is valid YAML).
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigurationError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigurationError::InvalidConfigFile(e.to_string()))
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        serde_json::from_str(json).map_err(|e| ConfigurationError::InvalidConfigFile(e.to_string()))
    }

    /// Load a configuration from a `.yaml`, `.yml` or `.json` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigurationError::InvalidConfigFile(format!("{}: {e}", path.display()))
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    /// Get a field definition by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Get a custom type definition by name.
    pub fn get_custom_type(&self, name: &str) -> Option<&CustomTypeDefinition> {
        self.custom_types.iter().find(|t| t.name == name)
    }

    /// Build a request from this configuration, with optional overrides.
    pub fn to_request(&self, count: Option<i64>, seed: Option<u64>) -> GenerationRequest {
        GenerationRequest {
            field_definitions: self.fields.clone(),
            count: count.or(self.count).unwrap_or(0),
            seed: seed.or(self.seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
custom_types:
  - name: status
    description: Account status
    expression: "random.choice(['active', 'inactive'])"
fields:
  - name: id
    data_type: uuid
  - name: age
    data_type: integer
    min_value: 18
    max_value: 80
  - name: nickname
    required: false
    nullable: true
  - name: tag
    expression: "\"user-\" + record_index"
count: 25
seed: 7
"#;

    #[test]
    fn test_parse_generation_config() {
        let config = GenerationConfig::from_yaml(SAMPLE).unwrap();

        assert_eq!(config.custom_types.len(), 1);
        assert_eq!(config.fields.len(), 4);
        assert_eq!(config.count, Some(25));
        assert_eq!(config.seed, Some(7));

        let age = config.get_field("age").unwrap();
        assert_eq!(age.data_type, "integer");
        assert_eq!(age.constraints.min_value, Some(18.0));
        assert_eq!(age.constraints.max_value, Some(80.0));
        assert!(age.required);

        let nickname = config.get_field("nickname").unwrap();
        assert_eq!(nickname.data_type, "string");
        assert!(nickname.may_be_null());

        let tag = config.get_field("tag").unwrap();
        assert_eq!(tag.expression.as_deref(), Some("\"user-\" + record_index"));

        assert!(config.get_custom_type("status").is_some());
    }

    #[test]
    fn test_invalid_yaml_is_configuration_error() {
        let err = GenerationConfig::from_yaml("fields: [oops").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidConfigFile(_)));
    }

    #[test]
    fn test_from_file_json() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"fields": [{{"name": "flag", "data_type": "boolean"}}], "count": 3}}"#
        )
        .unwrap();

        let config = GenerationConfig::from_file(file.path()).unwrap();
        assert_eq!(config.fields[0].name, "flag");
        assert_eq!(config.count, Some(3));
    }

    #[test]
    fn test_to_request_overrides() {
        let config = GenerationConfig::from_yaml(SAMPLE).unwrap();

        let request = config.to_request(None, None);
        assert_eq!(request.count, 25);
        assert_eq!(request.seed, Some(7));

        let request = config.to_request(Some(2), Some(99));
        assert_eq!(request.count, 2);
        assert_eq!(request.seed, Some(99));
        assert_eq!(request.field_definitions.len(), 4);
    }

    #[test]
    fn test_field_from_element() {
        let mut element = SchemaElement::new("profile", ElementType::Object, false)
            .with_description("Nested profile");
        element.nullable = true;

        let field = FieldDefinition::from_element(&element);
        assert_eq!(field.name, "profile");
        assert_eq!(field.data_type, "string");
        assert!(!field.required);
        assert!(field.may_be_null());
        assert_eq!(field.description.as_deref(), Some("Nested profile"));
    }
}
