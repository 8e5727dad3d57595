//! Type vocabularies shared across the synthgen crates.
//!
//! Two vocabularies exist side by side:
//!
//! - [`ElementType`] - the closed set of types an introspected schema element
//!   can carry (`string`, `integer`, `float`, `boolean`, `date`, `datetime`,
//!   `object`)
//! - [`DataType`] - the builtin generators a field can be bound to, a superset
//!   of the element types (minus `object`) plus realistic text kinds such as
//!   `email` or `city`
//!
//! Both serialize as lowercase strings:
//! ```yaml
//! data_type: integer
//! data_type: ip_address
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Schema document dialect, selected explicitly by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaDialect {
    /// JSON-Schema-like document
    Json,
    /// XML Schema Definition
    Xml,
}

impl SchemaDialect {
    /// Lowercase dialect name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl fmt::Display for SchemaDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaDialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" | "xsd" => Ok(Self::Xml),
            other => Err(format!("unsupported schema dialect: {other}")),
        }
    }
}

/// Inferred type of an introspected schema element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Datetime,
    /// Nested structure; generated as a string at the leaf level
    Object,
}

impl ElementType {
    /// Lowercase type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Object => "object",
        }
    }

    /// Look up a type by its exact vocabulary name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "string" => Some(Self::String),
            "integer" => Some(Self::Integer),
            "float" => Some(Self::Float),
            "boolean" => Some(Self::Boolean),
            "date" => Some(Self::Date),
            "datetime" => Some(Self::Datetime),
            "object" => Some(Self::Object),
            _ => None,
        }
    }

    /// Builtin generator used for this element type.
    ///
    /// `object` always degrades to `string` for leaf generation.
    pub fn data_type(&self) -> DataType {
        match self {
            Self::String | Self::Object => DataType::String,
            Self::Integer => DataType::Integer,
            Self::Float => DataType::Float,
            Self::Boolean => DataType::Boolean,
            Self::Date => DataType::Date,
            Self::Datetime => DataType::Datetime,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Builtin data types backed by fixed internal generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    Datetime,
    Email,
    Phone,
    Name,
    Address,
    City,
    Country,
    Zipcode,
    Company,
    Job,
    Url,
    IpAddress,
    Uuid,
}

impl DataType {
    /// All builtin data types, in documentation order.
    pub const ALL: [DataType; 18] = [
        Self::String,
        Self::Integer,
        Self::Float,
        Self::Boolean,
        Self::Date,
        Self::Datetime,
        Self::Email,
        Self::Phone,
        Self::Name,
        Self::Address,
        Self::City,
        Self::Country,
        Self::Zipcode,
        Self::Company,
        Self::Job,
        Self::Url,
        Self::IpAddress,
        Self::Uuid,
    ];

    /// Snake-case type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Datetime => "datetime",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Name => "name",
            Self::Address => "address",
            Self::City => "city",
            Self::Country => "country",
            Self::Zipcode => "zipcode",
            Self::Company => "company",
            Self::Job => "job",
            Self::Url => "url",
            Self::IpAddress => "ip_address",
            Self::Uuid => "uuid",
        }
    }

    /// Look up a builtin by name. Returns `None` for custom type names.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|dt| dt.as_str() == name)
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Self::String => "Random text",
            Self::Integer => "Random integer",
            Self::Float => "Random float rounded to 2 decimals",
            Self::Boolean => "Random boolean",
            Self::Date => "Random date (YYYY-MM-DD)",
            Self::Datetime => "Random datetime (YYYY-MM-DD HH:MM:SS)",
            Self::Email => "Random email address",
            Self::Phone => "Random phone number",
            Self::Name => "Random person name",
            Self::Address => "Random street address",
            Self::City => "Random city name",
            Self::Country => "Random country name",
            Self::Zipcode => "Random zip code",
            Self::Company => "Random company name",
            Self::Job => "Random job title",
            Self::Url => "Random URL",
            Self::IpAddress => "Random IPv4 address",
            Self::Uuid => "Random UUID v4",
        }
    }

    /// Whether numeric bounds (`min_value`/`max_value`) apply to this type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_str() {
        assert_eq!("json".parse::<SchemaDialect>().unwrap(), SchemaDialect::Json);
        assert_eq!("XML".parse::<SchemaDialect>().unwrap(), SchemaDialect::Xml);
        assert_eq!("xsd".parse::<SchemaDialect>().unwrap(), SchemaDialect::Xml);
        assert!("yaml".parse::<SchemaDialect>().is_err());
    }

    #[test]
    fn test_object_degrades_to_string() {
        assert_eq!(ElementType::Object.data_type(), DataType::String);
        assert_eq!(ElementType::Datetime.data_type(), DataType::Datetime);
    }

    #[test]
    fn test_data_type_names_round_trip() {
        for dt in DataType::ALL {
            assert_eq!(DataType::from_name(dt.as_str()), Some(dt));
        }
        assert_eq!(DataType::from_name("status"), None);
    }

    #[test]
    fn test_data_type_serde_snake_case() {
        let json = serde_json::to_string(&DataType::IpAddress).unwrap();
        assert_eq!(json, "\"ip_address\"");
        let parsed: ElementType = serde_json::from_str("\"datetime\"").unwrap();
        assert_eq!(parsed, ElementType::Datetime);
    }
}
