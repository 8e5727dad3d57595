//! Engine configuration.
//!
//! Loaded from a TOML file; every field is optional:
//!
//! ```toml
//! max_count = 10000
//! expression_cache_size = 256
//! default_format = "json"
//! ```

use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use synth_core::ConfigurationError;
use synth_generator::cache::DEFAULT_CACHE_SIZE;

/// Default ceiling on records per request.
pub const DEFAULT_MAX_COUNT: u64 = 10_000;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Requests above this many records are rejected
    pub max_count: u64,

    /// Number of compiled expressions kept in the shared cache
    pub expression_cache_size: usize,

    /// Output format when none is given on the command line
    pub default_format: OutputFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            expression_cache_size: DEFAULT_CACHE_SIZE,
            default_format: OutputFormat::Json,
        }
    }
}

impl EngineConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigurationError> {
        toml::from_str(content).map_err(|e| ConfigurationError::InvalidConfigFile(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigurationError::InvalidConfigFile(format!("{}: {e}", path.display()))
        })?;
        Self::from_toml(&content).map_err(|e| match e {
            ConfigurationError::InvalidConfigFile(message) => {
                ConfigurationError::InvalidConfigFile(format!("{}: {message}", path.display()))
            }
            other => other,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_toml("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.max_count, 10_000);
        assert_eq!(config.expression_cache_size, 256);
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_override() {
        let config = EngineConfig::from_toml("max_count = 50\ndefault_format = \"csv\"\n").unwrap();
        assert_eq!(config.max_count, 50);
        assert_eq!(config.expression_cache_size, 256);
        assert_eq!(config.default_format, OutputFormat::Csv);
    }

    #[test]
    fn test_rejects_unknown_keys_and_bad_values() {
        assert!(EngineConfig::from_toml("max_cuont = 5").is_err());
        assert!(EngineConfig::from_toml("default_format = \"xml\"").is_err());
        assert!(EngineConfig::from_toml("max_count = -1").is_err());
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "expression_cache_size = 8").unwrap();
        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.expression_cache_size, 8);

        let err = EngineConfig::from_file("/nonexistent/synthgen.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/synthgen.toml"));
    }
}
