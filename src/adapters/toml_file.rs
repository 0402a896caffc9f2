// SPDX-License-Identifier: MIT OR Apache-2.0

//! TOML configuration parser.

use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::ConfigParser;

/// TOML parser implementation.
///
/// Datetimes have no counterpart in `ConfigValue` and are kept as strings.
///
/// # Examples
///
/// ```rust
/// use cfgrepo::adapters::TomlParser;
/// use cfgrepo::ports::ConfigParser;
///
/// let value = TomlParser::new().parse("[server]\nport = 8080").unwrap();
/// assert!(value.contains_key_fragment("port"));
/// ```
#[derive(Debug, Clone)]
pub struct TomlParser;

impl TomlParser {
    /// Creates a new TOML parser.
    pub fn new() -> Self {
        TomlParser
    }

    fn convert(value: toml::Value) -> ConfigValue {
        match value {
            toml::Value::String(s) => ConfigValue::String(s),
            toml::Value::Integer(i) => ConfigValue::Integer(i),
            toml::Value::Float(f) => ConfigValue::Float(f),
            toml::Value::Boolean(b) => ConfigValue::Bool(b),
            toml::Value::Datetime(dt) => ConfigValue::String(dt.to_string()),
            toml::Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(Self::convert).collect())
            }
            toml::Value::Table(table) => ConfigValue::Mapping(
                table
                    .into_iter()
                    .map(|(key, val)| (key, Self::convert(val)))
                    .collect(),
            ),
        }
    }
}

impl Default for TomlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for TomlParser {
    fn parse(&self, content: &str) -> Result<ConfigValue> {
        let table: toml::Table = content.parse().map_err(|e: toml::de::Error| {
            ConfigError::ParseError {
                message: format!("Failed to parse TOML: {}", e),
                source: Some(Box::new(e)),
            }
        })?;

        Ok(Self::convert(toml::Value::Table(table)))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["toml"]
    }
}
