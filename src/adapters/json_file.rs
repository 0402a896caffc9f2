// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON configuration parser.

use crate::domain::{ConfigError, ConfigValue, Result};
use crate::ports::ConfigParser;

/// JSON parser implementation.
///
/// # Examples
///
/// ```rust
/// use cfgrepo::adapters::JsonParser;
/// use cfgrepo::ports::ConfigParser;
///
/// let value = JsonParser::new().parse(r#"{"name": "svc"}"#).unwrap();
/// assert_eq!(value.get("name").and_then(|v| v.as_str()), Some("svc"));
/// ```
#[derive(Debug, Clone)]
pub struct JsonParser;

impl JsonParser {
    /// Creates a new JSON parser.
    pub fn new() -> Self {
        JsonParser
    }

    fn convert(value: serde_json::Value) -> ConfigValue {
        match value {
            serde_json::Value::Null => ConfigValue::Null,
            serde_json::Value::Bool(b) => ConfigValue::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => ConfigValue::String(s),
            serde_json::Value::Array(items) => {
                ConfigValue::Sequence(items.into_iter().map(Self::convert).collect())
            }
            serde_json::Value::Object(map) => ConfigValue::Mapping(
                map.into_iter()
                    .map(|(key, val)| (key, Self::convert(val)))
                    .collect(),
            ),
        }
    }
}

impl Default for JsonParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for JsonParser {
    fn parse(&self, content: &str) -> Result<ConfigValue> {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse JSON: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self::convert(value))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["json"]
    }
}
