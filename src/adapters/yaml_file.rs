// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML configuration parser.
//!
//! This module provides a parser that reads YAML documents into `ConfigValue` trees.

use crate::domain::{ConfigError, ConfigValue, Mapping, Result};
use crate::ports::ConfigParser;

/// YAML parser implementation.
///
/// Nested mappings and sequences are kept as they are. Mapping keys that are not
/// strings (numbers, booleans, null) are converted to their text form; keys that are
/// themselves collections are dropped.
///
/// # Examples
///
/// ```rust
/// use cfgrepo::adapters::YamlParser;
/// use cfgrepo::ports::ConfigParser;
///
/// let parser = YamlParser::new();
/// let value = parser.parse("database:\n  host: localhost\n  port: 5432").unwrap();
/// let db = value.get("database").unwrap();
/// assert_eq!(db.get("host").and_then(|v| v.as_str()), Some("localhost"));
/// ```
#[derive(Debug, Clone)]
pub struct YamlParser;

impl YamlParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlParser
    }

    fn key_text(key: &serde_yaml::Value) -> Option<String> {
        match key {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            serde_yaml::Value::Bool(b) => Some(b.to_string()),
            serde_yaml::Value::Null => Some(String::new()),
            serde_yaml::Value::Tagged(tagged) => Self::key_text(&tagged.value),
            _ => None,
        }
    }

    /// Converts a YAML value into a configuration value.
    fn convert(value: serde_yaml::Value) -> ConfigValue {
        match value {
            serde_yaml::Value::Null => ConfigValue::Null,
            serde_yaml::Value::Bool(b) => ConfigValue::Bool(b),
            serde_yaml::Value::Number(n) => match n.as_i64() {
                Some(i) => ConfigValue::Integer(i),
                None => ConfigValue::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_yaml::Value::String(s) => ConfigValue::String(s),
            serde_yaml::Value::Sequence(seq) => {
                ConfigValue::Sequence(seq.into_iter().map(Self::convert).collect())
            }
            serde_yaml::Value::Mapping(map) => {
                let mut result = Mapping::new();
                for (key, val) in map {
                    match Self::key_text(&key) {
                        Some(key) => {
                            result.insert(key, Self::convert(val));
                        }
                        None => tracing::debug!("Skipping YAML mapping entry with a non-scalar key"),
                    }
                }
                ConfigValue::Mapping(result)
            }
            serde_yaml::Value::Tagged(tagged) => Self::convert(tagged.value),
        }
    }
}

impl Default for YamlParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigParser for YamlParser {
    fn parse(&self, content: &str) -> Result<ConfigValue> {
        let value: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
                message: format!("Failed to parse YAML: {}", e),
                source: Some(Box::new(e)),
            })?;

        Ok(Self::convert(value))
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::FileResolver;
    use crate::ports::SourceResolver;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_yaml_parser_simple() {
        let result = YamlParser::new().parse("key: value").unwrap();
        assert_eq!(result.get("key"), Some(&ConfigValue::from("value")));
    }

    #[test]
    fn test_yaml_parser_nested() {
        let yaml = r#"
app:
  database:
    connection:
      host: localhost
      port: 5432
"#;
        let result = YamlParser::new().parse(yaml).unwrap();
        let connection = result
            .get("app")
            .and_then(|v| v.get("database"))
            .and_then(|v| v.get("connection"))
            .unwrap();

        assert_eq!(connection.get("host"), Some(&ConfigValue::from("localhost")));
        assert_eq!(connection.get("port"), Some(&ConfigValue::from(5432)));
    }

    #[test]
    fn test_yaml_parser_sequence() {
        let yaml = r#"
servers:
  - server1
  - name: server2
    port: 8080
"#;
        let result = YamlParser::new().parse(yaml).unwrap();
        let servers = result.get("servers").and_then(|v| v.as_sequence()).unwrap();

        assert_eq!(servers.len(), 2);
        assert_eq!(servers[0], ConfigValue::from("server1"));
        assert_eq!(servers[1].get("port"), Some(&ConfigValue::from(8080)));
    }

    #[test]
    fn test_yaml_parser_top_level_sequence() {
        let result = YamlParser::new().parse("- a\n- b\n").unwrap();
        assert_eq!(result, ConfigValue::from(vec!["a", "b"]));
    }

    #[test]
    fn test_yaml_parser_mixed_types() {
        let yaml = r#"
string_value: hello
number_value: 42
float_value: 1.5
bool_value: true
null_value: null
"#;
        let result = YamlParser::new().parse(yaml).unwrap();

        assert_eq!(result.get("string_value"), Some(&ConfigValue::from("hello")));
        assert_eq!(result.get("number_value"), Some(&ConfigValue::from(42)));
        assert_eq!(result.get("float_value"), Some(&ConfigValue::from(1.5)));
        assert_eq!(result.get("bool_value"), Some(&ConfigValue::from(true)));
        assert_eq!(result.get("null_value"), Some(&ConfigValue::Null));
    }

    #[test]
    fn test_yaml_parser_non_string_keys() {
        let yaml = "8080: http\ntrue: yes\n";
        let result = YamlParser::new().parse(yaml).unwrap();

        assert_eq!(result.get("8080"), Some(&ConfigValue::from("http")));
        assert!(result.get("true").is_some());
    }

    #[test]
    fn test_yaml_parser_invalid() {
        let result = YamlParser::new().parse("invalid: yaml: content:");
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    fn test_yaml_parser_supported_extensions() {
        let parser = YamlParser::default();
        assert!(parser.supports("yaml"));
        assert!(parser.supports("yml"));
        assert!(!parser.supports("json"));
    }

    #[test]
    fn test_yaml_file_resolves_through_file_resolver() {
        let mut temp_file = Builder::new().prefix("database").suffix(".yaml").tempfile().unwrap();
        writeln!(temp_file, "host: localhost\nport: 5432").unwrap();

        let resolver = FileResolver::empty().with_parser(Box::new(YamlParser::new()));
        let resolved = resolver
            .resolve(temp_file.path().to_str().unwrap())
            .unwrap();

        assert!(resolved.name.starts_with("database"));
        assert_eq!(resolved.value.get("port"), Some(&ConfigValue::from(5432)));
    }
}
