// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment variable source resolver.
//!
//! This module provides a resolver that turns every environment variable sharing a
//! prefix into one mapping. The identifier passed to `load` is the prefix itself.

use crate::domain::{ConfigError, ConfigValue, Mapping, Result};
use crate::ports::{ResolvedSource, SourceResolver};
use std::collections::HashMap;
use std::env;

/// Maximum length for environment variable keys
const MAX_ENV_KEY_LEN: usize = 512;

/// Maximum length for environment variable values
const MAX_ENV_VALUE_LEN: usize = 1048576; // 1MB

/// Source resolver for environment variables.
///
/// Resolving the prefix `APP_` collects every variable starting with `APP_`, strips
/// the prefix, and stores the result under the logical name `app` (the prefix
/// lowercased, trailing underscores trimmed). By default names are lowercased and a
/// double underscore nests, so `APP_DATABASE__HOST=localhost` becomes
/// `{"database": {"host": "localhost"}}`.
///
/// When a name is used both as a value and as a parent, as with `APP_DB` and
/// `APP_DB__HOST`, the nested mapping wins regardless of the order the variables
/// are seen in.
///
/// # Examples
///
/// ```rust
/// use cfgrepo::adapters::EnvVarResolver;
/// use cfgrepo::ports::SourceResolver;
/// use std::collections::HashMap;
///
/// let mut vars = HashMap::new();
/// vars.insert("APP_DATABASE__HOST".to_string(), "localhost".to_string());
///
/// let resolved = EnvVarResolver::with_values(vars).resolve("APP_").unwrap();
/// assert_eq!(resolved.name, "app");
/// assert!(resolved.value.contains_key_fragment("host"));
/// ```
#[derive(Debug, Clone)]
pub struct EnvVarResolver {
    /// Whether to convert keys to lowercase
    lowercase_keys: bool,
    /// Separator that splits a variable name into nested keys
    separator: Option<String>,
    /// Fixed variables used instead of the process environment
    values: Option<HashMap<String, String>>,
}

impl EnvVarResolver {
    /// Creates a resolver that reads the process environment.
    pub fn new() -> Self {
        Self {
            lowercase_keys: true,
            separator: Some("__".to_string()),
            values: None,
        }
    }

    /// Creates a resolver over a fixed set of variables instead of the process
    /// environment.
    ///
    /// **Note**: This is primarily intended for tests.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self {
            values: Some(values),
            ..Self::new()
        }
    }

    /// Sets whether to convert keys to lowercase.
    pub fn lowercase_keys(mut self, enabled: bool) -> Self {
        self.lowercase_keys = enabled;
        self
    }

    /// Sets the separator used to nest keys, or `None` to keep names flat.
    pub fn separator(mut self, separator: Option<&str>) -> Self {
        self.separator = separator.filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    /// Returns the logical name for a prefix.
    pub fn logical_name(prefix: &str) -> String {
        prefix.trim_end_matches('_').to_lowercase()
    }

    fn variables(&self) -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = match &self.values {
            Some(values) => values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            None => env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        };
        vars.sort();
        vars
    }

    fn insert_nested(target: &mut Mapping, path: &[&str], value: String) {
        match path {
            [] => {}
            [last] => {
                if let Some(ConfigValue::Mapping(_)) = target.get(*last) {
                    tracing::debug!("Keeping nested keys under '{}' over a plain value", last);
                    return;
                }
                target.insert((*last).to_string(), ConfigValue::String(value));
            }
            [first, rest @ ..] => {
                let entry = target
                    .entry((*first).to_string())
                    .or_insert_with(|| ConfigValue::Mapping(Mapping::new()));
                if !matches!(entry, ConfigValue::Mapping(_)) {
                    *entry = ConfigValue::Mapping(Mapping::new());
                }
                if let ConfigValue::Mapping(inner) = entry {
                    Self::insert_nested(inner, rest, value);
                }
            }
        }
    }
}

impl Default for EnvVarResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceResolver for EnvVarResolver {
    fn name(&self) -> &str {
        "env"
    }

    fn resolve(&self, source: &str) -> Result<ResolvedSource> {
        let name = Self::logical_name(source);
        if name.is_empty() {
            return Err(ConfigError::invalid(
                source,
                "Environment prefix does not yield a key name",
            ));
        }

        let mut mapping = Mapping::new();
        let mut count = 0usize;

        for (key, value) in self.variables() {
            if key.len() > MAX_ENV_KEY_LEN || value.len() > MAX_ENV_VALUE_LEN {
                tracing::debug!(
                    "Skipping oversized environment variable: key_len={}, value_len={}",
                    key.len(),
                    value.len()
                );
                continue;
            }

            let stripped = match key.strip_prefix(source) {
                Some(stripped) if !stripped.is_empty() => stripped,
                _ => continue,
            };

            let key = if self.lowercase_keys {
                stripped.to_lowercase()
            } else {
                stripped.to_string()
            };

            let path: Vec<&str> = match &self.separator {
                Some(separator) => key.split(separator.as_str()).collect(),
                None => vec![key.as_str()],
            };

            Self::insert_nested(&mut mapping, &path, value);
            count += 1;
        }

        tracing::debug!(
            "Resolved {} environment variables with prefix '{}' as '{}'",
            count,
            source,
            name
        );

        Ok(ResolvedSource::new(name, ConfigValue::Mapping(mapping)))
    }
}
