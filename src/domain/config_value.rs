// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dynamically shaped configuration values.
//!
//! This module provides the `ConfigValue` type, a recursive value that can hold
//! anything a configuration source may produce: nothing at all, a scalar, an
//! ordered sequence, or a mapping from string keys to further values.

use crate::domain::errors::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// A mapping from string keys to configuration values.
pub type Mapping = BTreeMap<String, ConfigValue>;

/// A recursive configuration value.
///
/// No schema is imposed: any shape may be stored and nested to any depth.
///
/// # Examples
///
/// ```
/// use cfgrepo::domain::ConfigValue;
///
/// let db: ConfigValue = [
///     ("host", ConfigValue::from("localhost")),
///     ("port", ConfigValue::from(5432)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(db.get("port").and_then(ConfigValue::as_i64), Some(5432));
/// assert!(db.contains_key_fragment("os"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// The absent value.
    #[default]
    Null,
    /// A boolean scalar.
    Bool(bool),
    /// An integer scalar.
    Integer(i64),
    /// A floating point scalar.
    Float(f64),
    /// A string scalar.
    String(String),
    /// An ordered sequence of values.
    Sequence(Vec<ConfigValue>),
    /// A mapping from string keys to values.
    Mapping(Mapping),
}

impl ConfigValue {
    /// Returns true if this is the absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Returns true for strings, numbers and booleans.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ConfigValue::Bool(_)
                | ConfigValue::Integer(_)
                | ConfigValue::Float(_)
                | ConfigValue::String(_)
        )
    }

    /// Returns the string slice if this is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean if this is a boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an integer scalar.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as an `f64`. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(n) => Some(*n),
            ConfigValue::Integer(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the elements if this is a sequence.
    pub fn as_sequence(&self) -> Option<&[ConfigValue]> {
        match self {
            ConfigValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a mapping.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            ConfigValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a direct child of a mapping by exact key.
    ///
    /// Returns `None` for non-mapping values.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Returns a short name for the shape of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            ConfigValue::Null => "null",
            ConfigValue::Bool(_) => "boolean",
            ConfigValue::Integer(_) => "integer",
            ConfigValue::Float(_) => "float",
            ConfigValue::String(_) => "string",
            ConfigValue::Sequence(_) => "sequence",
            ConfigValue::Mapping(_) => "mapping",
        }
    }

    /// Returns true if any mapping key inside this value contains `fragment`.
    ///
    /// The walk is depth-first and pre-order: each mapping key is tested before
    /// its value is descended into, and mappings nested inside sequences are
    /// visited too. Scalar contents and sequence positions are never tested.
    /// The match is a plain, case-sensitive substring test.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgrepo::domain::ConfigValue;
    ///
    /// let servers = ConfigValue::from(vec![
    ///     [("hostname", ConfigValue::from("primary"))].into_iter().collect::<ConfigValue>(),
    /// ]);
    /// assert!(servers.contains_key_fragment("name"));
    /// assert!(!servers.contains_key_fragment("primary"));
    /// ```
    pub fn contains_key_fragment(&self, fragment: &str) -> bool {
        match self {
            ConfigValue::Mapping(map) => map
                .iter()
                .any(|(key, value)| key.contains(fragment) || value.contains_key_fragment(fragment)),
            ConfigValue::Sequence(items) => items
                .iter()
                .any(|item| item.contains_key_fragment(fragment)),
            _ => false,
        }
    }

    /// Parses the text form of a scalar into any type that implements `FromStr`.
    ///
    /// `key` is only used for error reporting.
    ///
    /// # Examples
    ///
    /// ```
    /// use cfgrepo::domain::ConfigValue;
    /// use std::net::IpAddr;
    ///
    /// let value = ConfigValue::from("127.0.0.1");
    /// let ip: IpAddr = value.parse("bind").unwrap();
    /// assert_eq!(ip.to_string(), "127.0.0.1");
    /// ```
    pub fn parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        if !self.is_scalar() {
            return Err(ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: format!("cannot parse a {} value", self.type_name()).into(),
            });
        }

        self.to_string()
            .parse::<T>()
            .map_err(|e| ConfigError::TypeConversionError {
                key: key.to_string(),
                target_type: std::any::type_name::<T>().to_string(),
                source: Box::new(e),
            })
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Null => Ok(()),
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Integer(n) => write!(f, "{}", n),
            ConfigValue::Float(n) => write!(f, "{}", n),
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Sequence(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            ConfigValue::Mapping(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, value)?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(n: i32) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<i64> for ConfigValue {
    fn from(n: i64) -> Self {
        ConfigValue::Integer(n)
    }
}

impl From<u32> for ConfigValue {
    fn from(n: u32) -> Self {
        ConfigValue::Integer(i64::from(n))
    }
}

impl From<f64> for ConfigValue {
    fn from(n: f64) -> Self {
        ConfigValue::Float(n)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConfigValue::Null, Into::into)
    }
}

impl<T: Into<ConfigValue>> From<Vec<T>> for ConfigValue {
    fn from(items: Vec<T>) -> Self {
        ConfigValue::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl From<Mapping> for ConfigValue {
    fn from(map: Mapping) -> Self {
        ConfigValue::Mapping(map)
    }
}

impl<V: Into<ConfigValue>> From<HashMap<String, V>> for ConfigValue {
    fn from(map: HashMap<String, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ConfigValue::Mapping(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}
