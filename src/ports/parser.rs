// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration parser trait definition.
//!
//! This module defines the `ConfigParser` trait, which turns the raw content of a
//! configuration file in some format (YAML, JSON, TOML, ...) into a `ConfigValue`
//! tree.

use crate::domain::{ConfigValue, Result};

/// A trait for parsing configuration content into a value tree.
///
/// Unlike a flattening parser, the nesting of the source document is kept as is:
/// a YAML document such as
///
/// ```yaml
/// database:
///   host: localhost
///   port: 5432
/// ```
///
/// becomes a mapping with a single `database` key whose value is itself a mapping.
///
/// # Examples
///
/// ```rust
/// use cfgrepo::ports::ConfigParser;
/// use cfgrepo::domain::{ConfigValue, Result};
///
/// struct LinesParser;
///
/// impl ConfigParser for LinesParser {
///     fn parse(&self, content: &str) -> Result<ConfigValue> {
///         Ok(ConfigValue::from(content.lines().collect::<Vec<_>>()))
///     }
///
///     fn supported_extensions(&self) -> &[&str] {
///         &["lines"]
///     }
/// }
///
/// let value = LinesParser.parse("a\nb").unwrap();
/// assert_eq!(value.as_sequence().map(|s| s.len()), Some(2));
/// assert!(LinesParser.supports("LINES"));
/// ```
pub trait ConfigParser: Send + Sync {
    /// Parses configuration content into a value tree.
    ///
    /// # Returns
    ///
    /// * `Ok(ConfigValue)` - The document as a value tree
    /// * `Err(ConfigError::ParseError)` - The content is not valid for this format
    fn parse(&self, content: &str) -> Result<ConfigValue>;

    /// Returns the file extensions handled by this parser, without the leading dot.
    fn supported_extensions(&self) -> &[&str];

    /// Returns true if this parser handles the given extension (case-insensitive).
    fn supports(&self, extension: &str) -> bool {
        self.supported_extensions()
            .iter()
            .any(|ext| ext.eq_ignore_ascii_case(extension))
    }
}
