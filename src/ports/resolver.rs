// SPDX-License-Identifier: MIT OR Apache-2.0

//! Value source resolver trait definition.
//!
//! A resolver turns a source identifier (a file path, an environment prefix, ...)
//! into a logical name and the value tree that source yields. The repository stores
//! each resolved source under its logical name.

use crate::domain::{ConfigValue, Result};

/// The outcome of resolving one source.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSource {
    /// The top-level key the value is stored under.
    pub name: String,
    /// The value the source yielded.
    pub value: ConfigValue,
}

impl ResolvedSource {
    /// Creates a new resolved source.
    pub fn new(name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// A trait for resolving source identifiers into values.
///
/// Resolution must be repeatable: the repository resolves a source again on every
/// load and simply overwrites what it stored before.
///
/// # Errors
///
/// Implementations report a source that cannot be reached or read as
/// `ConfigError::SourceUnavailable`, and a source whose content cannot be turned
/// into a value as `ConfigError::SourceInvalid`.
///
/// # Examples
///
/// ```rust
/// use cfgrepo::ports::{ResolvedSource, SourceResolver};
/// use cfgrepo::domain::{ConfigValue, Result};
///
/// struct Constant;
///
/// impl SourceResolver for Constant {
///     fn name(&self) -> &str {
///         "constant"
///     }
///
///     fn resolve(&self, source: &str) -> Result<ResolvedSource> {
///         Ok(ResolvedSource::new(source, ConfigValue::from(true)))
///     }
/// }
///
/// let resolved = Constant.resolve("flag").unwrap();
/// assert_eq!(resolved.name, "flag");
/// ```
pub trait SourceResolver: Send + Sync {
    /// Returns a short name for this kind of resolver, used in logs.
    fn name(&self) -> &str;

    /// Resolves one source identifier.
    fn resolve(&self, source: &str) -> Result<ResolvedSource>;
}
