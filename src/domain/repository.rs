// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration repository trait definition.
//!
//! This module defines the `ConfigRepository` trait, the main interface for reading,
//! writing and loading configuration values.
//!
//! # Lookup semantics
//!
//! The repository offers two kinds of lookup that do **not** agree with each other:
//!
//! - [`ConfigRepository::has`] is a recursive *substring* search over every mapping
//!   key at every depth.
//! - [`ConfigRepository::get`], [`ConfigRepository::get_or`],
//!   [`ConfigRepository::try_get`] and [`ConfigRepository::contains_key`] are *exact*
//!   matches on top-level keys only.
//!
//! `has("host")` being true says nothing about whether `get("host")` finds anything:
//! the match may be a nested key, or a longer key such as `"hostname"`.

use crate::domain::{ConfigError, ConfigValue, Result, SourceSet};

/// The main configuration repository trait.
///
/// # Examples
///
/// ```rust
/// use cfgrepo::prelude::*;
///
/// let mut store = ConfigStore::new();
/// store.set("db", [("host", "localhost")].into_iter().collect::<ConfigValue>());
///
/// assert!(store.has("host"));
/// assert!(store.get("host").is_none());
/// assert!(store.get("db").is_some());
/// ```
pub trait ConfigRepository {
    /// Returns true if any key at any depth contains `fragment` as a substring.
    ///
    /// Top-level keys and the keys of every nested mapping are tested, including
    /// mappings held inside sequences. Scalar values are never tested. The match is
    /// case-sensitive, and the empty fragment matches any key.
    fn has(&self, fragment: &str) -> bool;

    /// Returns the value stored under the exact top-level `key`.
    fn get(&self, key: &str) -> Option<&ConfigValue>;

    /// Returns a copy of the value under the exact top-level `key`, or `default`.
    ///
    /// A key holding the null value counts as unset and yields `default`.
    fn get_or(&self, key: &str, default: ConfigValue) -> ConfigValue {
        match self.get(key) {
            Some(value) if !value.is_null() => value.clone(),
            _ => default,
        }
    }

    /// Returns the value under the exact top-level `key`, failing if it is missing.
    ///
    /// This is the checked counterpart of indexing: unlike [`ConfigRepository::get_or`]
    /// a missing key is an error, not a fallback.
    fn try_get(&self, key: &str) -> Result<&ConfigValue> {
        self.get(key).ok_or_else(|| ConfigError::ConfigKeyNotFound {
            key: key.to_string(),
        })
    }

    /// Returns true if the exact top-level `key` holds a non-null value.
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some_and(|value| !value.is_null())
    }

    /// Inserts or overwrites the top-level `key`. No other key is touched.
    fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> &mut Self;

    /// Removes the top-level `key`. Removing a missing key does nothing.
    fn remove(&mut self, key: &str) -> &mut Self;

    /// Resolves one source and stores it under its logical name.
    ///
    /// Existing keys other than that name are left as they are.
    fn load_one(&mut self, source: &str) -> Result<()>;

    /// Replaces the whole contents with the given sources, in order.
    ///
    /// The repository is cleared first. Sources are then resolved one at a time; if
    /// one fails, the sources before it stay loaded and the error is returned.
    fn load_many<S: AsRef<str>>(&mut self, sources: &[S]) -> Result<()>;

    /// Loads one source (merge) or a list of sources (replace).
    ///
    /// Dispatches to [`ConfigRepository::load_one`] or [`ConfigRepository::load_many`]
    /// depending on the shape of `sources`.
    fn load(&mut self, sources: impl Into<SourceSet>) -> Result<()> {
        match sources.into() {
            SourceSet::One(source) => self.load_one(&source),
            SourceSet::Many(sources) => self.load_many(sources.as_slice()),
        }
    }
}
