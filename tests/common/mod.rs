// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared helpers for integration tests.

#![allow(dead_code)]

use cfgrepo::domain::{ConfigError, ConfigValue, Result};
use cfgrepo::ports::{ResolvedSource, SourceResolver};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A mock resolver with predefined sources.
///
/// The logical name of a source is its identifier up to the first dot, so
/// `app.conf` is stored under `app`.
#[derive(Debug, Clone, Default)]
pub struct MockResolver {
    values: HashMap<String, ConfigValue>,
    invalid: Vec<String>,
    calls: Arc<AtomicUsize>,
}

impl MockResolver {
    /// Creates an empty mock resolver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a source that resolves to `value`.
    pub fn with_source(mut self, id: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(id.into(), value.into());
        self
    }

    /// Adds a source that resolves with a `SourceInvalid` error.
    pub fn with_invalid_source(mut self, id: impl Into<String>) -> Self {
        self.invalid.push(id.into());
        self
    }

    /// Returns a shared counter of `resolve` calls.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl SourceResolver for MockResolver {
    fn name(&self) -> &str {
        "mock"
    }

    fn resolve(&self, source: &str) -> Result<ResolvedSource> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.invalid.iter().any(|id| id == source) {
            return Err(ConfigError::invalid(source, "mock invalid source"));
        }

        let name = source.split('.').next().unwrap_or(source);
        self.values
            .get(source)
            .map(|value| ResolvedSource::new(name, value.clone()))
            .ok_or_else(|| ConfigError::unavailable(source, "mock source not found"))
    }
}

/// Builds a mapping value from key/value pairs.
pub fn mapping<V: Into<ConfigValue>>(entries: Vec<(&str, V)>) -> ConfigValue {
    entries.into_iter().collect()
}

/// Writes a file into `dir` and returns its path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}
