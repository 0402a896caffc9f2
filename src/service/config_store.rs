// SPDX-License-Identifier: MIT OR Apache-2.0

//! Default configuration repository implementation.
//!
//! This module provides `ConfigStore`, an in-memory tree of configuration values
//! keyed by source name, and `ConfigStoreBuilder` for assembling one.

use crate::adapters::FileResolver;
use crate::domain::{ConfigError, ConfigRepository, ConfigValue, Mapping, Result};
use crate::ports::{ResolvedSource, SourceResolver};
use directories::ProjectDirs;
use std::collections::btree_map;
use std::fmt;
use std::ops::Index;
use std::path::{Path, PathBuf};

/// In-memory configuration repository.
///
/// The store owns one mapping from top-level keys to values of any shape. Keys are
/// usually the logical names of the sources they were loaded from. The store does
/// no locking; share it behind a lock if several threads need it.
///
/// See [`ConfigRepository`] for the difference between `has` (recursive substring
/// search) and `get` (exact top-level lookup).
///
/// # Examples
///
/// ```rust
/// use cfgrepo::prelude::*;
///
/// let mut store = ConfigStore::new();
/// store
///     .set("app", [("name", "svc")].into_iter().collect::<ConfigValue>())
///     .set("debug", true)
///     .remove("debug");
///
/// assert!(store.has("name"));
/// assert_eq!(store.get_or("debug", ConfigValue::from(false)), ConfigValue::from(false));
/// assert_eq!(store["app"].get("name"), Some(&ConfigValue::from("svc")));
/// ```
pub struct ConfigStore {
    /// Top-level keys and their values
    values: Mapping,
    /// Resolver used by `load`
    resolver: Box<dyn SourceResolver>,
}

impl ConfigStore {
    /// Creates an empty store that loads files.
    pub fn new() -> Self {
        Self::with_resolver(Box::new(FileResolver::new()))
    }

    /// Creates an empty store that loads through the given resolver.
    pub fn with_resolver(resolver: Box<dyn SourceResolver>) -> Self {
        Self {
            values: Mapping::new(),
            resolver,
        }
    }

    /// Creates a store pre-seeded with values that loads files.
    pub fn with_values(values: Mapping) -> Self {
        Self {
            values,
            resolver: Box::new(FileResolver::new()),
        }
    }

    /// Creates a new store builder.
    pub fn builder() -> ConfigStoreBuilder {
        ConfigStoreBuilder::new()
    }

    /// Returns the resolver used by `load`.
    pub fn resolver(&self) -> &dyn SourceResolver {
        self.resolver.as_ref()
    }

    /// Returns the number of top-level keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the top-level keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over the top-level entries in sorted key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, ConfigValue> {
        self.values.iter()
    }

    /// Returns a mutable reference to the value under the exact top-level `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut ConfigValue> {
        self.values.get_mut(key)
    }

    /// Removes every key.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Returns the whole tree.
    pub fn as_mapping(&self) -> &Mapping {
        &self.values
    }

    /// Consumes the store and returns the whole tree.
    pub fn into_mapping(self) -> Mapping {
        self.values
    }

    fn resolve(&self, source: &str) -> Result<ResolvedSource> {
        self.resolver.resolve(source).map_err(|e| {
            tracing::warn!(
                "Failed to resolve source '{}' with resolver '{}': {}",
                source,
                self.resolver.name(),
                e
            );
            e
        })
    }

    fn store(&mut self, resolved: ResolvedSource) {
        if self.values.contains_key(&resolved.name) {
            tracing::debug!("Overwriting configuration key '{}'", resolved.name);
        }
        self.values.insert(resolved.name, resolved.value);
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore")
            .field("values", &self.values)
            .field("resolver", &self.resolver.name())
            .finish()
    }
}

impl ConfigRepository for ConfigStore {
    fn has(&self, fragment: &str) -> bool {
        self.values
            .iter()
            .any(|(key, value)| key.contains(fragment) || value.contains_key_fragment(fragment))
    }

    fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    fn set(&mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> &mut Self {
        self.values.insert(key.into(), value.into());
        self
    }

    fn remove(&mut self, key: &str) -> &mut Self {
        self.values.remove(key);
        self
    }

    fn load_one(&mut self, source: &str) -> Result<()> {
        let resolved = self.resolve(source)?;
        tracing::debug!("Loaded source '{}' into key '{}'", source, resolved.name);
        self.store(resolved);
        Ok(())
    }

    fn load_many<S: AsRef<str>>(&mut self, sources: &[S]) -> Result<()> {
        self.values.clear();

        for source in sources {
            let resolved = self.resolve(source.as_ref())?;
            self.store(resolved);
        }

        tracing::info!(
            "Replaced configuration with {} sources ({} keys)",
            sources.len(),
            self.values.len()
        );

        Ok(())
    }
}

impl Index<&str> for ConfigStore {
    type Output = ConfigValue;

    /// Returns the value under the exact top-level `key`.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing. Use [`ConfigRepository::try_get`] to get an
    /// error instead, or [`ConfigRepository::get_or`] for a fallback.
    fn index(&self, key: &str) -> &ConfigValue {
        match self.values.get(key) {
            Some(value) => value,
            None => panic!("Configuration key not found: {}", key),
        }
    }
}

impl<'a> IntoIterator for &'a ConfigStore {
    type Item = (&'a String, &'a ConfigValue);
    type IntoIter = btree_map::Iter<'a, String, ConfigValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> Extend<(K, V)> for ConfigStore {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.values.insert(key.into(), value.into());
        }
    }
}

/// Builder for constructing a `ConfigStore`.
///
/// # Examples
///
/// ```rust
/// use cfgrepo::prelude::*;
///
/// # fn main() -> Result<()> {
/// let store = ConfigStore::builder()
///     .with_value("env", "production")
///     .with_base_dir("/etc/myapp")
///     .build()?;
/// assert!(store.contains_key("env"));
/// # Ok(())
/// # }
/// ```
pub struct ConfigStoreBuilder {
    resolver: Option<Box<dyn SourceResolver>>,
    base_dir: Option<PathBuf>,
    values: Mapping,
    sources: Vec<String>,
}

impl ConfigStoreBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            resolver: None,
            base_dir: None,
            values: Mapping::new(),
            sources: Vec::new(),
        }
    }

    /// Uses a custom resolver. Any base directory set on the builder is then ignored.
    pub fn with_resolver(mut self, resolver: Box<dyn SourceResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Loads sources from environment variables instead of files.
    #[cfg(feature = "env")]
    pub fn with_env_vars(self) -> Self {
        use crate::adapters::EnvVarResolver;
        self.with_resolver(Box::new(EnvVarResolver::new()))
    }

    /// Resolves relative file identifiers against `dir`.
    pub fn with_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Resolves relative file identifiers against the OS-appropriate configuration
    /// directory for the application.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use cfgrepo::service::ConfigStoreBuilder;
    ///
    /// # fn main() -> cfgrepo::domain::Result<()> {
    /// let store = ConfigStoreBuilder::new()
    ///     .with_default_location("myapp", "com.example")?
    ///     .with_source("database.yaml")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_default_location(self, app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::unavailable(app_name, "Failed to determine project directories")
        })?;

        Ok(self.with_base_dir(proj_dirs.config_dir()))
    }

    /// Seeds the store with a whole tree.
    pub fn with_values(mut self, values: Mapping) -> Self {
        self.values.extend(values);
        self
    }

    /// Seeds the store with one top-level value.
    pub fn with_value(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Adds a source to load, merged on top of the seeded values, when building.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.sources.push(source.into());
        self
    }

    /// Builds the store, loading any sources added with `with_source` in order.
    ///
    /// A resolver given to `with_resolver` takes precedence; the base directory is
    /// only applied to the default file resolver.
    ///
    /// # Errors
    ///
    /// Returns the first source resolution error.
    pub fn build(self) -> Result<ConfigStore> {
        let resolver = match self.resolver {
            Some(resolver) => {
                if let Some(dir) = &self.base_dir {
                    tracing::debug!(
                        "Ignoring base directory '{}' for custom resolver '{}'",
                        dir.display(),
                        resolver.name()
                    );
                }
                resolver
            }
            None => {
                let mut files = FileResolver::new();
                if let Some(dir) = self.base_dir {
                    files = files.with_base_dir(dir);
                }
                Box::new(files)
            }
        };

        let mut store = ConfigStore {
            values: self.values,
            resolver,
        };

        for source in &self.sources {
            store.load_one(source)?;
        }

        Ok(store)
    }
}

impl Default for ConfigStoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    // Mock resolver for testing
    struct MockResolver {
        values: HashMap<String, ConfigValue>,
    }

    impl MockResolver {
        fn new() -> Self {
            Self {
                values: HashMap::new(),
            }
        }

        fn with_source(mut self, id: &str, value: impl Into<ConfigValue>) -> Self {
            self.values.insert(id.to_string(), value.into());
            self
        }
    }

    impl SourceResolver for MockResolver {
        fn name(&self) -> &str {
            "mock"
        }

        fn resolve(&self, source: &str) -> Result<ResolvedSource> {
            let name = source.split('.').next().unwrap_or(source);
            self.values
                .get(source)
                .map(|value| ResolvedSource::new(name, value.clone()))
                .ok_or_else(|| ConfigError::unavailable(source, "no such source"))
        }
    }

    fn db_value() -> ConfigValue {
        [
            ("host", ConfigValue::from("localhost")),
            ("port", ConfigValue::from(5432)),
        ]
        .into_iter()
        .collect()
    }

    fn mock_store() -> ConfigStore {
        ConfigStore::with_resolver(Box::new(
            MockResolver::new()
                .with_source("app.conf", [("name", "svc")].into_iter().collect::<ConfigValue>())
                .with_source("db.conf", [("dsn", "...")].into_iter().collect::<ConfigValue>())
                .with_source("cache.conf", vec!["redis"]),
        ))
    }

    #[test]
    fn test_store_new_is_empty() {
        let store = ConfigStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert_eq!(store.resolver().name(), "file");
    }

    #[test]
    fn test_set_get_round_trip() {
        let mut store = ConfigStore::new();
        store.set("db", db_value());

        assert_eq!(store.get("db"), Some(&db_value()));
        assert_eq!(store.get_or("db", ConfigValue::Null), db_value());
    }

    #[test]
    fn test_set_overwrites_wholesale() {
        let mut store = ConfigStore::new();
        store.set("db", db_value());
        store.set("db", [("dsn", "x")].into_iter().collect::<ConfigValue>());

        assert!(store.has("dsn"));
        assert!(!store.has("host"));
    }

    #[test]
    fn test_set_and_remove_chain() {
        let mut store = ConfigStore::new();
        store.set("a", 1).set("b", 2).remove("a").set("c", 3);

        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut store = ConfigStore::new();
        store.set("a", 1);
        store.remove("missing");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_get_or_default() {
        let mut store = ConfigStore::new();
        store.set("db", db_value());
        store.remove("db");

        assert_eq!(store.get_or("db", ConfigValue::from("none")), ConfigValue::from("none"));
        assert!(store.get("db").is_none());
    }

    #[test]
    fn test_get_or_treats_null_as_unset() {
        let mut store = ConfigStore::new();
        store.set("nothing", ConfigValue::Null);

        assert_eq!(store.get_or("nothing", ConfigValue::from(7)), ConfigValue::from(7));
        assert!(!store.contains_key("nothing"));
        assert_eq!(store.try_get("nothing").unwrap(), &ConfigValue::Null);
        assert!(store.has("nothing"));
    }

    #[test]
    fn test_has_scenario() {
        let mut store = ConfigStore::new();
        store.set("db", db_value());

        assert!(store.has("host"));
        assert!(store.has("db"));
        assert!(store.has("or"));
        assert!(!store.has("HOST"));
        assert!(!store.has("localhost"));
    }

    #[test]
    fn test_has_on_empty_store() {
        let store = ConfigStore::new();
        assert!(!store.has("anything"));
        assert!(!store.has(""));
    }

    #[test]
    fn test_has_is_not_get() {
        let mut store = ConfigStore::new();
        store.set("hostname", "example.org");

        assert!(store.has("host"));
        assert!(store.get("host").is_none());
        assert!(!store.contains_key("host"));
    }

    #[test]
    fn test_try_get_missing() {
        let store = ConfigStore::new();
        assert!(matches!(
            store.try_get("missing"),
            Err(ConfigError::ConfigKeyNotFound { .. })
        ));
    }

    #[test]
    fn test_index() {
        let mut store = ConfigStore::new();
        store.set("db", db_value());
        assert_eq!(store["db"].get("port"), Some(&ConfigValue::from(5432)));
    }

    #[test]
    #[should_panic(expected = "Configuration key not found: missing")]
    fn test_index_missing_panics() {
        let store = ConfigStore::new();
        let _ = &store["missing"];
    }

    #[test]
    fn test_get_mut() {
        let mut store = ConfigStore::new();
        store.set("count", 1);
        if let Some(value) = store.get_mut("count") {
            *value = ConfigValue::from(2);
        }
        assert_eq!(store.get("count"), Some(&ConfigValue::from(2)));
    }

    #[test]
    fn test_extend_and_iter() {
        let mut store = ConfigStore::new();
        store.extend(vec![("b", 2), ("a", 1)]);

        let keys: Vec<&String> = (&store).into_iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(store.iter().count(), 2);
    }

    #[test]
    fn test_with_values_and_into_mapping() {
        let mut seed = Mapping::new();
        seed.insert("app".to_string(), ConfigValue::from("svc"));

        let store = ConfigStore::with_values(seed.clone());
        assert_eq!(store.as_mapping(), &seed);
        assert_eq!(store.into_mapping(), seed);
    }

    #[test]
    fn test_clear() {
        let mut store = ConfigStore::new();
        store.set("a", 1);
        store.clear();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_one_merges() {
        let mut store = mock_store();
        store.set("old", true);

        store.load("app.conf").unwrap();
        store.load("db.conf").unwrap();

        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["app", "db", "old"]);
    }

    #[test]
    fn test_load_many_replaces() {
        let mut store = mock_store();
        store.set("old", true);

        store.load(vec!["app.conf", "db.conf"]).unwrap();

        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["app", "db"]);
        assert!(store.has("name"));
        assert!(store.has("dsn"));
    }

    #[test]
    fn test_load_many_empty_clears() {
        let mut store = mock_store();
        store.set("old", true);

        store.load(Vec::<String>::new()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_many_failure_keeps_partial_state() {
        let mut store = mock_store();
        store.set("old", true);

        let result = store.load(["app.conf", "missing.conf", "db.conf"]);

        assert!(matches!(result, Err(ConfigError::SourceUnavailable { .. })));
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["app"]);
    }

    #[test]
    fn test_load_one_failure_leaves_store_untouched() {
        let mut store = mock_store();
        store.set("old", true);

        assert!(store.load("missing.conf").is_err());
        assert_eq!(store.keys().collect::<Vec<_>>(), vec!["old"]);
    }

    #[test]
    fn test_reload_overwrites() {
        let mut store = mock_store();
        store.load("cache.conf").unwrap();
        store.set("cache", "changed");

        store.load("cache.conf").unwrap();
        assert_eq!(store.get("cache"), Some(&ConfigValue::from(vec!["redis"])));
    }

    #[test]
    fn test_builder_defaults() {
        let store = ConfigStoreBuilder::default().build().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.resolver().name(), "file");
    }

    #[test]
    fn test_builder_seeds_and_loads() {
        let store = ConfigStore::builder()
            .with_resolver(Box::new(
                MockResolver::new().with_source("app.conf", "loaded"),
            ))
            .with_value("app", "seeded")
            .with_value("env", "test")
            .with_source("app.conf")
            .build()
            .unwrap();

        assert_eq!(store.get("app"), Some(&ConfigValue::from("loaded")));
        assert_eq!(store.get("env"), Some(&ConfigValue::from("test")));
    }

    #[test]
    fn test_builder_source_failure() {
        let result = ConfigStore::builder()
            .with_resolver(Box::new(MockResolver::new()))
            .with_source("missing.conf")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_custom_resolver_takes_precedence_over_base_dir() {
        let store = ConfigStore::builder()
            .with_base_dir("/etc/myapp")
            .with_resolver(Box::new(
                MockResolver::new().with_source("app.conf", "loaded"),
            ))
            .with_source("app.conf")
            .build()
            .unwrap();

        assert_ne!(store.resolver().name(), "file");
        assert_eq!(store.get("app"), Some(&ConfigValue::from("loaded")));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_builder_default_location_sets_base_dir() {
        // Some sandboxes have no home directory to derive the path from
        let builder = ConfigStore::builder().with_default_location("cfgrepo-test", "org.example");
        if let Ok(builder) = builder {
            let base = builder.base_dir.as_deref().unwrap();
            assert!(base.ends_with("cfgrepo-test"));
        }
    }

    #[test]
    #[cfg(feature = "env")]
    fn test_builder_with_env_vars() {
        let store = ConfigStore::builder().with_env_vars().build().unwrap();
        assert_eq!(store.resolver().name(), "env");
    }

    #[test]
    fn test_debug_output() {
        let mut store = ConfigStore::new();
        store.set("a", 1);
        let debug = format!("{:?}", store);
        assert!(debug.contains("ConfigStore"));
        assert!(debug.contains("file"));
    }
}
