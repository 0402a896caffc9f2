// SPDX-License-Identifier: MIT OR Apache-2.0

//! A hierarchical in-memory configuration repository.
//!
//! This crate aggregates configuration values loaded from named sources (files,
//! environment variable groups, or anything implementing `SourceResolver`) into one
//! tree addressed by source name, and exposes read, write, remove and a recursive
//! key search over it.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: Core types and the repository contract (`ConfigValue`,
//!   `ConfigRepository`, `SourceSet`, errors)
//! - **Ports**: Trait definitions for reaching sources (`SourceResolver`, `ConfigParser`)
//! - **Adapters**: File and environment variable resolvers, format parsers
//! - **Service**: `ConfigStore`, the in-memory repository itself
//!
//! # Lookup semantics
//!
//! `has` searches every mapping key at every depth for a substring, while `get`,
//! `get_or`, `try_get`, `contains_key` and indexing match top-level keys exactly.
//! A true `has` does not mean `get` will find anything.
//!
//! # Loading
//!
//! Loading a single source merges it under its logical name. Loading a list of
//! sources replaces the whole store.
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML file support (default)
//! - `env`: Enable environment variable sources (default)
//! - `json`: Enable JSON file support
//! - `toml`: Enable TOML file support
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cfgrepo::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let mut store = ConfigStore::builder()
//!     .with_base_dir("/etc/myapp")
//!     .build()?;
//!
//! // Stored as "app" and "database"; anything loaded before is dropped.
//! store.load(["app.yaml", "database.yaml"])?;
//!
//! if store.has("host") {
//!     let db = store.get_or("database", ConfigValue::Null);
//!     println!("database settings: {}", db);
//! }
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigRepository, ConfigValue, Mapping, Result, SourceSet,
    };
    pub use crate::ports::{ConfigParser, ResolvedSource, SourceResolver};
    pub use crate::service::{ConfigStore, ConfigStoreBuilder};

    pub use crate::adapters::FileResolver;

    // Re-export adapters based on feature flags
    #[cfg(feature = "env")]
    pub use crate::adapters::EnvVarResolver;
    #[cfg(feature = "json")]
    pub use crate::adapters::JsonParser;
    #[cfg(feature = "toml")]
    pub use crate::adapters::TomlParser;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::YamlParser;
}
