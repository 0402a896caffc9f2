// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing source resolver and parser implementations.
//!
//! This module contains concrete implementations of the traits defined in the ports
//! layer: resolvers that turn a source identifier into a named value, and the
//! file-format parsers used by the file resolver.

pub mod file;

#[cfg(feature = "env")]
pub mod env_var;
#[cfg(feature = "json")]
pub mod json_file;
#[cfg(feature = "toml")]
pub mod toml_file;
#[cfg(feature = "yaml")]
pub mod yaml_file;

pub use file::FileResolver;

// Re-export adapters based on feature flags
#[cfg(feature = "env")]
pub use env_var::EnvVarResolver;
#[cfg(feature = "json")]
pub use json_file::JsonParser;
#[cfg(feature = "toml")]
pub use toml_file::TomlParser;
#[cfg(feature = "yaml")]
pub use yaml_file::YamlParser;
