// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and logic.
//!
//! This module contains the value model, the error type and the repository
//! contract. It is independent of any particular configuration source.

pub mod config_value;
pub mod errors;
pub mod repository;
pub mod source_set;

// Re-export commonly used types
pub use config_value::{ConfigValue, Mapping};
pub use errors::{ConfigError, Result};
pub use repository::ConfigRepository;
pub use source_set::SourceSet;
