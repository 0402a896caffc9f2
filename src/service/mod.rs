// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the configuration repository implementation.
//!
//! This module contains `ConfigStore`, the concrete implementation of the
//! `ConfigRepository` trait, and its builder.

pub mod config_store;

// Re-export commonly used types
pub use config_store::{ConfigStore, ConfigStoreBuilder};
