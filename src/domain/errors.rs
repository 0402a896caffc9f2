// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the configuration repository.
//!
//! This module defines the error types that can occur when resolving configuration
//! sources or reading values out of the repository. All errors use `thiserror`.

use thiserror::Error;

/// The main error type for configuration operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use cfgrepo::domain::errors::ConfigError;
///
/// fn lookup() -> Result<String, ConfigError> {
///     Err(ConfigError::ConfigKeyNotFound {
///         key: "database".to_string(),
///     })
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The requested top-level key is not present in the repository.
    #[error("Configuration key not found: {key}")]
    ConfigKeyNotFound {
        /// The key that was not found
        key: String,
    },

    /// Failed to convert a configuration value to the requested type.
    #[error(
        "Failed to convert configuration value for key '{key}' to type {target_type}: {source}"
    )]
    TypeConversionError {
        /// The key being converted
        key: String,
        /// The target type name
        target_type: String,
        /// The underlying conversion error
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A configuration source could not be reached or read.
    #[error("Configuration source '{source_name}' unavailable: {message}")]
    SourceUnavailable {
        /// The identifier of the source that failed
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A configuration source was read but did not yield a usable value.
    #[error("Configuration source '{source_name}' invalid: {message}")]
    SourceInvalid {
        /// The identifier of the source that failed
        source_name: String,
        /// The error message
        message: String,
        /// The underlying error, if any
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to parse configuration content.
    #[error("Failed to parse configuration: {message}")]
    ParseError {
        /// The error message
        message: String,
        /// The underlying parsing error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// An I/O error occurred while reading configuration.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ConfigError {
    /// Creates a `SourceUnavailable` error without an underlying cause.
    pub fn unavailable(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::SourceUnavailable {
            source_name: source_name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Creates a `SourceInvalid` error without an underlying cause.
    pub fn invalid(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::SourceInvalid {
            source_name: source_name.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Returns true if this error came from resolving a configuration source.
    pub fn is_source_error(&self) -> bool {
        matches!(
            self,
            ConfigError::SourceUnavailable { .. } | ConfigError::SourceInvalid { .. }
        )
    }
}

/// A specialized Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
