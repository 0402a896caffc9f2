// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-backed source resolver.
//!
//! This module provides a resolver that reads a configuration file, picks a parser
//! from the file extension, and names the result after the file's base name without
//! extension (`/etc/app/db.yaml` is stored under `db`).

use crate::domain::{ConfigError, Result};
use crate::ports::{ConfigParser, ResolvedSource, SourceResolver};
use directories::ProjectDirs;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Maximum allowed file size for configuration files (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Source resolver for configuration files.
///
/// Relative identifiers are resolved against an optional base directory. The parser
/// is chosen by extension from the registered parsers; the defaults depend on the
/// enabled features (`yaml`, `json`, `toml`).
///
/// # Examples
///
/// ```rust,no_run
/// use cfgrepo::adapters::FileResolver;
/// use cfgrepo::ports::SourceResolver;
///
/// let resolver = FileResolver::new().with_base_dir("/etc/myapp");
/// let resolved = resolver.resolve("database.yaml").unwrap();
/// assert_eq!(resolved.name, "database");
/// ```
pub struct FileResolver {
    /// Directory that relative identifiers are joined onto
    base_dir: Option<PathBuf>,
    /// Registered parsers, tried in order
    parsers: Vec<Box<dyn ConfigParser>>,
}

impl FileResolver {
    /// Creates a resolver with every parser enabled by the crate features.
    pub fn new() -> Self {
        let mut resolver = Self::empty();

        #[cfg(feature = "yaml")]
        {
            resolver = resolver.with_parser(Box::new(crate::adapters::YamlParser::new()));
        }
        #[cfg(feature = "json")]
        {
            resolver = resolver.with_parser(Box::new(crate::adapters::JsonParser::new()));
        }
        #[cfg(feature = "toml")]
        {
            resolver = resolver.with_parser(Box::new(crate::adapters::TomlParser::new()));
        }

        resolver
    }

    /// Creates a resolver with no parsers registered.
    pub fn empty() -> Self {
        Self {
            base_dir: None,
            parsers: Vec::new(),
        }
    }

    /// Creates a resolver rooted at the OS-appropriate configuration directory.
    ///
    /// This uses the `directories` crate, so on Linux `("myapp", "com.example")`
    /// resolves `db.yaml` to `~/.config/myapp/db.yaml`.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use cfgrepo::adapters::FileResolver;
    ///
    /// let resolver = FileResolver::from_default_location("myapp", "com.example").unwrap();
    /// ```
    pub fn from_default_location(app_name: &str, qualifier: &str) -> Result<Self> {
        let proj_dirs = ProjectDirs::from(qualifier, "", app_name).ok_or_else(|| {
            ConfigError::unavailable(app_name, "Failed to determine project directories")
        })?;

        Ok(Self::new().with_base_dir(proj_dirs.config_dir()))
    }

    /// Registers an additional parser. Earlier parsers win on shared extensions.
    pub fn with_parser(mut self, parser: Box<dyn ConfigParser>) -> Self {
        self.parsers.push(parser);
        self
    }

    /// Sets the directory that relative identifiers are resolved against.
    pub fn with_base_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.base_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Returns the base directory, if any.
    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }

    /// Returns the full path an identifier refers to.
    pub fn locate(&self, source: &str) -> PathBuf {
        let path = Path::new(source);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Returns the logical name for a path: its base name without extension.
    pub fn logical_name(path: &Path) -> Option<String> {
        path.file_stem()
            .and_then(|stem| stem.to_str())
            .filter(|stem| !stem.is_empty())
            .map(str::to_string)
    }

    fn parser_for(&self, source: &str, path: &Path) -> Result<&dyn ConfigParser> {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

        self.parsers
            .iter()
            .find(|parser| parser.supports(extension))
            .map(|parser| &**parser)
            .ok_or_else(|| {
                ConfigError::invalid(
                    source,
                    format!("No parser registered for extension '{}'", extension),
                )
            })
    }

    fn read(&self, source: &str, path: &Path) -> Result<String> {
        let metadata = fs::metadata(path).map_err(|e| ConfigError::SourceUnavailable {
            source_name: source.to_string(),
            message: "Failed to read file metadata".to_string(),
            source: Some(Box::new(e)),
        })?;

        if !metadata.is_file() {
            return Err(ConfigError::unavailable(source, "Not a regular file"));
        }

        if metadata.len() > MAX_FILE_SIZE {
            return Err(ConfigError::unavailable(
                source,
                format!(
                    "Configuration file too large: {} bytes (max {} bytes)",
                    metadata.len(),
                    MAX_FILE_SIZE
                ),
            ));
        }

        fs::read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => ConfigError::SourceInvalid {
                source_name: source.to_string(),
                message: "Configuration file is not valid UTF-8".to_string(),
                source: Some(Box::new(e)),
            },
            _ => ConfigError::SourceUnavailable {
                source_name: source.to_string(),
                message: "Failed to read configuration file".to_string(),
                source: Some(Box::new(e)),
            },
        })
    }
}

impl Default for FileResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FileResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extensions: Vec<&str> = self
            .parsers
            .iter()
            .flat_map(|parser| parser.supported_extensions().iter().copied())
            .collect();

        f.debug_struct("FileResolver")
            .field("base_dir", &self.base_dir)
            .field("extensions", &extensions)
            .finish()
    }
}

impl SourceResolver for FileResolver {
    fn name(&self) -> &str {
        "file"
    }

    fn resolve(&self, source: &str) -> Result<ResolvedSource> {
        let path = self.locate(source);

        let name = Self::logical_name(&path)
            .ok_or_else(|| ConfigError::invalid(source, "Path has no file name to use as key"))?;
        let content = self.read(source, &path)?;
        let parser = self.parser_for(source, &path)?;

        let value = parser
            .parse(&content)
            .map_err(|e| ConfigError::SourceInvalid {
                source_name: source.to_string(),
                message: "Failed to parse configuration file".to_string(),
                source: Some(Box::new(e)),
            })?;

        tracing::debug!(
            "Resolved file source '{}' as '{}' ({})",
            path.display(),
            name,
            value.type_name()
        );

        Ok(ResolvedSource { name, value })
    }
}
