// SPDX-License-Identifier: MIT OR Apache-2.0

//! The argument accepted by `load`.
//!
//! Loading one source merges it into the repository, loading a list of sources
//! replaces the repository contents. `SourceSet` keeps the two cases apart so the
//! branch is visible at the call site and inside the repository.

use std::path::{Path, PathBuf};

/// One source identifier or an ordered list of them.
///
/// # Examples
///
/// ```
/// use cfgrepo::domain::SourceSet;
///
/// assert!(matches!(SourceSet::from("app.yaml"), SourceSet::One(_)));
/// assert!(matches!(SourceSet::from(vec!["app.yaml", "db.yaml"]), SourceSet::Many(_)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceSet {
    /// A single source, merged into the existing contents.
    One(String),
    /// An ordered list of sources that replaces the existing contents.
    Many(Vec<String>),
}

impl SourceSet {
    /// Returns the identifiers in load order.
    pub fn identifiers(&self) -> Vec<&str> {
        match self {
            SourceSet::One(id) => vec![id.as_str()],
            SourceSet::Many(ids) => ids.iter().map(String::as_str).collect(),
        }
    }
}

impl From<&str> for SourceSet {
    fn from(id: &str) -> Self {
        SourceSet::One(id.to_string())
    }
}

impl From<String> for SourceSet {
    fn from(id: String) -> Self {
        SourceSet::One(id)
    }
}

impl From<&Path> for SourceSet {
    fn from(path: &Path) -> Self {
        SourceSet::One(path.to_string_lossy().into_owned())
    }
}

impl From<PathBuf> for SourceSet {
    fn from(path: PathBuf) -> Self {
        SourceSet::from(path.as_path())
    }
}

impl From<&PathBuf> for SourceSet {
    fn from(path: &PathBuf) -> Self {
        SourceSet::from(path.as_path())
    }
}

impl From<Vec<&str>> for SourceSet {
    fn from(ids: Vec<&str>) -> Self {
        SourceSet::Many(ids.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for SourceSet {
    fn from(ids: Vec<String>) -> Self {
        SourceSet::Many(ids)
    }
}

impl From<Vec<PathBuf>> for SourceSet {
    fn from(paths: Vec<PathBuf>) -> Self {
        SourceSet::Many(
            paths
                .iter()
                .map(|p| p.to_string_lossy().into_owned())
                .collect(),
        )
    }
}

impl From<&[&str]> for SourceSet {
    fn from(ids: &[&str]) -> Self {
        SourceSet::Many(ids.iter().map(|id| id.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SourceSet {
    fn from(ids: [&str; N]) -> Self {
        SourceSet::Many(ids.iter().map(|id| id.to_string()).collect())
    }
}
