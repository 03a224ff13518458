//! Filter Configuration
//!
//! Declarative whitelist/blacklist rules, forwarded verbatim to the engine's
//! inclusion filter once before collection starts.

use crate::coverage::InstrumentationEngine;
use crate::result::CoverageResult;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::PathBuf;

/// Directory and file rules for one filter category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Directories whose files the rule covers
    #[serde(default, deserialize_with = "one_or_many")]
    pub dir: Vec<PathBuf>,
    /// Explicit files the rule covers
    #[serde(default, deserialize_with = "one_or_many")]
    pub file: Vec<PathBuf>,
}

impl FilterSpec {
    /// Create an empty spec
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir.push(dir.into());
        self
    }

    /// Add a file
    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file.push(file.into());
        self
    }
}

/// Whitelist and blacklist, each optional
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
    /// Included sources
    #[serde(default)]
    pub whitelist: Option<FilterSpec>,
    /// Excluded sources
    #[serde(default)]
    pub blacklist: Option<FilterSpec>,
}

impl FilterSet {
    /// Create a filter set with no rules
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the whitelist
    #[must_use]
    pub fn with_whitelist(mut self, spec: FilterSpec) -> Self {
        self.whitelist = Some(spec);
        self
    }

    /// Set the blacklist
    #[must_use]
    pub fn with_blacklist(mut self, spec: FilterSpec) -> Self {
        self.blacklist = Some(spec);
        self
    }

    /// Parse a filter set from YAML
    pub fn from_yaml_str(yaml: &str) -> CoverageResult<Self> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Whether neither category is present
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.whitelist.is_none() && self.blacklist.is_none()
    }
}

/// Prime an engine's inclusion filter.
///
/// Each configured directory is added individually; files are added in one
/// call, and only when the list is non-empty. Whitelist goes first.
pub fn apply_filters<E>(engine: &mut E, filters: &FilterSet) -> CoverageResult<()>
where
    E: InstrumentationEngine + ?Sized,
{
    let filter = engine.filter();

    if let Some(whitelist) = &filters.whitelist {
        for dir in &whitelist.dir {
            filter.add_directory_to_whitelist(dir)?;
        }
        if !whitelist.file.is_empty() {
            filter.add_files_to_whitelist(&whitelist.file)?;
        }
    }

    if let Some(blacklist) = &filters.blacklist {
        for dir in &blacklist.dir {
            filter.add_directory_to_blacklist(dir)?;
        }
        if !blacklist.file.is_empty() {
            filter.add_files_to_blacklist(&blacklist.file)?;
        }
    }

    tracing::debug!(
        whitelist = filters.whitelist.is_some(),
        blacklist = filters.blacklist.is_some(),
        "coverage filters applied"
    );
    Ok(())
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<PathBuf>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(PathBuf),
        Many(Vec<PathBuf>),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(path)) => vec![path],
        Some(OneOrMany::Many(paths)) => paths,
    })
}
