//! Source inclusion filter
//!
//! Whitelist and blacklist rules over directories and explicit files. When a
//! whitelist exists it wins: only whitelisted files are collected. Otherwise
//! every file is collected unless blacklisted.

use crate::result::{CoverageError, CoverageResult};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Inclusion-state operations an instrumentation engine exposes
pub trait SourceFilter {
    /// Whitelist every file under a directory
    fn add_directory_to_whitelist(&mut self, dir: &Path) -> CoverageResult<()>;

    /// Whitelist explicit files
    fn add_files_to_whitelist(&mut self, files: &[PathBuf]) -> CoverageResult<()>;

    /// Blacklist every file under a directory
    fn add_directory_to_blacklist(&mut self, dir: &Path) -> CoverageResult<()>;

    /// Blacklist explicit files
    fn add_files_to_blacklist(&mut self, files: &[PathBuf]) -> CoverageResult<()>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct PathRules {
    dirs: Vec<PathBuf>,
    files: BTreeSet<PathBuf>,
}

impl PathRules {
    fn is_empty(&self) -> bool {
        self.dirs.is_empty() && self.files.is_empty()
    }

    fn matches(&self, path: &Path) -> bool {
        self.files.contains(path) || self.dirs.iter().any(|dir| path.starts_with(dir))
    }

    fn add_dir(&mut self, dir: &Path) -> CoverageResult<()> {
        if dir.as_os_str().is_empty() {
            return Err(CoverageError::config("filter directory path is empty"));
        }
        if !self.dirs.iter().any(|d| d == dir) {
            self.dirs.push(dir.to_path_buf());
        }
        Ok(())
    }

    fn add_files(&mut self, files: &[PathBuf]) -> CoverageResult<()> {
        if let Some(empty) = files.iter().find(|f| f.as_os_str().is_empty()) {
            return Err(CoverageError::config(format!(
                "filter file path is empty: {}",
                empty.display()
            )));
        }
        self.files.extend(files.iter().cloned());
        Ok(())
    }
}

/// Default path-based filter used by [`RecordingEngine`](super::RecordingEngine)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFilter {
    whitelist: PathRules,
    blacklist: PathRules,
}

impl PathFilter {
    /// Create a filter that includes everything
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a file should be collected
    #[must_use]
    pub fn includes(&self, file: &Path) -> bool {
        if !self.whitelist.is_empty() {
            return self.whitelist.matches(file);
        }
        !self.blacklist.matches(file)
    }

    /// Whether any whitelist rule is configured
    #[must_use]
    pub fn has_whitelist(&self) -> bool {
        !self.whitelist.is_empty()
    }

    /// Whether any blacklist rule is configured
    #[must_use]
    pub fn has_blacklist(&self) -> bool {
        !self.blacklist.is_empty()
    }
}

impl SourceFilter for PathFilter {
    fn add_directory_to_whitelist(&mut self, dir: &Path) -> CoverageResult<()> {
        self.whitelist.add_dir(dir)
    }

    fn add_files_to_whitelist(&mut self, files: &[PathBuf]) -> CoverageResult<()> {
        self.whitelist.add_files(files)
    }

    fn add_directory_to_blacklist(&mut self, dir: &Path) -> CoverageResult<()> {
        self.blacklist.add_dir(dir)
    }

    fn add_files_to_blacklist(&mut self, files: &[PathBuf]) -> CoverageResult<()> {
        self.blacklist.add_files(files)
    }
}
