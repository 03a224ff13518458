//! Writer Registry
//!
//! Maps requested output options to `{path, format}` entries. Entry order is
//! registration order, which is also the order writers run at suite end.

use crate::result::{CoverageError, CoverageResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

/// Report format produced by a writer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// Clover XML
    Clover,
    /// HTML directory tree
    Html,
    /// Serialized native snapshot
    Snapshot,
    /// Human-readable text
    Text,
}

impl ReportFormat {
    /// Format name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Clover => "clover",
            Self::Html => "html",
            Self::Snapshot => "snapshot",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A recognized coverage output option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputOption {
    /// `--coverage-clover <path>`
    CoverageClover,
    /// `--coverage-html <dir>`
    CoverageHtml,
    /// `--coverage-snapshot <path>` (alias `--coverage-php`)
    CoverageSnapshot,
    /// `--coverage-text [<path>]`
    CoverageText,
}

impl OutputOption {
    /// All options, in registration order
    pub const ALL: [Self; 4] = [
        Self::CoverageClover,
        Self::CoverageHtml,
        Self::CoverageSnapshot,
        Self::CoverageText,
    ];

    /// Option name without leading dashes
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CoverageClover => "coverage-clover",
            Self::CoverageHtml => "coverage-html",
            Self::CoverageSnapshot => "coverage-snapshot",
            Self::CoverageText => "coverage-text",
        }
    }

    /// Format this option registers
    #[must_use]
    pub const fn format(self) -> ReportFormat {
        match self {
            Self::CoverageClover => ReportFormat::Clover,
            Self::CoverageHtml => ReportFormat::Html,
            Self::CoverageSnapshot => ReportFormat::Snapshot,
            Self::CoverageText => ReportFormat::Text,
        }
    }

    /// Whether the option value may be omitted
    #[must_use]
    pub const fn value_is_optional(self) -> bool {
        matches!(self, Self::CoverageText)
    }
}

impl fmt::Display for OutputOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "--{}", self.name())
    }
}

impl FromStr for OutputOption {
    type Err = CoverageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_start_matches('-') {
            "coverage-clover" => Ok(Self::CoverageClover),
            "coverage-html" => Ok(Self::CoverageHtml),
            "coverage-snapshot" | "coverage-php" => Ok(Self::CoverageSnapshot),
            "coverage-text" => Ok(Self::CoverageText),
            other => Err(CoverageError::config(format!(
                "unknown coverage output option '{other}'"
            ))),
        }
    }
}

/// Where a report is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportTarget {
    /// Process standard output
    Stdout,
    /// A file or directory path
    File(PathBuf),
}

impl ReportTarget {
    /// Resolve a text-report path: empty, `-`, `+` or `stdout` (any case)
    /// mean standard output.
    #[must_use]
    pub fn for_text(path: &str) -> Self {
        if stdout_sentinel().is_match(path) {
            Self::Stdout
        } else {
            Self::File(PathBuf::from(path))
        }
    }

    /// Whether this is standard output
    #[must_use]
    pub const fn is_stdout(&self) -> bool {
        matches!(self, Self::Stdout)
    }
}

impl fmt::Display for ReportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdout => f.write_str("standard output"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

fn stdout_sentinel() -> &'static Regex {
    static SENTINEL: OnceLock<Regex> = OnceLock::new();
    SENTINEL.get_or_init(|| Regex::new(r"(?i)^([-+]?|stdout)$").expect("valid sentinel pattern"))
}

/// One requested report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterEntry {
    path: String,
    format: ReportFormat,
}

impl WriterEntry {
    /// Create an entry
    #[must_use]
    pub fn new(path: impl Into<String>, format: ReportFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    /// Path exactly as requested
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Report format
    #[must_use]
    pub const fn format(&self) -> ReportFormat {
        self.format
    }

    /// Resolved target; only the text format honours the stdout sentinel
    #[must_use]
    pub fn target(&self) -> ReportTarget {
        match self.format {
            ReportFormat::Text => ReportTarget::for_text(&self.path),
            _ => ReportTarget::File(PathBuf::from(&self.path)),
        }
    }
}

/// Ordered set of requested reports
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriterRegistry {
    entries: Vec<WriterEntry>,
}

impl WriterRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a report for an option
    pub fn register(&mut self, option: OutputOption, path: impl Into<String>) {
        let entry = WriterEntry::new(path, option.format());
        tracing::debug!(option = option.name(), path = entry.path(), "coverage writer registered");
        self.entries.push(entry);
    }

    /// Register a report by option name, rejecting unknown names
    pub fn register_named(&mut self, option: &str, path: impl Into<String>) -> CoverageResult<()> {
        let option: OutputOption = option.parse()?;
        self.register(option, path);
        Ok(())
    }

    /// Whether no report was requested
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of requested reports
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Entries in registration order
    pub fn iter(&self) -> std::slice::Iter<'_, WriterEntry> {
        self.entries.iter()
    }

    /// Entries in registration order
    #[must_use]
    pub fn entries(&self) -> &[WriterEntry] {
        &self.entries
    }
}

impl<'a> IntoIterator for &'a WriterRegistry {
    type Item = &'a WriterEntry;
    type IntoIter = std::slice::Iter<'a, WriterEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
