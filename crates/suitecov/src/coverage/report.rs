//! Collection Result
//!
//! Line-level coverage accumulated across every collection window of a run.
//! This is what report writers consume.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Coverage summary statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSummary {
    /// Number of tracked files
    pub files: usize,
    /// Number of executable lines
    pub total_lines: usize,
    /// Number of executed lines (hits > 0)
    pub covered_lines: usize,
}

impl CoverageSummary {
    /// Coverage percentage
    #[must_use]
    pub fn coverage_percent(&self) -> f64 {
        if self.total_lines == 0 {
            return 100.0; // Vacuously true
        }
        (self.covered_lines as f64 / self.total_lines as f64) * 100.0
    }

    /// Covered/total as a ratio in `0.0..=1.0`
    #[must_use]
    pub fn line_rate(&self) -> f64 {
        self.coverage_percent() / 100.0
    }
}

/// Per-line coverage information
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineCoverage {
    /// Number of times the line executed
    pub hits: u64,
    /// Labels of the windows (units) that executed the line
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub covered_by: BTreeSet<String>,
}

impl LineCoverage {
    /// Whether the line executed at least once
    #[must_use]
    pub const fn is_covered(&self) -> bool {
        self.hits > 0
    }
}

/// Coverage of one source file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCoverage {
    lines: BTreeMap<u32, LineCoverage>,
}

impl FileCoverage {
    /// Tracked lines keyed by line number
    #[must_use]
    pub const fn lines(&self) -> &BTreeMap<u32, LineCoverage> {
        &self.lines
    }

    /// Coverage for one line
    #[must_use]
    pub fn line(&self, number: u32) -> Option<&LineCoverage> {
        self.lines.get(&number)
    }

    /// Number of executed lines
    #[must_use]
    pub fn covered_count(&self) -> usize {
        self.lines.values().filter(|l| l.is_covered()).count()
    }

    /// Summary for this file alone
    #[must_use]
    pub fn summary(&self) -> CoverageSummary {
        CoverageSummary {
            files: 1,
            total_lines: self.lines.len(),
            covered_lines: self.covered_count(),
        }
    }
}

/// Coverage data accumulated over a run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageData {
    files: BTreeMap<String, FileCoverage>,
    units: Vec<String>,
}

impl CoverageData {
    /// Create empty coverage data
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that a line is executable without recording a hit
    pub fn declare_line(&mut self, file: &str, line: u32) {
        let _ = self
            .files
            .entry(file.to_string())
            .or_default()
            .lines
            .entry(line)
            .or_default();
    }

    /// Record hits on a line, optionally attributed to a unit
    pub fn record_hits(&mut self, file: &str, line: u32, count: u64, unit: Option<&str>) {
        let entry = self
            .files
            .entry(file.to_string())
            .or_default()
            .lines
            .entry(line)
            .or_default();
        entry.hits += count;
        if let (Some(unit), true) = (unit, count > 0) {
            let _ = entry.covered_by.insert(unit.to_string());
        }
    }

    /// Record a collection window label
    pub fn add_unit(&mut self, label: &str) {
        self.units.push(label.to_string());
    }

    /// Window labels in the order they were opened
    #[must_use]
    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Files keyed by path
    #[must_use]
    pub const fn files(&self) -> &BTreeMap<String, FileCoverage> {
        &self.files
    }

    /// Coverage of one file
    #[must_use]
    pub fn file(&self, path: &str) -> Option<&FileCoverage> {
        self.files.get(path)
    }

    /// Hit count for a line (0 when untracked)
    #[must_use]
    pub fn hit_count(&self, file: &str, line: u32) -> u64 {
        self.files
            .get(file)
            .and_then(|f| f.line(line))
            .map_or(0, |l| l.hits)
    }

    /// Whether no file is tracked
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whole-run summary
    #[must_use]
    pub fn summary(&self) -> CoverageSummary {
        self.files
            .values()
            .fold(CoverageSummary::default(), |mut acc, file| {
                acc.files += 1;
                acc.total_lines += file.lines.len();
                acc.covered_lines += file.covered_count();
                acc
            })
    }

    /// Merge another run into this one
    pub fn merge(&mut self, other: &Self) {
        for (path, file) in &other.files {
            let target = self.files.entry(path.clone()).or_default();
            for (number, line) in &file.lines {
                let entry = target.lines.entry(*number).or_default();
                entry.hits += line.hits;
                entry.covered_by.extend(line.covered_by.iter().cloned());
            }
        }
        for unit in &other.units {
            if !self.units.contains(unit) {
                self.units.push(unit.clone());
            }
        }
    }
}
