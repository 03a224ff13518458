//! Coverage Report Writers
//!
//! Clover XML, HTML, native snapshot, and text renderers over
//! [`CoverageData`](crate::coverage::CoverageData).

mod clover;
mod html;
mod snapshot;
mod text;

pub use clover::CloverWriter;
pub use html::HtmlWriter;
pub use snapshot::{CoverageSnapshot, SnapshotWriter, SNAPSHOT_VERSION};
pub use text::{TextReportConfig, TextWriter};

use crate::coverage::CoverageData;
use crate::result::{CoverageError, CoverageResult};
use std::path::Path;

/// Renders a collection result into one format at one target path
pub trait ReportWriter {
    /// Write the report
    fn write(&self, data: &CoverageData, target: &Path) -> CoverageResult<()>;
}

/// Coverage band used to color summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverageLevel {
    /// Below the low upper bound
    Low,
    /// Between the bounds
    Medium,
    /// At or above the high lower bound
    High,
}

impl CoverageLevel {
    /// Classify a percentage against the two bounds
    #[must_use]
    pub fn classify(percent: f64, low_upper_bound: f64, high_lower_bound: f64) -> Self {
        if percent < low_upper_bound {
            Self::Low
        } else if percent < high_lower_bound {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// CSS class name
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Escape text for XML/HTML content and attribute values
pub(crate) fn escape_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Write a report file, creating missing parent directories
pub(crate) fn write_report_file(target: &Path, content: &str) -> CoverageResult<()> {
    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| CoverageError::report(target.display().to_string(), e.to_string()))?;
    }
    std::fs::write(target, content)
        .map_err(|e| CoverageError::report(target.display().to_string(), e.to_string()))
}
