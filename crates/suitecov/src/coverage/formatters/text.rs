//! Text Coverage Report Writer
//!
//! Human-readable summary, optionally colored by coverage band:
//!
//! ```text
//! Code Coverage Report:
//!   2026-10-19 12:00:00
//!
//!  Summary:
//!   Files:  2
//!   Lines:   60.00% (3/5)
//!
//! src/game.rs
//!   Lines:  66.67% (  2/  3)
//! ```

use super::{write_report_file, CoverageLevel, ReportWriter};
use crate::coverage::{CoverageData, CoverageSummary};
use crate::result::CoverageResult;
use console::style;
use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

/// Presentation parameters for the text report
#[derive(Debug, Clone, PartialEq)]
pub struct TextReportConfig {
    /// Title appended to the report header
    pub title: String,
    /// Percentages below this are "low"
    pub low_upper_bound: f64,
    /// Percentages at or above this are "high"
    pub high_lower_bound: f64,
    /// List files without any executed line
    pub show_uncovered_files: bool,
}

impl Default for TextReportConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            low_upper_bound: 35.0,
            high_lower_bound: 70.0,
            show_uncovered_files: false,
        }
    }
}

/// Text format report writer
#[derive(Debug, Clone, Default)]
pub struct TextWriter {
    config: TextReportConfig,
}

impl TextWriter {
    /// Create a text writer with the given presentation parameters
    #[must_use]
    pub fn new(config: TextReportConfig) -> Self {
        Self { config }
    }

    /// Presentation parameters
    #[must_use]
    pub const fn config(&self) -> &TextReportConfig {
        &self.config
    }

    /// Render the report
    #[must_use]
    pub fn render(&self, data: &CoverageData, colors: bool, generated_at: &str) -> String {
        let mut out = String::new();
        let summary = data.summary();

        let title = if self.config.title.is_empty() {
            String::new()
        } else {
            format!(" {}", self.config.title)
        };
        let _ = writeln!(out, "Code Coverage Report{title}:");
        let _ = writeln!(out, "  {generated_at}");
        out.push('\n');
        out.push_str(" Summary:\n");
        let _ = writeln!(out, "  Files:  {}", summary.files);
        let _ = writeln!(
            out,
            "  {}",
            self.paint(
                &format!(
                    "Lines:  {:7.2}% ({}/{})",
                    summary.coverage_percent(),
                    summary.covered_lines,
                    summary.total_lines
                ),
                &summary,
                colors
            )
        );

        for (path, file) in data.files() {
            let file_summary = file.summary();
            if file_summary.covered_lines == 0 && !self.config.show_uncovered_files {
                continue;
            }
            out.push('\n');
            let _ = writeln!(out, "{path}");
            let _ = writeln!(
                out,
                "  {}",
                self.paint(
                    &format!(
                        "Lines: {:7.2}% ({:>3}/{:>3})",
                        file_summary.coverage_percent(),
                        file_summary.covered_lines,
                        file_summary.total_lines
                    ),
                    &file_summary,
                    colors
                )
            );
        }

        out
    }

    /// Render the report into an arbitrary sink
    pub fn write_to(
        &self,
        data: &CoverageData,
        sink: &mut dyn Write,
        colors: bool,
    ) -> CoverageResult<()> {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        sink.write_all(self.render(data, colors, &generated_at).as_bytes())?;
        sink.flush()?;
        Ok(())
    }

    fn paint(&self, text: &str, summary: &CoverageSummary, colors: bool) -> String {
        let level = CoverageLevel::classify(
            summary.coverage_percent(),
            self.config.low_upper_bound,
            self.config.high_lower_bound,
        );
        let styled = style(text).force_styling(colors);
        match level {
            CoverageLevel::Low => styled.red().to_string(),
            CoverageLevel::Medium => styled.yellow().to_string(),
            CoverageLevel::High => styled.green().to_string(),
        }
    }
}

impl ReportWriter for TextWriter {
    fn write(&self, data: &CoverageData, target: &Path) -> CoverageResult<()> {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        write_report_file(target, &self.render(data, false, &generated_at))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn create_test_data() -> CoverageData {
        let mut data = CoverageData::new();
        data.record_hits("src/game.rs", 10, 4, Some("Play"));
        data.record_hits("src/game.rs", 11, 1, Some("Play"));
        data.declare_line("src/game.rs", 12);
        data.declare_line("src/unused.rs", 1);
        data
    }

    #[test]
    fn test_default_config() {
        let config = TextReportConfig::default();
        assert!(config.title.is_empty());
        assert_eq!(config.low_upper_bound, 35.0);
        assert_eq!(config.high_lower_bound, 70.0);
        assert!(!config.show_uncovered_files);
    }

    #[test]
    fn test_render_summary() {
        let output = TextWriter::default().render(&create_test_data(), false, "now");
        assert!(output.starts_with("Code Coverage Report:\n  now\n"));
        assert!(output.contains("Files:  2"));
        assert!(output.contains("Lines:    50.00% (2/4)"));
    }

    #[test]
    fn test_render_hides_uncovered_files_by_default() {
        let output = TextWriter::default().render(&create_test_data(), false, "now");
        assert!(output.contains("src/game.rs"));
        assert!(!output.contains("src/unused.rs"));
    }

    #[test]
    fn test_render_shows_uncovered_files_when_enabled() {
        let writer = TextWriter::new(TextReportConfig {
            show_uncovered_files: true,
            ..TextReportConfig::default()
        });
        let output = writer.render(&create_test_data(), false, "now");
        assert!(output.contains("src/unused.rs"));
    }

    #[test]
    fn test_render_title() {
        let writer = TextWriter::new(TextReportConfig {
            title: "nightly".to_string(),
            ..TextReportConfig::default()
        });
        let output = writer.render(&CoverageData::new(), false, "now");
        assert!(output.starts_with("Code Coverage Report nightly:"));
    }

    #[test]
    fn test_render_without_colors_has_no_escape_codes() {
        let output = TextWriter::default().render(&create_test_data(), false, "now");
        assert!(!output.contains('\u{1b}'));
    }

    #[test]
    fn test_render_with_colors_has_escape_codes() {
        let output = TextWriter::default().render(&create_test_data(), true, "now");
        assert!(output.contains('\u{1b}'));
    }

    #[test]
    fn test_empty_data_renders_full_coverage() {
        let output = TextWriter::default().render(&CoverageData::new(), false, "now");
        assert!(output.contains("Files:  0"));
        assert!(output.contains("100.00% (0/0)"));
    }

    #[test]
    fn test_write_to_sink() {
        let mut sink = Vec::new();
        TextWriter::default()
            .write_to(&create_test_data(), &mut sink, false)
            .unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.contains("Summary:"));
    }
}
