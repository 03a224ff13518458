//! HTML Coverage Report Writer
//!
//! Writes a directory tree: `index.html` with one summary row per file, and
//! one page per source file under `files/` listing every tracked line with its
//! hit count and the units that executed it.

use super::{escape_markup, write_report_file, CoverageLevel, ReportWriter};
use crate::coverage::{CoverageData, CoverageSummary, FileCoverage};
use crate::result::{CoverageError, CoverageResult};
use std::fmt::Write;
use std::path::Path;

const STYLE: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse}\
td,th{padding:2px 8px;border-bottom:1px solid #ddd;text-align:left}\
.low{background:#f2dede}.medium{background:#fcf8e3}.high{background:#dff0d8}\
tr.covered td.code{background:#dff0d8}tr.uncovered td.code{background:#f2dede}\
td.num{text-align:right;color:#888}pre{margin:0}";

/// HTML directory-tree report writer
#[derive(Debug, Clone)]
pub struct HtmlWriter {
    title: String,
    low_upper_bound: f64,
    high_lower_bound: f64,
}

impl Default for HtmlWriter {
    fn default() -> Self {
        Self {
            title: "Code Coverage".to_string(),
            low_upper_bound: 35.0,
            high_lower_bound: 70.0,
        }
    }
}

impl HtmlWriter {
    /// Create an HTML writer with default thresholds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the low/high coverage bounds used for coloring
    #[must_use]
    pub const fn with_bounds(mut self, low_upper_bound: f64, high_lower_bound: f64) -> Self {
        self.low_upper_bound = low_upper_bound;
        self.high_lower_bound = high_lower_bound;
        self
    }

    /// Page file name for the `position`-th tracked file, relative to the report root
    ///
    /// The position prefix keeps names distinct when two paths share a slug.
    #[must_use]
    pub fn page_name(position: usize, source: &str) -> String {
        let slug: String = source
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("files/{position}_{slug}.html")
    }

    /// Render the index page
    #[must_use]
    pub fn render_index(&self, data: &CoverageData) -> String {
        let summary = data.summary();
        let mut body = String::new();

        let _ = writeln!(
            body,
            "<h1>{}</h1>\n<p class=\"{}\">Lines: {:.2}% ({}/{}) in {} files</p>",
            escape_markup(&self.title),
            self.level(&summary).css_class(),
            summary.coverage_percent(),
            summary.covered_lines,
            summary.total_lines,
            summary.files
        );

        body.push_str("<table>\n<tr><th>File</th><th>Lines</th><th>Coverage</th></tr>\n");
        for (position, (path, file)) in data.files().iter().enumerate() {
            let file_summary = file.summary();
            let _ = writeln!(
                body,
                "<tr class=\"{}\"><td><a href=\"{}\">{}</a></td><td>{}/{}</td><td>{:.2}%</td></tr>",
                self.level(&file_summary).css_class(),
                escape_markup(&Self::page_name(position, path)),
                escape_markup(path),
                file_summary.covered_lines,
                file_summary.total_lines,
                file_summary.coverage_percent()
            );
        }
        body.push_str("</table>\n");

        if !data.units().is_empty() {
            body.push_str("<h2>Units</h2>\n<ul>\n");
            for unit in data.units() {
                let _ = writeln!(body, "<li>{}</li>", escape_markup(unit));
            }
            body.push_str("</ul>\n");
        }

        Self::document(&self.title, &body)
    }

    /// Render one source file page; `source` is the file text when readable
    #[must_use]
    pub fn render_file(&self, path: &str, file: &FileCoverage, source: Option<&str>) -> String {
        let summary = file.summary();
        let mut body = String::new();

        let _ = writeln!(
            body,
            "<p><a href=\"../index.html\">{}</a></p>\n<h1>{}</h1>\n<p class=\"{}\">Lines: {:.2}% ({}/{})</p>",
            escape_markup(&self.title),
            escape_markup(path),
            self.level(&summary).css_class(),
            summary.coverage_percent(),
            summary.covered_lines,
            summary.total_lines
        );
        body.push_str("<table>\n<tr><th>Line</th><th>Hits</th><th>Covered by</th><th>Code</th></tr>\n");

        match source {
            Some(text) => {
                let mut last = 0u32;
                for (number, code) in (1..=u32::MAX).zip(text.lines()) {
                    Self::render_row(&mut body, file, number, code);
                    last = number;
                }
                // tracked lines past the end of a stale or shorter source
                for number in file.lines().keys().filter(|n| **n > last) {
                    Self::render_row(&mut body, file, *number, "");
                }
            }
            None => {
                for number in file.lines().keys() {
                    Self::render_row(&mut body, file, *number, "");
                }
            }
        }
        body.push_str("</table>\n");

        Self::document(path, &body)
    }

    fn render_row(body: &mut String, file: &FileCoverage, number: u32, code: &str) {
        let (class, hits, covered_by) = match file.line(number) {
            Some(line) if line.is_covered() => (
                "covered",
                line.hits.to_string(),
                line.covered_by.iter().cloned().collect::<Vec<_>>().join(", "),
            ),
            Some(_) => ("uncovered", "0".to_string(), String::new()),
            None => ("", String::new(), String::new()),
        };
        let _ = writeln!(
            body,
            "<tr class=\"{class}\"><td class=\"num\">{number}</td><td class=\"num\">{hits}</td><td>{}</td><td class=\"code\"><pre>{}</pre></td></tr>",
            escape_markup(&covered_by),
            escape_markup(code)
        );
    }

    fn level(&self, summary: &CoverageSummary) -> CoverageLevel {
        CoverageLevel::classify(
            summary.coverage_percent(),
            self.low_upper_bound,
            self.high_lower_bound,
        )
    }

    fn document(title: &str, body: &str) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n",
            escape_markup(title)
        )
    }
}

impl ReportWriter for HtmlWriter {
    fn write(&self, data: &CoverageData, target: &Path) -> CoverageResult<()> {
        if target.is_file() {
            return Err(CoverageError::report(
                target.display().to_string(),
                "HTML report target must be a directory",
            ));
        }

        write_report_file(&target.join("index.html"), &self.render_index(data))?;
        for (position, (path, file)) in data.files().iter().enumerate() {
            let source = std::fs::read_to_string(path).ok();
            let page = self.render_file(path, file, source.as_deref());
            write_report_file(&target.join(Self::page_name(position, path)), &page)?;
        }
        Ok(())
    }
}
