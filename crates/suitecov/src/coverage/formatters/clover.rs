//! Clover XML Coverage Report Writer
//!
//! ## Clover XML Format
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <coverage generated="1760000000">
//!   <project timestamp="1760000000">
//!     <file name="src/game.rs">
//!       <line num="10" type="stmt" count="5"/>
//!       <metrics loc="10" ncloc="10" statements="1" coveredstatements="1" .../>
//!     </file>
//!     <metrics files="1" loc="10" ncloc="10" statements="1" coveredstatements="1" .../>
//!   </project>
//! </coverage>
//! ```

use super::{escape_markup, write_report_file, ReportWriter};
use crate::coverage::{CoverageData, CoverageSummary, FileCoverage};
use crate::result::CoverageResult;
use std::fmt::Write;
use std::path::Path;

/// Clover XML format report writer
#[derive(Debug, Clone, Default)]
pub struct CloverWriter {
    project_name: Option<String>,
}

impl CloverWriter {
    /// Create a new Clover writer
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `name` attribute of the `<project>` element
    #[must_use]
    pub fn with_project_name(mut self, name: impl Into<String>) -> Self {
        self.project_name = Some(name.into());
        self
    }

    /// Generate the Clover XML document for a given Unix timestamp
    #[must_use]
    pub fn generate(&self, data: &CoverageData, timestamp: i64) -> String {
        let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        xml.push('\n');
        let _ = writeln!(xml, r#"<coverage generated="{timestamp}">"#);

        match &self.project_name {
            Some(name) => {
                let _ = writeln!(
                    xml,
                    r#"  <project timestamp="{}" name="{}">"#,
                    timestamp,
                    escape_markup(name)
                );
            }
            None => {
                let _ = writeln!(xml, r#"  <project timestamp="{timestamp}">"#);
            }
        }

        let mut loc_total = 0u64;
        for (path, file) in data.files() {
            let _ = writeln!(xml, r#"    <file name="{}">"#, escape_markup(path));

            for (number, line) in file.lines() {
                let _ = writeln!(
                    xml,
                    r#"      <line num="{}" type="stmt" count="{}"/>"#,
                    number, line.hits
                );
            }

            let loc = Self::lines_of_code(file);
            loc_total += u64::from(loc);
            let summary = file.summary();
            let _ = writeln!(
                xml,
                r#"      <metrics loc="{loc}" ncloc="{loc}" {}/>"#,
                Self::metric_attributes(&summary)
            );
            xml.push_str("    </file>\n");
        }

        let summary = data.summary();
        let _ = writeln!(
            xml,
            r#"    <metrics files="{}" loc="{loc_total}" ncloc="{loc_total}" {}/>"#,
            summary.files,
            Self::metric_attributes(&summary)
        );
        xml.push_str("  </project>\n");
        xml.push_str("</coverage>\n");

        xml
    }

    /// Highest tracked line number, the best available stand-in for file length
    fn lines_of_code(file: &FileCoverage) -> u32 {
        file.lines().keys().next_back().copied().unwrap_or(0)
    }

    fn metric_attributes(summary: &CoverageSummary) -> String {
        format!(
            r#"classes="0" methods="0" coveredmethods="0" conditionals="0" coveredconditionals="0" statements="{total}" coveredstatements="{covered}" elements="{total}" coveredelements="{covered}""#,
            total = summary.total_lines,
            covered = summary.covered_lines,
        )
    }
}

impl ReportWriter for CloverWriter {
    fn write(&self, data: &CoverageData, target: &Path) -> CoverageResult<()> {
        let xml = self.generate(data, chrono::Utc::now().timestamp());
        write_report_file(target, &xml)
    }
}
