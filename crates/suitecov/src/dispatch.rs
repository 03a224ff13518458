//! Report Dispatcher
//!
//! Runs every registered writer once against the collection result, in
//! registration order. A failing writer aborts the pass: later writers do not
//! run, and reports already written are left in place.

use crate::coverage::{
    CloverWriter, CoverageData, HtmlWriter, ReportWriter, SnapshotWriter, TextReportConfig,
    TextWriter,
};
use crate::registry::{ReportFormat, ReportTarget, WriterRegistry};
use crate::result::{CoverageError, CoverageResult};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Destination of a text report
pub enum TextSink<'a> {
    /// Buffered file
    File(BufWriter<File>),
    /// The dispatcher's standard output sink
    Stdout(&'a mut dyn Write),
}

impl fmt::Debug for TextSink<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(_) => f.write_str("TextSink::File"),
            Self::Stdout(_) => f.write_str("TextSink::Stdout"),
        }
    }
}

impl<'a> TextSink<'a> {
    /// Open the sink for a resolved target
    pub fn open(target: &ReportTarget, stdout: &'a mut dyn Write) -> CoverageResult<Self> {
        match target {
            ReportTarget::Stdout => Ok(Self::Stdout(stdout)),
            ReportTarget::File(path) => Self::create_file(path),
        }
    }

    fn create_file(path: &Path) -> CoverageResult<Self> {
        let report_err = |e: io::Error| CoverageError::report(path.display().to_string(), e.to_string());
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(report_err)?;
        }
        let file = File::create(path).map_err(report_err)?;
        Ok(Self::File(BufWriter::new(file)))
    }

    /// Whether the sink is standard output
    #[must_use]
    pub const fn is_stdout(&self) -> bool {
        matches!(self, Self::Stdout(_))
    }
}

impl Write for TextSink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File(file) => file.write(buf),
            Self::Stdout(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File(file) => file.flush(),
            Self::Stdout(out) => out.flush(),
        }
    }
}

/// Writer for a file-based format; `None` for text, which needs a sink
fn file_writer(format: ReportFormat) -> Option<Box<dyn ReportWriter>> {
    match format {
        ReportFormat::Clover => Some(Box::new(CloverWriter::new())),
        ReportFormat::Html => Some(Box::new(HtmlWriter::new())),
        ReportFormat::Snapshot => Some(Box::new(SnapshotWriter)),
        ReportFormat::Text => None,
    }
}

/// Fans one collection result out to every registered writer
pub struct ReportDispatcher {
    progress: Box<dyn Write>,
    stdout: Box<dyn Write>,
    colors: bool,
    text_config: TextReportConfig,
}

impl fmt::Debug for ReportDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportDispatcher")
            .field("colors", &self.colors)
            .field("text_config", &self.text_config)
            .finish_non_exhaustive()
    }
}

impl Default for ReportDispatcher {
    fn default() -> Self {
        Self {
            progress: Box::new(io::stdout()),
            stdout: Box::new(io::stdout()),
            colors: console::colors_enabled(),
            text_config: TextReportConfig::default(),
        }
    }
}

impl ReportDispatcher {
    /// Dispatcher writing progress and stdout reports to process stdout
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Send progress lines elsewhere
    #[must_use]
    pub fn with_progress(mut self, progress: Box<dyn Write>) -> Self {
        self.progress = progress;
        self
    }

    /// Send standard-output text reports elsewhere
    #[must_use]
    pub fn with_stdout(mut self, stdout: Box<dyn Write>) -> Self {
        self.stdout = stdout;
        self
    }

    /// Color text reports written to standard output
    #[must_use]
    pub const fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Text report parameters
    #[must_use]
    pub const fn text_config(&self) -> &TextReportConfig {
        &self.text_config
    }

    /// Run every writer in registration order
    pub fn dispatch(&mut self, data: &CoverageData, writers: &WriterRegistry) -> CoverageResult<()> {
        for entry in writers {
            let target = entry.target();
            writeln!(self.progress, "generating {target}...")?;
            self.progress.flush()?;
            tracing::info!(format = %entry.format(), target = %target, "writing coverage report");

            match file_writer(entry.format()) {
                Some(writer) => writer.write(data, Path::new(entry.path()))?,
                None => self.write_text(data, &target)?,
            }
        }
        Ok(())
    }

    fn write_text(&mut self, data: &CoverageData, target: &ReportTarget) -> CoverageResult<()> {
        let writer = TextWriter::new(self.text_config.clone());
        let mut sink = TextSink::open(target, &mut *self.stdout)?;
        let colors = self.colors && sink.is_stdout();
        writer.write_to(data, &mut sink, colors)
    }
}
