//! Coverage collection and reporting
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │  Probe ──hits──► RecordingEngine ──windows──► CoverageData     │
//! │                       ▲                            │           │
//! │                  PathFilter                  ReportWriter ×4   │
//! │                                      (Clover, HTML, Snapshot,  │
//! │                                       Text)                    │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Any engine implementing [`InstrumentationEngine`] can be orchestrated;
//! [`RecordingEngine`] is the in-process default.

mod collector;
mod engine;
mod filter;
pub mod formatters;
mod probe;
mod report;

pub use collector::RecordingEngine;
pub use engine::InstrumentationEngine;
pub use filter::{PathFilter, SourceFilter};
pub use formatters::{
    CloverWriter, CoverageSnapshot, HtmlWriter, ReportWriter, SnapshotWriter, TextReportConfig,
    TextWriter,
};
pub use probe::Probe;
pub use report::{CoverageData, CoverageSummary, FileCoverage, LineCoverage};

#[cfg(test)]
mod tests;
