//! Suitecov: Suite-Level Code Coverage Reporting
//!
//! Collects line coverage per unit of a test suite and, once the suite ends,
//! writes it in every format the user asked for.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    SUITECOV Architecture                         │
//! ├─────────────────────────────────────────────────────────────────┤
//! │   ┌────────────┐    ┌────────────┐    ┌────────────┐            │
//! │   │ Suite      │    │ Lifecycle  │    │ Engine     │            │
//! │   │ Runner     │───►│ Bus        │───►│ (windows   │            │
//! │   │            │    │            │    │  per unit) │            │
//! │   └────────────┘    └────────────┘    └─────┬──────┘            │
//! │                                             │ after-suite       │
//! │                                       ┌─────▼──────┐            │
//! │                                       │ Dispatcher │──► Clover  │
//! │                                       │            │──► HTML    │
//! │                                       │            │──► Snapshot│
//! │                                       │            │──► Text    │
//! │                                       └────────────┘            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Coverage is inert unless at least one writer is registered: no engine is
//! built and nothing subscribes to the bus.

#![warn(missing_docs)]
// Lints are configured in workspace Cargo.toml [workspace.lints.clippy]

mod binder;
mod config;
/// Coverage collection engine, data model and report writers
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::cast_precision_loss,
    clippy::format_push_string,
    clippy::needless_raw_string_hashes
)]
pub mod coverage;
mod dispatch;
mod event;
mod harness;
mod registry;
mod result;
#[cfg(test)]
pub(crate) mod testing;

pub use binder::{BinderPhase, CoverageOrchestrator, LifecycleBinder};
pub use config::{apply_filters, FilterSet, FilterSpec};
pub use coverage::{
    CoverageData, CoverageSummary, InstrumentationEngine, PathFilter, Probe, RecordingEngine,
    ReportWriter, SourceFilter,
};
pub use dispatch::{ReportDispatcher, TextSink};
pub use event::{
    EventBus, LifecycleBus, PhaseEvent, PhaseHandler, SuiteEvent, SuiteLog, SuitePhase,
    UnitEvent, UnitOutcome,
};
pub use harness::{Suite, SuiteResults, SuiteRunner, Unit, UnitResult};
pub use registry::{OutputOption, ReportFormat, ReportTarget, WriterEntry, WriterRegistry};
pub use result::{CoverageError, CoverageResult};

/// Commonly used items
pub mod prelude {
    pub use super::{
        CoverageData, CoverageError, CoverageOrchestrator, CoverageResult, FilterSet,
        FilterSpec, InstrumentationEngine, LifecycleBus, OutputOption, Probe, RecordingEngine,
        ReportDispatcher, Suite, SuiteRunner, Unit, WriterRegistry,
    };
}
