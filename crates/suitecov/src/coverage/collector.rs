//! Recording Engine
//!
//! In-process [`InstrumentationEngine`]: code under test reports executed lines
//! through a [`Probe`], and hits are attributed to the window that was open
//! when they were flushed.

use super::probe::HitBuffer;
use super::{CoverageData, InstrumentationEngine, PathFilter, Probe, SourceFilter};
use crate::result::{CoverageError, CoverageResult};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Coverage engine fed by probes
#[derive(Debug, Default)]
pub struct RecordingEngine {
    /// Inclusion filter
    filter: PathFilter,
    /// Accumulated coverage
    data: CoverageData,
    /// Label of the open window
    window: Option<String>,
    /// Buffer shared with every probe
    buffer: Rc<RefCell<HitBuffer>>,
    /// Number of windows closed so far
    windows_closed: usize,
}

impl RecordingEngine {
    /// Create an engine with an include-everything filter
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine fed by an existing probe and its clones.
    ///
    /// Lines the probe declared or hit before the engine existed are kept;
    /// undeclared hits are discarded when the first window opens.
    #[must_use]
    pub fn attached(probe: &Probe) -> Self {
        Self {
            buffer: probe.buffer(),
            ..Self::default()
        }
    }

    /// Create a probe feeding this engine
    #[must_use]
    pub fn probe(&self) -> Probe {
        Probe::new(Rc::clone(&self.buffer))
    }

    /// Check if a window is open
    #[must_use]
    pub fn is_collecting(&self) -> bool {
        self.window.is_some()
    }

    /// Label of the open window
    #[must_use]
    pub fn current_window(&self) -> Option<&str> {
        self.window.as_deref()
    }

    /// Number of windows closed so far
    #[must_use]
    pub const fn windows_closed(&self) -> usize {
        self.windows_closed
    }

    /// Number of buffer flushes performed
    #[must_use]
    pub fn flush_count(&self) -> usize {
        self.buffer.borrow().flush_count()
    }

    /// The configured filter
    #[must_use]
    pub const fn path_filter(&self) -> &PathFilter {
        &self.filter
    }

    fn fold_declarations(&mut self) {
        let declared = self.buffer.borrow_mut().take_declared();
        for (file, line) in declared {
            if self.filter.includes(Path::new(&file)) {
                self.data.declare_line(&file, line);
            }
        }
    }
}

impl InstrumentationEngine for RecordingEngine {
    fn start(&mut self, label: &str) -> CoverageResult<()> {
        if let Some(open) = &self.window {
            return Err(CoverageError::WindowAlreadyOpen {
                open: open.clone(),
                requested: label.to_string(),
            });
        }

        let dropped = self.buffer.borrow_mut().discard_hits();
        if dropped > 0 {
            tracing::debug!(dropped, "discarded hits recorded outside a collection window");
        }

        tracing::debug!(window = label, "collection window opened");
        self.data.add_unit(label);
        self.window = Some(label.to_string());
        Ok(())
    }

    fn stop(&mut self) -> CoverageResult<()> {
        let label = self.window.take().ok_or(CoverageError::NoOpenWindow)?;

        self.fold_declarations();
        let hits = self.buffer.borrow_mut().take_hits();
        let mut excluded = 0usize;
        for ((file, line), count) in hits {
            if self.filter.includes(Path::new(&file)) {
                self.data.record_hits(&file, line, count, Some(&label));
            } else {
                excluded += 1;
            }
        }

        self.windows_closed += 1;
        tracing::debug!(window = %label, excluded, "collection window closed");
        Ok(())
    }

    fn filter(&mut self) -> &mut dyn SourceFilter {
        &mut self.filter
    }

    fn data(&mut self) -> &CoverageData {
        self.fold_declarations();
        &self.data
    }
}
