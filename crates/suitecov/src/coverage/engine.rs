//! Instrumentation engine interface

use super::{CoverageData, SourceFilter};
use crate::result::CoverageResult;

/// A component that measures which code executes during an open window.
///
/// Only one window may be open at a time. Calling [`start`](Self::start) with
/// a window open, or [`stop`](Self::stop) with none open, is a precondition
/// violation the engine reports as an error.
pub trait InstrumentationEngine {
    /// Open a collection window labelled with the unit title
    fn start(&mut self, label: &str) -> CoverageResult<()>;

    /// Close the open collection window
    fn stop(&mut self) -> CoverageResult<()>;

    /// Inclusion filter, mutated before collection begins
    fn filter(&mut self) -> &mut dyn SourceFilter;

    /// Coverage accumulated by every closed window
    fn data(&mut self) -> &CoverageData;
}

impl<E: InstrumentationEngine + ?Sized> InstrumentationEngine for Box<E> {
    fn start(&mut self, label: &str) -> CoverageResult<()> {
        (**self).start(label)
    }

    fn stop(&mut self) -> CoverageResult<()> {
        (**self).stop()
    }

    fn filter(&mut self) -> &mut dyn SourceFilter {
        (**self).filter()
    }

    fn data(&mut self) -> &CoverageData {
        (**self).data()
    }
}
