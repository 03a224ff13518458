//! Hit buffering between code under test and the engine
//!
//! Probes increment a shared local buffer; the engine drains it when a
//! collection window closes, so hits are attributed once per window instead of
//! once per executed line.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

/// Pending hits and line declarations
#[derive(Debug, Default)]
pub(crate) struct HitBuffer {
    hits: BTreeMap<(String, u32), u64>,
    declared: BTreeSet<(String, u32)>,
    flush_count: usize,
}

impl HitBuffer {
    /// Drain pending hits
    pub(crate) fn take_hits(&mut self) -> BTreeMap<(String, u32), u64> {
        self.flush_count += 1;
        std::mem::take(&mut self.hits)
    }

    /// Drain pending line declarations
    pub(crate) fn take_declared(&mut self) -> BTreeSet<(String, u32)> {
        std::mem::take(&mut self.declared)
    }

    /// Drop pending hits recorded outside a window
    pub(crate) fn discard_hits(&mut self) -> usize {
        let dropped = self.hits.values().sum::<u64>() as usize;
        self.hits.clear();
        dropped
    }

    pub(crate) const fn flush_count(&self) -> usize {
        self.flush_count
    }
}

/// Handle through which code under test reports executed lines
///
/// Cloning a probe is cheap; all clones feed the same engine.
#[derive(Debug, Clone, Default)]
pub struct Probe {
    buffer: Rc<RefCell<HitBuffer>>,
}

impl Probe {
    pub(crate) fn new(buffer: Rc<RefCell<HitBuffer>>) -> Self {
        Self { buffer }
    }

    pub(crate) fn buffer(&self) -> Rc<RefCell<HitBuffer>> {
        Rc::clone(&self.buffer)
    }

    /// Record one execution of a line
    #[inline]
    pub fn hit(&self, file: &str, line: u32) {
        self.hit_n(file, line, 1);
    }

    /// Record `count` executions of a line
    pub fn hit_n(&self, file: &str, line: u32, count: u64) {
        *self
            .buffer
            .borrow_mut()
            .hits
            .entry((file.to_string(), line))
            .or_insert(0) += count;
    }

    /// Declare executable lines so unexecuted ones still show up in reports
    pub fn declare(&self, file: &str, lines: impl IntoIterator<Item = u32>) {
        let mut buffer = self.buffer.borrow_mut();
        for line in lines {
            let _ = buffer.declared.insert((file.to_string(), line));
        }
    }

    /// Whether any hit is waiting to be flushed
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.buffer.borrow().hits.is_empty()
    }
}
