//! Test doubles shared across module tests

use crate::coverage::{CoverageData, InstrumentationEngine, SourceFilter};
use crate::result::{CoverageError, CoverageResult};
use std::cell::RefCell;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// One call observed by [`MockEngine`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum EngineCall {
    Start(String),
    Stop,
    Data,
    WhitelistDir(PathBuf),
    WhitelistFiles(Vec<PathBuf>),
    BlacklistDir(PathBuf),
    BlacklistFiles(Vec<PathBuf>),
}

/// Engine that only records what it was asked to do
#[derive(Debug, Default)]
pub(crate) struct MockEngine {
    calls: Rc<RefCell<Vec<EngineCall>>>,
    data: CoverageData,
    fail_start: bool,
}

impl MockEngine {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Engine whose `start` always fails
    pub(crate) fn failing_start() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    /// Call log, shared so it outlives moving the engine
    pub(crate) fn calls(&self) -> Rc<RefCell<Vec<EngineCall>>> {
        Rc::clone(&self.calls)
    }

    fn record(&self, call: EngineCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl SourceFilter for MockEngine {
    fn add_directory_to_whitelist(&mut self, dir: &Path) -> CoverageResult<()> {
        self.record(EngineCall::WhitelistDir(dir.to_path_buf()));
        Ok(())
    }

    fn add_files_to_whitelist(&mut self, files: &[PathBuf]) -> CoverageResult<()> {
        self.record(EngineCall::WhitelistFiles(files.to_vec()));
        Ok(())
    }

    fn add_directory_to_blacklist(&mut self, dir: &Path) -> CoverageResult<()> {
        self.record(EngineCall::BlacklistDir(dir.to_path_buf()));
        Ok(())
    }

    fn add_files_to_blacklist(&mut self, files: &[PathBuf]) -> CoverageResult<()> {
        self.record(EngineCall::BlacklistFiles(files.to_vec()));
        Ok(())
    }
}

impl InstrumentationEngine for MockEngine {
    fn start(&mut self, label: &str) -> CoverageResult<()> {
        if self.fail_start {
            return Err(CoverageError::invalid_state("engine refused to start"));
        }
        self.record(EngineCall::Start(label.to_string()));
        self.data.add_unit(label);
        Ok(())
    }

    fn stop(&mut self) -> CoverageResult<()> {
        self.record(EngineCall::Stop);
        Ok(())
    }

    fn filter(&mut self) -> &mut dyn SourceFilter {
        self
    }

    fn data(&mut self) -> &CoverageData {
        self.record(EngineCall::Data);
        &self.data
    }
}

/// In-memory sink whose contents stay readable after it is boxed away
#[derive(Debug, Clone, Default)]
pub(crate) struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
