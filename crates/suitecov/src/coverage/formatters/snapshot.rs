//! Native snapshot writer
//!
//! Serializes the full collection result as versioned JSON so another run
//! can load it back and merge or re-render it.

use super::{write_report_file, ReportWriter};
use crate::coverage::CoverageData;
use crate::result::{CoverageError, CoverageResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current snapshot schema version
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized collection result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageSnapshot {
    /// Schema version
    pub version: u32,
    /// Local time the snapshot was written
    pub generated_at: String,
    /// Coverage data
    pub data: CoverageData,
}

impl CoverageSnapshot {
    /// Wrap coverage data in a snapshot stamped with the current time
    #[must_use]
    pub fn new(data: CoverageData) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            generated_at: chrono::Local::now().to_rfc3339(),
            data,
        }
    }

    /// Load a snapshot previously written by [`SnapshotWriter`]
    pub fn load(path: &Path) -> CoverageResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let snapshot: Self = serde_json::from_str(&content)?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(CoverageError::config(format!(
                "unsupported snapshot version {} in {} (expected {})",
                snapshot.version,
                path.display(),
                SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot)
    }
}

/// Writes a [`CoverageSnapshot`] as pretty JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotWriter;

impl ReportWriter for SnapshotWriter {
    fn write(&self, data: &CoverageData, target: &Path) -> CoverageResult<()> {
        let json = serde_json::to_string_pretty(&CoverageSnapshot::new(data.clone()))?;
        write_report_file(target, &json)
    }
}
