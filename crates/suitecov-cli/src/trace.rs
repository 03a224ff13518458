//! Recorded suite traces
//!
//! A trace captures what a suite did: the executable lines of each source
//! file, and per unit the lines it executed and whether it failed. Replaying
//! one drives the same lifecycle as a live run.
//!
//! ```yaml
//! name: calculator
//! sources:
//!   src/calc.rs: [1, 2, 3, 4]
//! units:
//!   - title: adds
//!     hits:
//!       src/calc.rs: [1, 2, 2]
//!   - title: divides
//!     hits: { src/calc.rs: [3] }
//!     failure: "expected an error"
//! ```

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use suitecov::{Probe, Suite, Unit};

/// One recorded unit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceUnit {
    /// Unit title
    pub title: String,
    /// Executed lines per file; a repeated line counts once per occurrence
    #[serde(default)]
    pub hits: BTreeMap<String, Vec<u32>>,
    /// Failure message when the unit failed
    #[serde(default)]
    pub failure: Option<String>,
    /// Unit did not run
    #[serde(default)]
    pub skipped: bool,
}

/// A recorded suite run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SuiteTrace {
    /// Suite name
    #[serde(default = "default_name")]
    pub name: String,
    /// Executable lines per source file
    #[serde(default)]
    pub sources: BTreeMap<String, Vec<u32>>,
    /// Units in execution order
    #[serde(default)]
    pub units: Vec<TraceUnit>,
}

fn default_name() -> String {
    "replay".to_string()
}

impl SuiteTrace {
    /// Parse and validate a trace
    pub fn from_yaml_str(yaml: &str, origin: &str) -> CliResult<Self> {
        let trace: Self =
            serde_yaml_ng::from_str(yaml).map_err(|e| CliError::trace(origin, e.to_string()))?;
        trace.validate(origin)?;
        Ok(trace)
    }

    /// Load a trace file
    pub fn load(path: &Path) -> CliResult<Self> {
        let origin = path.display().to_string();
        let text =
            std::fs::read_to_string(path).map_err(|e| CliError::trace(&origin, e.to_string()))?;
        Self::from_yaml_str(&text, &origin)
    }

    fn validate(&self, origin: &str) -> CliResult<()> {
        let all_lines = self
            .sources
            .iter()
            .chain(self.units.iter().flat_map(|unit| unit.hits.iter()));
        for (file, lines) in all_lines {
            if file.is_empty() {
                return Err(CliError::trace(origin, "empty source path"));
            }
            if lines.contains(&0) {
                return Err(CliError::trace(
                    origin,
                    format!("{file}: line numbers start at 1"),
                ));
            }
        }
        if let Some(index) = self.units.iter().position(|unit| unit.title.is_empty()) {
            return Err(CliError::trace(
                origin,
                format!("unit #{} has no title", index + 1),
            ));
        }
        Ok(())
    }

    /// Declare every executable line through the probe
    pub fn declare_sources(&self, probe: &Probe) {
        for (file, lines) in &self.sources {
            probe.declare(file, lines.iter().copied());
        }
    }

    /// Turn the trace into a runnable suite whose bodies replay the hits
    #[must_use]
    pub fn into_suite(self) -> Suite {
        let mut suite = Suite::new(self.name);
        for recorded in self.units {
            let TraceUnit {
                title,
                hits,
                failure,
                skipped,
            } = recorded;
            let unit = Unit::new(title, move |probe: &Probe| {
                for (file, lines) in &hits {
                    for &line in lines {
                        probe.hit(file, line);
                    }
                }
                failure.clone().map_or(Ok(()), Err)
            });
            suite.add_unit(if skipped { unit.skipped() } else { unit });
        }
        suite
    }
}
