//! Suite runner that drives the lifecycle bus.
//!
//! Each unit is bracketed by before-unit and after-unit events; the suite is
//! closed by one after-suite event carrying the tally and run parameters.

use crate::coverage::Probe;
use crate::event::{LifecycleBus, PhaseEvent, SuiteEvent, SuiteLog, UnitEvent, UnitOutcome};
use crate::result::CoverageResult;
use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

type UnitBody = Box<dyn FnMut(&Probe) -> Result<(), String>>;

/// A named, ordered collection of units
#[derive(Debug, Default)]
pub struct Suite {
    /// Suite name
    pub name: String,
    /// Units in execution order
    pub units: Vec<Unit>,
}

impl Suite {
    /// Create an empty suite
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: Vec::new(),
        }
    }

    /// Append a unit
    pub fn add_unit(&mut self, unit: Unit) {
        self.units.push(unit);
    }

    /// Append a unit, builder style
    #[must_use]
    pub fn with_unit(mut self, unit: Unit) -> Self {
        self.units.push(unit);
        self
    }

    /// Number of units
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }
}

/// Smallest execution boundary tracked for coverage
pub struct Unit {
    title: String,
    body: UnitBody,
    skipped: bool,
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("title", &self.title)
            .field("skipped", &self.skipped)
            .finish_non_exhaustive()
    }
}

impl Unit {
    /// Create a unit; an `Err` from the body marks it failed
    pub fn new<F>(title: impl Into<String>, body: F) -> Self
    where
        F: FnMut(&Probe) -> Result<(), String> + 'static,
    {
        Self {
            title: title.into(),
            body: Box::new(body),
            skipped: false,
        }
    }

    /// Mark the unit skipped; its body never runs
    #[must_use]
    pub const fn skipped(mut self) -> Self {
        self.skipped = true;
        self
    }

    /// Unit title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Whether the unit is skipped
    #[must_use]
    pub const fn is_skipped(&self) -> bool {
        self.skipped
    }
}

/// Result of running a single unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitResult {
    /// Unit title
    pub title: String,
    /// How the unit ended
    pub outcome: UnitOutcome,
    /// Failure message
    pub error: Option<String>,
    /// Body duration
    pub duration: Duration,
}

impl UnitResult {
    /// Whether the unit failed
    #[must_use]
    pub fn failed(&self) -> bool {
        self.outcome == UnitOutcome::Failed
    }
}

/// Results from running a suite
#[derive(Debug, Clone)]
pub struct SuiteResults {
    /// Suite name
    pub suite_name: String,
    /// Per-unit results in execution order
    pub results: Vec<UnitResult>,
    /// Outcome tally
    pub log: SuiteLog,
    /// Whether every unit ran
    pub completed: bool,
    /// Total duration
    pub duration: Duration,
}

impl SuiteResults {
    /// Check that no unit failed
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        !self.log.has_failures()
    }

    /// Failed units
    #[must_use]
    pub fn failures(&self) -> Vec<&UnitResult> {
        self.results.iter().filter(|r| r.failed()).collect()
    }
}

/// Runs suites against a lifecycle bus
#[derive(Debug, Default)]
pub struct SuiteRunner {
    /// Stop after the first failed unit
    pub fail_fast: bool,
    parameters: BTreeMap<String, String>,
    probe: Probe,
}

impl SuiteRunner {
    /// Create a runner with a detached probe
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable fail-fast mode
    #[must_use]
    pub const fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    /// Probe handed to every unit body
    #[must_use]
    pub fn with_probe(mut self, probe: Probe) -> Self {
        self.probe = probe;
        self
    }

    /// Run parameter forwarded with the after-suite event
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let _ = self.parameters.insert(key.into(), value.into());
        self
    }

    /// Run parameters
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Run every unit, emitting lifecycle events along the way.
    ///
    /// A failing unit body is recorded and the run continues. An error from a
    /// lifecycle handler aborts the run and is returned as is; no after-suite
    /// event is emitted in that case.
    pub fn run(&self, suite: &mut Suite, bus: &mut LifecycleBus) -> CoverageResult<SuiteResults> {
        let start = Instant::now();
        let mut log = SuiteLog::default();
        let mut results = Vec::with_capacity(suite.units.len());
        let mut completed = true;
        let total = suite.unit_count();

        tracing::debug!(suite = %suite.name, units = total, "running suite");

        for unit in &mut suite.units {
            bus.emit(&PhaseEvent::BeforeUnit(UnitEvent::new(unit.title.clone())))?;

            let unit_start = Instant::now();
            let (outcome, error) = if unit.skipped {
                (UnitOutcome::Skipped, None)
            } else {
                match (unit.body)(&self.probe) {
                    Ok(()) => (UnitOutcome::Passed, None),
                    Err(message) => (UnitOutcome::Failed, Some(message)),
                }
            };
            let duration = unit_start.elapsed();

            bus.emit(&PhaseEvent::AfterUnit(
                UnitEvent::new(unit.title.clone()).with_outcome(outcome),
            ))?;

            log.record(outcome);
            results.push(UnitResult {
                title: unit.title.clone(),
                outcome,
                error,
                duration,
            });

            if self.fail_fast && outcome == UnitOutcome::Failed {
                completed = results.len() == total;
                break;
            }
        }

        bus.emit(&PhaseEvent::AfterSuite(SuiteEvent::new(
            log,
            self.parameters.clone(),
            completed,
        )))?;

        Ok(SuiteResults {
            suite_name: suite.name.clone(),
            results,
            log,
            completed,
            duration: start.elapsed(),
        })
    }
}
