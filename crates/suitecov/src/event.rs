//! Suite lifecycle events and the bus that delivers them.
//!
//! The execution engine emits one [`PhaseEvent`] per transition. Handlers
//! subscribe to a single [`SuitePhase`] and are invoked synchronously, in
//! subscription order, on the thread that drives the suite.

use crate::result::CoverageResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle phase a handler can subscribe to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SuitePhase {
    /// A unit is about to run
    BeforeUnit,
    /// A unit has finished
    AfterUnit,
    /// The whole suite has finished
    AfterSuite,
}

impl SuitePhase {
    /// Bus name of the phase
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BeforeUnit => "before-unit",
            Self::AfterUnit => "after-unit",
            Self::AfterSuite => "after-suite",
        }
    }
}

impl fmt::Display for SuitePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of a single unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitOutcome {
    /// Unit passed
    Passed,
    /// Unit failed
    Failed,
    /// Unit was skipped
    Skipped,
}

/// Event for a unit boundary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitEvent {
    title: String,
    outcome: Option<UnitOutcome>,
}

impl UnitEvent {
    /// Create an event for the unit with the given title
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            outcome: None,
        }
    }

    /// Attach the unit outcome (only meaningful after the unit ran)
    #[must_use]
    pub const fn with_outcome(mut self, outcome: UnitOutcome) -> Self {
        self.outcome = Some(outcome);
        self
    }

    /// Human-readable unit title
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Unit outcome, if known
    #[must_use]
    pub const fn outcome(&self) -> Option<UnitOutcome> {
        self.outcome
    }
}

/// Per-suite tally of unit outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteLog {
    /// Passed units
    pub passed: usize,
    /// Failed units
    pub failed: usize,
    /// Skipped units
    pub skipped: usize,
}

impl SuiteLog {
    /// Count one unit outcome
    pub fn record(&mut self, outcome: UnitOutcome) {
        match outcome {
            UnitOutcome::Passed => self.passed += 1,
            UnitOutcome::Failed => self.failed += 1,
            UnitOutcome::Skipped => self.skipped += 1,
        }
    }

    /// Total units counted
    #[must_use]
    pub const fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// Whether any unit failed
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Event fired once when the suite ends
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteEvent {
    log: SuiteLog,
    parameters: BTreeMap<String, String>,
    completed: bool,
}

impl SuiteEvent {
    /// Create a suite-end event
    #[must_use]
    pub fn new(log: SuiteLog, parameters: BTreeMap<String, String>, completed: bool) -> Self {
        Self {
            log,
            parameters,
            completed,
        }
    }

    /// Unit outcome tally
    #[must_use]
    pub const fn log(&self) -> &SuiteLog {
        &self.log
    }

    /// Free-form suite parameters
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, String> {
        &self.parameters
    }

    /// Whether every unit ran
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        self.completed
    }
}

/// A lifecycle transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhaseEvent {
    /// Unit start
    BeforeUnit(UnitEvent),
    /// Unit stop
    AfterUnit(UnitEvent),
    /// Suite end
    AfterSuite(SuiteEvent),
}

impl PhaseEvent {
    /// Phase this event belongs to
    #[must_use]
    pub const fn phase(&self) -> SuitePhase {
        match self {
            Self::BeforeUnit(_) => SuitePhase::BeforeUnit,
            Self::AfterUnit(_) => SuitePhase::AfterUnit,
            Self::AfterSuite(_) => SuitePhase::AfterSuite,
        }
    }
}

/// Receives lifecycle events for one phase
pub trait PhaseHandler {
    /// Handle an event; an error aborts the suite run
    fn handle(&mut self, event: &PhaseEvent) -> CoverageResult<()>;
}

impl<F> PhaseHandler for F
where
    F: FnMut(&PhaseEvent) -> CoverageResult<()>,
{
    fn handle(&mut self, event: &PhaseEvent) -> CoverageResult<()> {
        self(event)
    }
}

/// Subscription side of a lifecycle bus
pub trait EventBus {
    /// Register a handler for one phase
    fn subscribe(&mut self, phase: SuitePhase, handler: Box<dyn PhaseHandler>);
}

/// In-process synchronous lifecycle bus
#[derive(Default)]
pub struct LifecycleBus {
    handlers: BTreeMap<SuitePhase, Vec<Box<dyn PhaseHandler>>>,
}

impl fmt::Debug for LifecycleBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: BTreeMap<&str, usize> = self
            .handlers
            .iter()
            .map(|(phase, handlers)| (phase.name(), handlers.len()))
            .collect();
        f.debug_struct("LifecycleBus")
            .field("handlers", &counts)
            .finish()
    }
}

impl LifecycleBus {
    /// Create an empty bus
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of handlers subscribed to a phase
    #[must_use]
    pub fn subscriber_count(&self, phase: SuitePhase) -> usize {
        self.handlers.get(&phase).map_or(0, Vec::len)
    }

    /// Number of handlers across all phases
    #[must_use]
    pub fn total_subscribers(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    /// Deliver an event to every handler of its phase.
    ///
    /// Stops at the first handler error and returns it.
    pub fn emit(&mut self, event: &PhaseEvent) -> CoverageResult<()> {
        if let Some(handlers) = self.handlers.get_mut(&event.phase()) {
            for handler in handlers.iter_mut() {
                handler.handle(event)?;
            }
        }
        Ok(())
    }
}

impl EventBus for LifecycleBus {
    fn subscribe(&mut self, phase: SuitePhase, handler: Box<dyn PhaseHandler>) {
        self.handlers.entry(phase).or_default().push(handler);
    }
}
