//! Lifecycle Binder
//!
//! Wires an instrumentation engine to the suite lifecycle: one collection
//! window per unit, then a single dispatch pass at suite end.
//!
//! ```text
//! Primed ──before-unit──► Collecting ──after-unit──► Paused ─┐
//!    │                        ▲                              │
//!    │                        └────────before-unit───────────┘
//!    └──────────── after-suite (from any of the above) ──► Finalizing ──► Done
//! ```

use crate::config::{apply_filters, FilterSet};
use crate::coverage::InstrumentationEngine;
use crate::dispatch::ReportDispatcher;
use crate::event::{EventBus, PhaseEvent, PhaseHandler, SuiteEvent, SuitePhase, UnitEvent};
use crate::registry::WriterRegistry;
use crate::result::{CoverageError, CoverageResult};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Where the binder is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinderPhase {
    /// Engine primed, no unit seen yet
    Primed,
    /// A unit's window is open
    Collecting,
    /// Between units
    Paused,
    /// Writers are running
    Finalizing,
    /// Reports dispatched; further events are rejected
    Done,
}

struct BinderState<E> {
    engine: E,
    registry: WriterRegistry,
    dispatcher: ReportDispatcher,
    phase: BinderPhase,
}

impl<E: InstrumentationEngine> BinderState<E> {
    fn ensure_live(&self, event: SuitePhase) -> CoverageResult<()> {
        if self.phase == BinderPhase::Done {
            return Err(CoverageError::invalid_state(format!(
                "coverage already finalized, cannot handle {event}"
            )));
        }
        Ok(())
    }

    fn unit_started(&mut self, unit: &UnitEvent) -> CoverageResult<()> {
        self.ensure_live(SuitePhase::BeforeUnit)?;
        self.engine.start(unit.title())?;
        self.phase = BinderPhase::Collecting;
        tracing::debug!(unit = unit.title(), "coverage window opened");
        Ok(())
    }

    fn unit_finished(&mut self, unit: &UnitEvent) -> CoverageResult<()> {
        self.ensure_live(SuitePhase::AfterUnit)?;
        self.engine.stop()?;
        self.phase = BinderPhase::Paused;
        tracing::debug!(unit = unit.title(), "coverage window closed");
        Ok(())
    }

    fn suite_finished(&mut self, suite: &SuiteEvent) -> CoverageResult<()> {
        self.ensure_live(SuitePhase::AfterSuite)?;
        if self.phase == BinderPhase::Collecting {
            tracing::warn!("suite ended with a coverage window open; its hits are not reported");
        }
        self.phase = BinderPhase::Finalizing;
        tracing::debug!(
            units = suite.log().total(),
            writers = self.registry.len(),
            "generating coverage reports"
        );

        let result = self
            .dispatcher
            .dispatch(self.engine.data(), &self.registry);
        self.phase = BinderPhase::Done;
        result
    }
}

type SharedState<E> = Rc<RefCell<BinderState<E>>>;

fn unexpected(handler: SuitePhase, event: &PhaseEvent) -> CoverageError {
    CoverageError::invalid_state(format!(
        "{handler} handler received a {} event",
        event.phase()
    ))
}

struct BeforeUnitHandler<E> {
    state: SharedState<E>,
}

impl<E: InstrumentationEngine> PhaseHandler for BeforeUnitHandler<E> {
    fn handle(&mut self, event: &PhaseEvent) -> CoverageResult<()> {
        match event {
            PhaseEvent::BeforeUnit(unit) => self.state.borrow_mut().unit_started(unit),
            other => Err(unexpected(SuitePhase::BeforeUnit, other)),
        }
    }
}

struct AfterUnitHandler<E> {
    state: SharedState<E>,
}

impl<E: InstrumentationEngine> PhaseHandler for AfterUnitHandler<E> {
    fn handle(&mut self, event: &PhaseEvent) -> CoverageResult<()> {
        match event {
            PhaseEvent::AfterUnit(unit) => self.state.borrow_mut().unit_finished(unit),
            other => Err(unexpected(SuitePhase::AfterUnit, other)),
        }
    }
}

struct AfterSuiteHandler<E> {
    state: SharedState<E>,
}

impl<E: InstrumentationEngine> PhaseHandler for AfterSuiteHandler<E> {
    fn handle(&mut self, event: &PhaseEvent) -> CoverageResult<()> {
        match event {
            PhaseEvent::AfterSuite(suite) => self.state.borrow_mut().suite_finished(suite),
            other => Err(unexpected(SuitePhase::AfterSuite, other)),
        }
    }
}

/// Owns the engine, registry and dispatcher for one run
pub struct LifecycleBinder<E> {
    state: SharedState<E>,
}

impl<E> fmt::Debug for LifecycleBinder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("LifecycleBinder")
            .field("phase", &state.phase)
            .field("writers", &state.registry.len())
            .finish_non_exhaustive()
    }
}

impl<E: InstrumentationEngine + 'static> LifecycleBinder<E> {
    /// Bind a primed engine to a registry and dispatcher
    #[must_use]
    pub fn new(engine: E, registry: WriterRegistry, dispatcher: ReportDispatcher) -> Self {
        Self {
            state: Rc::new(RefCell::new(BinderState {
                engine,
                registry,
                dispatcher,
                phase: BinderPhase::Primed,
            })),
        }
    }

    /// Subscribe the before-unit, after-unit and after-suite handlers
    pub fn attach(&self, bus: &mut dyn EventBus) {
        bus.subscribe(
            SuitePhase::BeforeUnit,
            Box::new(BeforeUnitHandler {
                state: Rc::clone(&self.state),
            }),
        );
        bus.subscribe(
            SuitePhase::AfterUnit,
            Box::new(AfterUnitHandler {
                state: Rc::clone(&self.state),
            }),
        );
        bus.subscribe(
            SuitePhase::AfterSuite,
            Box::new(AfterSuiteHandler {
                state: Rc::clone(&self.state),
            }),
        );
    }

    /// Current lifecycle phase
    #[must_use]
    pub fn phase(&self) -> BinderPhase {
        self.state.borrow().phase
    }
}

/// Decides whether coverage runs at all and installs it on a bus
#[derive(Debug, Clone, Default)]
pub struct CoverageOrchestrator {
    registry: WriterRegistry,
    filters: FilterSet,
}

impl CoverageOrchestrator {
    /// Create an orchestrator from the requested writers and filter rules
    #[must_use]
    pub fn new(registry: WriterRegistry, filters: FilterSet) -> Self {
        Self { registry, filters }
    }

    /// Whether any writer was requested
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.registry.is_empty()
    }

    /// Requested writers
    #[must_use]
    pub const fn registry(&self) -> &WriterRegistry {
        &self.registry
    }

    /// Build, prime and attach the engine.
    ///
    /// With no writer requested this is a no-op: the factory is never called,
    /// nothing is subscribed and `Ok(false)` is returned.
    pub fn install<E, F>(
        self,
        bus: &mut dyn EventBus,
        engine_factory: F,
        dispatcher: ReportDispatcher,
    ) -> CoverageResult<bool>
    where
        E: InstrumentationEngine + 'static,
        F: FnOnce() -> CoverageResult<E>,
    {
        if !self.is_active() {
            tracing::debug!("no coverage output requested");
            return Ok(false);
        }

        let mut engine = engine_factory()?;
        apply_filters(&mut engine, &self.filters)?;

        tracing::info!(writers = self.registry.len(), "code coverage enabled");
        LifecycleBinder::new(engine, self.registry, dispatcher).attach(bus);
        Ok(true)
    }
}
