//! Replay command handler

use crate::commands::ReplayArgs;
use crate::config::{CliConfig, SuiteConfig};
use crate::error::{CliError, CliResult};
use crate::output::render_summary;
use crate::trace::SuiteTrace;
use std::collections::BTreeMap;
use suitecov::{
    CoverageOrchestrator, LifecycleBus, Probe, RecordingEngine, ReportDispatcher, SuiteResults,
    SuiteRunner,
};

/// Execute the replay command
pub fn execute_replay(
    config: &CliConfig,
    suite_config: &SuiteConfig,
    args: &ReplayArgs,
) -> CliResult<SuiteResults> {
    let use_color = config.color.should_color();
    let mut dispatcher = ReportDispatcher::new().with_colors(use_color);
    if config.verbosity.is_quiet() {
        dispatcher = dispatcher.with_progress(Box::new(std::io::sink()));
    }

    let results = replay(suite_config, args, dispatcher)?;

    if !config.verbosity.is_quiet() {
        print!("{}", render_summary(&results, use_color));
    }

    if results.all_passed() {
        Ok(results)
    } else {
        Err(CliError::UnitFailures {
            failed: results.log.failed,
            total: results.log.total(),
        })
    }
}

/// Replay a trace with coverage installed on the bus
pub fn replay(
    suite_config: &SuiteConfig,
    args: &ReplayArgs,
    dispatcher: ReportDispatcher,
) -> CliResult<SuiteResults> {
    let trace = SuiteTrace::load(&args.trace)?;
    let probe = Probe::default();
    trace.declare_sources(&probe);

    let mut bus = LifecycleBus::new();
    let orchestrator =
        CoverageOrchestrator::new(args.coverage.to_registry(), suite_config.coverage.clone());
    let engine_probe = probe.clone();
    let active = orchestrator.install(
        &mut bus,
        move || Ok(RecordingEngine::attached(&engine_probe)),
        dispatcher,
    )?;
    tracing::info!(coverage = active, trace = %args.trace.display(), "replaying suite");

    let mut runner = SuiteRunner::new().with_probe(probe);
    if args.fail_fast {
        runner = runner.with_fail_fast();
    }
    for (key, value) in merged_parameters(suite_config, args) {
        runner = runner.with_parameter(key, value);
    }

    Ok(runner.run(&mut trace.into_suite(), &mut bus)?)
}

/// Configuration-file parameters overridden by `--param` flags
#[must_use]
pub fn merged_parameters(suite_config: &SuiteConfig, args: &ReplayArgs) -> BTreeMap<String, String> {
    let mut parameters = suite_config.parameters.clone();
    parameters.extend(args.params.iter().cloned());
    parameters
}
