//! Coverage Demo - per-unit coverage with every report format
//!
//! Runs a tiny suite against the in-process recording engine and writes
//! Clover, HTML, snapshot and text reports into a temporary directory.
//!
//! # Running
//!
//! ```bash
//! cargo run --example coverage_demo -p suitecov
//! ```

#![allow(clippy::uninlined_format_args)]

use suitecov::prelude::*;
use suitecov::FilterSpec;

fn main() -> CoverageResult<()> {
    let out_dir = std::env::temp_dir().join("suitecov-demo");

    let mut registry = WriterRegistry::new();
    registry.register(
        OutputOption::CoverageClover,
        out_dir.join("clover.xml").display().to_string(),
    );
    registry.register(
        OutputOption::CoverageHtml,
        out_dir.join("html").display().to_string(),
    );
    registry.register(
        OutputOption::CoverageSnapshot,
        out_dir.join("coverage.json").display().to_string(),
    );
    registry.register(OutputOption::CoverageText, "-");

    let filters = FilterSet::new().with_whitelist(FilterSpec::new().with_dir("src"));

    let engine = RecordingEngine::new();
    let probe = engine.probe();
    probe.declare("src/calculator.rs", 1..=12);
    probe.declare("tests/helpers.rs", [1, 2]);

    let mut bus = LifecycleBus::new();
    CoverageOrchestrator::new(registry, filters).install(
        &mut bus,
        || Ok(engine),
        ReportDispatcher::new(),
    )?;

    let mut suite = Suite::new("calculator")
        .with_unit(Unit::new("adds two numbers", |probe: &Probe| {
            for line in 1..=4 {
                probe.hit("src/calculator.rs", line);
            }
            Ok(())
        }))
        .with_unit(Unit::new("divides by zero", |probe: &Probe| {
            probe.hit("src/calculator.rs", 5);
            probe.hit("src/calculator.rs", 6);
            probe.hit("tests/helpers.rs", 1);
            Err("expected an error, got infinity".to_string())
        }));

    let results = SuiteRunner::new()
        .with_probe(probe)
        .run(&mut suite, &mut bus)?;

    println!();
    println!(
        "{} passed, {} failed; reports in {}",
        results.log.passed,
        results.log.failed,
        out_dir.display()
    );
    Ok(())
}
