//! Output formatting for replay results

use console::style;
use suitecov::{SuiteResults, UnitOutcome};

/// Render one line per unit followed by a tally
#[must_use]
pub fn render_summary(results: &SuiteResults, use_color: bool) -> String {
    let mut out = String::new();

    for unit in &results.results {
        let marker = match unit.outcome {
            UnitOutcome::Passed => style("PASS").green(),
            UnitOutcome::Failed => style("FAIL").red(),
            UnitOutcome::Skipped => style("SKIP").yellow(),
        }
        .force_styling(use_color);
        out.push_str(&format!("{marker} {}\n", unit.title));
        if let Some(error) = &unit.error {
            out.push_str(&format!("     {error}\n"));
        }
    }

    let log = &results.log;
    let tally = format!(
        "{}: {} passed, {} failed, {} skipped",
        results.suite_name, log.passed, log.failed, log.skipped
    );
    let tally = if log.has_failures() {
        style(tally).red().bold()
    } else {
        style(tally).green().bold()
    }
    .force_styling(use_color);
    out.push_str(&format!("\n{tally}\n"));

    if !results.completed {
        out.push_str("stopped after first failure\n");
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use suitecov::{LifecycleBus, Suite, SuiteRunner, Unit};

    fn results(fail_fast: bool) -> SuiteResults {
        let mut suite = Suite::new("demo")
            .with_unit(Unit::new("ok", |_| Ok(())))
            .with_unit(Unit::new("broken", |_| Err("boom".to_string())))
            .with_unit(Unit::new("later", |_| Ok(())).skipped());
        let runner = if fail_fast {
            SuiteRunner::new().with_fail_fast()
        } else {
            SuiteRunner::new()
        };
        runner.run(&mut suite, &mut LifecycleBus::new()).unwrap()
    }

    #[test]
    fn test_plain_summary() {
        let text = render_summary(&results(false), false);
        assert!(text.contains("PASS ok\n"));
        assert!(text.contains("FAIL broken\n     boom\n"));
        assert!(text.contains("SKIP later\n"));
        assert!(text.contains("demo: 1 passed, 1 failed, 1 skipped"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_colored_summary() {
        let text = render_summary(&results(false), true);
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_incomplete_run_noted() {
        let text = render_summary(&results(true), false);
        assert!(text.contains("stopped after first failure"));
    }
}
