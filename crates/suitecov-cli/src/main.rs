//! Suitecov CLI: coverage reports for recorded test suites
//!
//! ## Usage
//!
//! ```bash
//! suitecov replay trace.yaml --coverage-text            # Text report on stdout
//! suitecov replay trace.yaml --coverage-clover cov.xml  # Clover XML
//! suitecov replay trace.yaml --coverage-html html/ --param env=ci
//! suitecov config --show                                # Effective configuration
//! ```

use clap::Parser;
use std::process::ExitCode;
use suitecov_cli::{
    handlers, logging, Cli, CliConfig, CliResult, ColorChoice, Commands, SuiteConfig, Verbosity,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();

    let config = build_config(&cli);
    logging::init_tracing(config.verbosity, config.color);

    let cwd = std::env::current_dir()?;
    let (suite_config, source) = SuiteConfig::discover(config.config_file.as_deref(), &cwd)?;

    match cli.command {
        Commands::Replay(args) => {
            handlers::execute_replay(&config, &suite_config, &args)?;
            Ok(())
        }
        Commands::Config(args) => {
            handlers::execute_config(&config, &suite_config, source.as_deref(), &args)
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let verbosity = Verbosity::from_flags(cli.quiet, cli.verbose);
    let color: ColorChoice = cli.color.clone().into();

    CliConfig::new()
        .with_verbosity(verbosity)
        .with_color(color)
        .with_config_file(cli.config.clone())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_quiet_wins() {
        let cli = Cli::parse_from(["suitecov", "-q", "-vv", "config"]);
        let config = build_config(&cli);
        assert_eq!(config.verbosity, Verbosity::Quiet);
        assert_eq!(config.color, ColorChoice::Auto);
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_build_config_carries_file() {
        let cli = Cli::parse_from(["suitecov", "--color", "always", "-c", "ci.yaml", "config"]);
        let config = build_config(&cli);
        assert_eq!(config.color, ColorChoice::Always);
        assert_eq!(config.config_file.unwrap().to_str(), Some("ci.yaml"));
    }
}
