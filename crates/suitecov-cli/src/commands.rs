//! CLI command definitions using clap

use crate::error::{CliError, CliResult};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use suitecov::{OutputOption, WriterRegistry};

/// Suitecov: per-unit code coverage reports for test suites
#[derive(Parser, Debug)]
#[command(name = "suitecov")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Configuration file (defaults to ./suitecov.yaml when present)
    #[arg(short, long, global = true, env = "SUITECOV_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded suite trace and write coverage reports
    Replay(ReplayArgs),

    /// Show configuration
    Config(ConfigArgs),
}

/// Coverage report options, flattenable into any command that runs a suite
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct CoverageArgs {
    /// Write a Clover XML report to PATH
    #[arg(long = "coverage-clover", value_name = "PATH")]
    pub clover: Option<String>,

    /// Write an HTML report into directory PATH
    #[arg(long = "coverage-html", value_name = "PATH")]
    pub html: Option<String>,

    /// Write a serialized coverage snapshot to PATH
    #[arg(long = "coverage-snapshot", visible_alias = "coverage-php", value_name = "PATH")]
    pub snapshot: Option<String>,

    /// Write a text report to PATH (`--coverage-text=PATH`), or to standard output when omitted
    #[arg(
        long = "coverage-text",
        value_name = "PATH",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = ""
    )]
    pub text: Option<String>,
}

impl CoverageArgs {
    /// Register one writer per supplied option, in declaration order
    #[must_use]
    pub fn to_registry(&self) -> WriterRegistry {
        let mut registry = WriterRegistry::new();
        let requested = [
            (OutputOption::CoverageClover, &self.clover),
            (OutputOption::CoverageHtml, &self.html),
            (OutputOption::CoverageSnapshot, &self.snapshot),
            (OutputOption::CoverageText, &self.text),
        ];
        for (option, path) in requested {
            if let Some(path) = path {
                registry.register(option, path.clone());
            }
        }
        registry
    }

    /// Whether any report was requested
    #[must_use]
    pub const fn any(&self) -> bool {
        self.clover.is_some() || self.html.is_some() || self.snapshot.is_some() || self.text.is_some()
    }
}

/// Arguments for the replay command
#[derive(Parser, Debug)]
pub struct ReplayArgs {
    /// Suite trace (YAML)
    pub trace: PathBuf,

    /// Coverage report options
    #[command(flatten)]
    pub coverage: CoverageArgs,

    /// Run parameter forwarded to suite-end handlers (key=value)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    pub params: Vec<(String, String)>,

    /// Stop after the first failed unit
    #[arg(long)]
    pub fail_fast: bool,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Show effective configuration
    #[arg(long)]
    pub show: bool,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Parse a `key=value` run parameter
pub fn parse_param(raw: &str) -> CliResult<(String, String)> {
    match raw.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(CliError::invalid_argument(format!(
            "expected KEY=VALUE, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use suitecov::{ReportFormat, ReportTarget};

    fn replay(args: &[&str]) -> ReplayArgs {
        let mut argv = vec!["suitecov", "replay", "trace.yaml"];
        argv.extend_from_slice(args);
        match Cli::parse_from(argv).command {
            Commands::Replay(args) => args,
            Commands::Config(_) => panic!("expected replay"),
        }
    }

    mod cli_tests {
        use super::*;

        #[test]
        fn test_parse_replay_command() {
            let args = replay(&[]);
            assert_eq!(args.trace, PathBuf::from("trace.yaml"));
            assert!(!args.coverage.any());
            assert!(args.params.is_empty());
            assert!(!args.fail_fast);
        }

        #[test]
        fn test_global_flags() {
            let cli = Cli::parse_from(["suitecov", "-vv", "--color", "never", "config", "--show"]);
            assert_eq!(cli.verbose, 2);
            assert!(matches!(cli.color, ColorArg::Never));
            assert!(matches!(cli.command, Commands::Config(ConfigArgs { show: true })));
        }

        #[test]
        fn test_config_flag() {
            let cli = Cli::parse_from(["suitecov", "-c", "ci.yaml", "config"]);
            assert_eq!(cli.config, Some(PathBuf::from("ci.yaml")));
        }

        #[test]
        fn test_subcommand_required() {
            assert!(Cli::try_parse_from(["suitecov"]).is_err());
        }

        #[test]
        fn test_params() {
            let args = replay(&["--param", "env=ci", "--param", "shard=1=2"]);
            assert_eq!(
                args.params,
                vec![
                    ("env".to_string(), "ci".to_string()),
                    ("shard".to_string(), "1=2".to_string()),
                ]
            );
        }

        #[test]
        fn test_bad_param_rejected() {
            let result = Cli::try_parse_from(["suitecov", "replay", "t.yaml", "--param", "novalue"]);
            assert!(result.is_err());
        }
    }

    mod coverage_args_tests {
        use super::*;

        #[test]
        fn test_no_options_registers_nothing() {
            assert!(replay(&[]).coverage.to_registry().is_empty());
        }

        #[test]
        fn test_text_without_value_targets_stdout() {
            let args = replay(&["--coverage-text"]);
            assert_eq!(args.coverage.text.as_deref(), Some(""));

            let registry = args.coverage.to_registry();
            assert_eq!(registry.len(), 1);
            assert_eq!(registry.entries()[0].target(), ReportTarget::Stdout);
        }

        #[test]
        fn test_text_with_value() {
            let args = replay(&["--coverage-text=cov.txt"]);
            assert_eq!(
                args.coverage.to_registry().entries()[0].target(),
                ReportTarget::File(PathBuf::from("cov.txt"))
            );
        }

        #[test]
        fn test_php_alias() {
            let args = replay(&["--coverage-php", "cov.json"]);
            assert_eq!(args.coverage.snapshot.as_deref(), Some("cov.json"));
        }

        #[test]
        fn test_registry_order_is_fixed() {
            let args = replay(&[
                "--coverage-text=-",
                "--coverage-snapshot",
                "s.json",
                "--coverage-clover",
                "c.xml",
                "--coverage-html",
                "html",
            ]);
            let formats: Vec<ReportFormat> = args
                .coverage
                .to_registry()
                .iter()
                .map(|entry| entry.format())
                .collect();
            assert_eq!(
                formats,
                vec![
                    ReportFormat::Clover,
                    ReportFormat::Html,
                    ReportFormat::Snapshot,
                    ReportFormat::Text,
                ]
            );
        }

        #[test]
        fn test_text_option_before_positional() {
            let cli = Cli::parse_from([
                "suitecov",
                "replay",
                "--coverage-clover",
                "c.xml",
                "trace.yaml",
            ]);
            let Commands::Replay(args) = cli.command else {
                panic!("expected replay");
            };
            assert_eq!(args.coverage.clover.as_deref(), Some("c.xml"));
            assert_eq!(args.trace, PathBuf::from("trace.yaml"));
        }

        #[test]
        fn test_bare_text_flag_leaves_positional_alone() {
            let cli = Cli::parse_from(["suitecov", "replay", "--coverage-text", "trace.yaml"]);
            let Commands::Replay(args) = cli.command else {
                panic!("expected replay");
            };
            assert_eq!(args.coverage.text.as_deref(), Some(""));
            assert_eq!(args.trace, PathBuf::from("trace.yaml"));
        }
    }

    #[test]
    fn test_color_arg_conversion() {
        use crate::config::ColorChoice;
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
    }
}
