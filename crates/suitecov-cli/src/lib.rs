//! Suitecov CLI Library
//!
//! Command-line interface for the Suitecov coverage reporter.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::format_push_string)] // String building is clear and correct
#![allow(clippy::missing_errors_doc)] // Error types are self-documenting

mod commands;
mod config;
mod error;
pub mod handlers;
pub mod logging;
mod output;
pub mod trace;

pub use commands::{parse_param, Cli, ColorArg, Commands, ConfigArgs, CoverageArgs, ReplayArgs};
pub use config::{CliConfig, ColorChoice, SuiteConfig, Verbosity, DEFAULT_CONFIG_FILE};
pub use error::{CliError, CliResult};
pub use output::render_summary;
pub use trace::{SuiteTrace, TraceUnit};
