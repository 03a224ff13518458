//! Config command handler

use crate::commands::ConfigArgs;
use crate::config::{CliConfig, SuiteConfig};
use crate::error::CliResult;
use std::path::Path;

/// Execute the config command
pub fn execute_config(
    config: &CliConfig,
    suite_config: &SuiteConfig,
    source: Option<&Path>,
    args: &ConfigArgs,
) -> CliResult<()> {
    if args.show {
        print!("{}", render_config(config, suite_config, source)?);
    }
    Ok(())
}

/// Render the effective configuration
pub fn render_config(
    config: &CliConfig,
    suite_config: &SuiteConfig,
    source: Option<&Path>,
) -> CliResult<String> {
    let mut out = String::from("Current configuration:\n");
    out.push_str(&format!("  Verbosity: {:?}\n", config.verbosity));
    out.push_str(&format!("  Color: {:?}\n", config.color));
    out.push_str(&format!(
        "  Config file: {}\n",
        source.map_or_else(|| "(none)".to_string(), |p| p.display().to_string())
    ));
    out.push('\n');
    out.push_str(&serde_yaml_ng::to_string(suite_config)?);
    Ok(out)
}
