//! Diagnostic logging setup
//!
//! Library diagnostics go to stderr through a `tracing-subscriber` fmt layer,
//! keeping stdout free for reports. `RUST_LOG` overrides the level implied by
//! `-q`/`-v`.

use crate::config::{ColorChoice, Verbosity};
use tracing_subscriber::EnvFilter;

/// Build the filter for a verbosity level, honouring `RUST_LOG` when set
#[must_use]
pub fn env_filter(verbosity: Verbosity) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(verbosity.log_directive()))
}

/// Install the global subscriber; later calls are no-ops
pub fn init_tracing(verbosity: Verbosity, color: ColorChoice) {
    let ansi = match color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbosity))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .try_init();
}
