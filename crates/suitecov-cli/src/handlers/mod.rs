//! Command handlers - extracted from main.rs for testability

pub mod config;
pub mod replay;

pub use config::{execute_config, render_config};
pub use replay::{execute_replay, merged_parameters, replay};
