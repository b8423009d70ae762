//! CLI command handlers.

pub mod config;
pub mod emit;

pub use config::run_config_show;
pub use emit::{EmitCommandInput, run_emit};
