//! CLI module
//!
//! Provides command-line interface for:
//! - init: write a default config and create the data directory
//! - serve: boot the store and run the HTTP server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, load_config, open_store, run, run_command, serve};
pub use errors::{CliError, CliResult};
