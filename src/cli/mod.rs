//! CLI module for meta-inherit
//!
//! Provides command-line interface for:
//! - resolve: Print resolved metas from a manifest
//! - check: Validate a manifest and summarize it
//! - schema: Print one schema's field rules

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{check, resolve, run, run_command, schema};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_error, write_response};
