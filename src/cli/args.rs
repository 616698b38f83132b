//! CLI argument definitions using clap
//!
//! Commands:
//! - meta-inherit resolve --manifest <path> [--class <name>]
//! - meta-inherit check --manifest <path>
//! - meta-inherit schema --manifest <path> --name <schema>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// meta-inherit - resolve per-class metadata along class hierarchies
#[derive(Parser, Debug)]
#[command(name = "meta-inherit")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log at debug level on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print resolved metas
    Resolve {
        /// Path to manifest file
        #[arg(long, default_value = "./meta.json")]
        manifest: PathBuf,

        /// Only print this class
        #[arg(long)]
        class: Option<String>,
    },

    /// Load and resolve a manifest, printing a summary
    Check {
        /// Path to manifest file
        #[arg(long, default_value = "./meta.json")]
        manifest: PathBuf,
    },

    /// Print a schema's effective field rules
    Schema {
        /// Path to manifest file
        #[arg(long, default_value = "./meta.json")]
        manifest: PathBuf,

        /// Schema name
        #[arg(long)]
        name: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
