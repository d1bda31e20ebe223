//! Command-line argument definitions for the classdiag CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, per-run option overrides, and logging
//! verbosity.

use clap::Parser;

use classdiag::Format;

/// Command-line arguments for the classdiag tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input source set document (JSON)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output diagram file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (plantuml, mermaid); overrides the configuration file
    #[arg(short, long)]
    pub format: Option<Format>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Rendering option override, as key=value (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE")]
    pub overrides: Vec<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
