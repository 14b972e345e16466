//! Command-line interface for fitlog.
//!
//! There are no subcommands: running the binary starts the interactive
//! session. Flags only choose where data and configuration live and how
//! chatty the logs are.

use std::path::PathBuf;

use clap::Parser;

use crate::logging::Verbosity;

/// fitlog - Log workouts and see your totals
///
/// Starts an interactive menu for adding exercise sessions and viewing a
/// summary. Sessions are kept in a CSV file.
#[derive(Debug, Parser)]
#[command(name = "fitlog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the activity file (default: fitness_data.csv)
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Path to custom configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}
