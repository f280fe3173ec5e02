//! Command-line interface for staffbook.
//!
//! This module provides the CLI structure for the `staffbook` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ActivityArgs, ActivityCommand, ConfigCommand, EmployeeArgs, EmployeeChanges, EmployeeCommand,
    ReportCommand, StatusCommand,
};

/// staffbook - Employee records and daily activity log
///
/// Keeps employees and their activities in a local database and exports a
/// day's activities as a PDF report.
#[derive(Debug, Parser)]
#[command(name = "staffbook")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Register, edit, remove and list employees
    #[command(subcommand)]
    Employee(EmployeeCommand),

    /// Log, remove and list activities
    #[command(subcommand)]
    Activity(ActivityCommand),

    /// Write the PDF report of one day
    Report(ReportCommand),

    /// Show database location and record counts
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Debug,
            }
        }
    }
}
