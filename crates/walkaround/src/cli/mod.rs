//! Command-line interface for walkaround.
//!
//! This module provides the CLI structure for the `walkaround` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    CatalogCommand, ConfigCommand, DeleteCommand, ExportCommand, HistoryCommand, InspectCommand,
    OutputFormat, ShowCommand, StatusCommand,
};

/// walkaround - Vehicle walk-around inspection checklists
///
/// Record pre-trip inspections against the standard checklist, keep a local
/// history of them, and export any inspection as a PDF report.
#[derive(Debug, Parser)]
#[command(name = "walkaround")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
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
    /// Record a completed inspection
    Inspect(InspectCommand),

    /// List the checklist categories and items
    Catalog(CatalogCommand),

    /// List saved inspections
    History(HistoryCommand),

    /// Show one saved inspection
    Show(ShowCommand),

    /// Delete saved inspections
    Delete(DeleteCommand),

    /// Export an inspection as a PDF report
    Export(ExportCommand),

    /// Show storage status
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
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
