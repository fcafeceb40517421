//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Args, Subcommand, ValueEnum};

/// Inspect command arguments.
#[derive(Debug, Args)]
pub struct InspectCommand {
    /// Name of the driver carrying out the inspection
    #[arg(short, long)]
    pub driver: String,

    /// Truck or fleet number
    #[arg(short, long)]
    pub truck: String,

    /// Inspection date (YYYY-MM-DD), defaults to now
    #[arg(long, value_name = "DATE")]
    pub date: Option<NaiveDate>,

    /// Mark a checklist item as done (repeatable)
    #[arg(short, long = "item", value_name = "ITEM")]
    pub items: Vec<String>,

    /// Toggle every item of a category (repeatable)
    #[arg(long = "category", value_name = "NAME")]
    pub categories: Vec<String>,

    /// Mark every checklist item as done
    #[arg(short, long, conflicts_with = "categories")]
    pub all: bool,

    /// Free-text comments for the report
    #[arg(long)]
    pub comments: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Catalog command arguments.
#[derive(Debug, Args)]
pub struct CatalogCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// History command arguments.
#[derive(Debug, Args)]
pub struct HistoryCommand {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Record id or unique id prefix
    pub id: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "plain")]
    pub format: OutputFormat,
}

/// Delete command arguments.
#[derive(Debug, Args)]
#[command(group(ArgGroup::new("target").required(true).args(["ids", "indices"])))]
pub struct DeleteCommand {
    /// Record ids or unique id prefixes
    pub ids: Vec<String>,

    /// Delete by position in the history list (repeatable)
    #[arg(long = "index", value_name = "N")]
    pub indices: Vec<usize>,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Record id or unique id prefix
    pub id: String,

    /// Directory to write the PDF into, defaults to `report.export_dir`
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    #[default]
    Plain,
    /// Formatted table
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Plain);
    }

    #[test]
    fn test_status_command_debug() {
        let cmd = StatusCommand { json: true };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("json"));
    }

    #[test]
    fn test_inspect_command_debug() {
        let cmd = InspectCommand {
            driver: "John".to_string(),
            truck: "1234".to_string(),
            date: None,
            items: vec!["Tires".to_string()],
            categories: Vec::new(),
            all: false,
            comments: None,
            format: OutputFormat::Plain,
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("driver"));
        assert!(debug_str.contains("Tires"));
    }

    #[test]
    fn test_delete_command_debug() {
        let cmd = DeleteCommand {
            ids: Vec::new(),
            indices: vec![0, 2],
        };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("indices"));
    }

    #[test]
    fn test_config_command_debug() {
        let cmd = ConfigCommand::Show { json: false };
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Show"));
    }

    #[test]
    fn test_output_format_debug() {
        let format = OutputFormat::Json;
        let debug_str = format!("{format:?}");
        assert_eq!(debug_str, "Json");
    }
}
