//! PDF reports for a single inspection record.
//!
//! Producing a report is two steps: [`Layout::build`] places every line of
//! text on numbered pages, then [`render`] writes those pages as PDF bytes.
//! [`generate`] does both and pairs the bytes with a file name.

pub mod layout;
mod render;

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::export::ExportArtifact;
use crate::record::Record;

pub use layout::{Layout, Page, Role, TextRun};
pub use render::{render, DocumentInfo};

/// Application name written as the PDF creator.
pub const CREATOR: &str = "WalkAround Checks";

/// Settings for report generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Written as the PDF document author.
    pub author: String,
}

impl ReportOptions {
    /// Options taken from the `[report]` section.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            author: config.report.author.clone(),
        }
    }

    fn document_info(&self) -> DocumentInfo {
        DocumentInfo {
            title: layout::TITLE.to_string(),
            author: self.author.clone(),
            creator: CREATOR.to_string(),
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            author: CREATOR.to_string(),
        }
    }
}

/// Lay out and render `record`, returning the PDF with its file name.
#[must_use]
pub fn generate(record: &Record, catalog: &Catalog, options: &ReportOptions) -> ExportArtifact {
    let layout = Layout::build(record, catalog);
    let bytes = render(&layout, &options.document_info());
    debug!(
        "Rendered record {} as {} pages, {} bytes",
        record.id(),
        layout.pages().len(),
        bytes.len()
    );
    ExportArtifact::new(suggested_file_name(record), bytes)
}

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("Invalid regex pattern"))
}

fn unsafe_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"[/\\:*?"<>|\x00-\x08\x0e-\x1f\x7f]"#).expect("Invalid regex pattern")
    })
}

/// Stem used when nothing of the driver name survives sanitizing.
const FALLBACK_STEM: &str = "Driver";

/// File name for the report of `record`.
///
/// Whitespace runs in the driver name become `_` and characters that are not
/// allowed in file names are dropped, giving
/// `<driver>_<dd-MM-yyyy>_Checklist.pdf` with the date in UTC. A name with
/// nothing left after that uses `Driver`.
#[must_use]
pub fn suggested_file_name(record: &Record) -> String {
    let driver = unsafe_chars().replace_all(record.driver_name(), "");
    let driver = whitespace().replace_all(driver.trim(), "_");
    format!(
        "{}_{}_Checklist.pdf",
        if driver.is_empty() { FALLBACK_STEM } else { &*driver },
        record.date().format("%d-%m-%Y")
    )
}
