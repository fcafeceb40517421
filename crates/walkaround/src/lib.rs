//! `walkaround` - Vehicle walk-around inspection checklists
//!
//! This library provides the checklist catalog, inspection sessions with
//! submission-time validation, a locally persisted record history, and PDF
//! reports for completed inspections.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod gateway;
pub mod logging;
pub mod record;
pub mod records;
pub mod report;
pub mod service;
pub mod session;
pub mod storage;

pub use catalog::{Catalog, Category};
pub use config::Config;
pub use error::{Error, Result, ValidationError};
pub use export::{DirectoryExportSink, ExportArtifact, ExportSink};
pub use gateway::{CodecFailure, RecordGateway};
pub use logging::init_logging;
pub use record::Record;
pub use records::RecordStore;
pub use service::WalkAround;
pub use session::{CategoryState, ChecklistSession};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageStats};
