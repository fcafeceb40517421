//! Application entry points.
//!
//! [`WalkAround`] wires the catalog, the persisted collection and report
//! generation together and exposes the operations a front end needs:
//! start and submit an inspection, browse and delete history, export a
//! record as a PDF.

use std::path::PathBuf;

use tracing::{error, info};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::export::{DirectoryExportSink, ExportArtifact, ExportSink};
use crate::gateway::{CodecFailure, RecordGateway};
use crate::record::Record;
use crate::records::RecordStore;
use crate::report::{self, ReportOptions};
use crate::session::ChecklistSession;
use crate::storage::{KeyValueStore, SqliteStore, StorageStats};

/// The inspection application over a key-value store.
#[derive(Debug)]
pub struct WalkAround<S> {
    catalog: Catalog,
    gateway: RecordGateway<S>,
    report: ReportOptions,
    export_dir: PathBuf,
}

impl WalkAround<SqliteStore> {
    /// Open the application with the database named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn open(config: &Config) -> Result<Self> {
        let store = SqliteStore::open(config.database_path())?;
        Ok(Self::with_store(store, config))
    }

    /// Statistics about the backing database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be queried.
    pub fn stats(&self) -> Result<StorageStats> {
        self.gateway.store().stats()
    }
}

impl<S: KeyValueStore> WalkAround<S> {
    /// Create the application over an already opened store.
    pub fn with_store(store: S, config: &Config) -> Self {
        Self {
            catalog: Catalog::standard(),
            gateway: RecordGateway::new(
                store,
                config.storage.records_key.clone(),
                CodecFailure::from_config(config),
            ),
            report: ReportOptions::from_config(config),
            export_dir: config.export_dir(),
        }
    }

    /// The checklist catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The gateway to the persisted collection.
    #[must_use]
    pub fn gateway(&self) -> &RecordGateway<S> {
        &self.gateway
    }

    /// Begin a new, empty inspection dated now.
    #[must_use]
    pub fn start_inspection(&self) -> ChecklistSession<'_> {
        ChecklistSession::new(&self.catalog)
    }

    /// Validate `session` and persist the resulting record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the session is incomplete, or a
    /// persistence error if the record cannot be saved.
    pub fn submit(&self, session: &ChecklistSession<'_>) -> Result<Record> {
        session.validate_and_submit(&self.gateway)
    }

    /// Open the record history for listing and deletion.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded.
    pub fn records(&self) -> Result<RecordStore<'_, S>> {
        RecordStore::open(&self.gateway)
    }

    /// All saved records in submission order.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded.
    pub fn view_history(&self) -> Result<Vec<Record>> {
        Ok(self.records()?.list().to_vec())
    }

    /// The record with `id`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if there is no such record.
    pub fn view_record(&self, id: Uuid) -> Result<Record> {
        self.records()?
            .get(id)
            .cloned()
            .ok_or_else(|| Error::record_not_found(id))
    }

    /// The record matching a full id or unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] or [`Error::AmbiguousRecord`].
    pub fn resolve_record(&self, reference: &str) -> Result<Record> {
        self.records()?.resolve(reference).cloned()
    }

    /// Delete the record with `id`. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded or saved.
    pub fn delete_record(&self, id: Uuid) -> Result<bool> {
        self.records()?.delete(id)
    }

    /// Delete records by position in the history list.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded or saved.
    pub fn delete_records_at(&self, indices: &[usize]) -> Result<usize> {
        self.records()?.delete_at(indices)
    }

    /// Render the record with `id` as a PDF.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if there is no such record.
    pub fn export_record(&self, id: Uuid) -> Result<ExportArtifact> {
        let record = self.view_record(id)?;
        Ok(report::generate(&record, &self.catalog, &self.report))
    }

    /// Render the record with `id` and hand it to `sink`.
    ///
    /// Delivery failures are logged and reported as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if there is no such record.
    pub fn share_record(&self, id: Uuid, sink: &dyn ExportSink) -> Result<Option<PathBuf>> {
        let artifact = self.export_record(id)?;
        match sink.deliver(&artifact) {
            Ok(path) => {
                info!("Exported record {} to {}", id, path.display());
                Ok(Some(path))
            }
            Err(e) => {
                error!("Failed to export record {}: {}", id, e);
                Ok(None)
            }
        }
    }

    /// The sink for `report.export_dir`.
    #[must_use]
    pub fn default_sink(&self) -> DirectoryExportSink {
        DirectoryExportSink::new(&self.export_dir)
    }
}
