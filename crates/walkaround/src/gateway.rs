//! Loading and saving the record collection.
//!
//! The whole collection is one JSON blob under a single key. Every write is
//! read-modify-write of the full sequence; nothing is ever appended in place.

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::record::Record;
use crate::storage::KeyValueStore;

/// What happens when the stored blob cannot be decoded or encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecFailure {
    /// Log and carry on: an undecodable collection reads as empty and an
    /// unencodable one is not written.
    #[default]
    Swallow,
    /// Return [`Error::PersistenceDecode`] / [`Error::PersistenceEncode`].
    Surface,
}

impl CodecFailure {
    /// The mode selected by `persistence.strict`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        if config.persistence.strict {
            Self::Surface
        } else {
            Self::Swallow
        }
    }
}

/// Reads and writes the persisted collection through a [`KeyValueStore`].
#[derive(Debug)]
pub struct RecordGateway<S> {
    store: S,
    key: String,
    on_failure: CodecFailure,
}

impl<S: KeyValueStore> RecordGateway<S> {
    /// Create a gateway storing the collection under `key`.
    pub fn new(store: S, key: impl Into<String>, on_failure: CodecFailure) -> Self {
        Self {
            store,
            key: key.into(),
            on_failure,
        }
    }

    /// The key the collection is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the full collection, in persisted order.
    ///
    /// A missing key loads as an empty collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read, or, with
    /// [`CodecFailure::Surface`], if the blob cannot be decoded.
    pub fn load(&self) -> Result<Vec<Record>> {
        let Some(blob) = self.store.get(&self.key)? else {
            debug!("No saved records under {}", self.key);
            return Ok(Vec::new());
        };

        match serde_json::from_slice::<Vec<Record>>(&blob) {
            Ok(records) => {
                debug!("Loaded {} records", records.len());
                Ok(records)
            }
            Err(source) => match self.on_failure {
                CodecFailure::Swallow => {
                    warn!(
                        "Saved records under {} could not be decoded, treating as empty: {}",
                        self.key, source
                    );
                    Ok(Vec::new())
                }
                CodecFailure::Surface => Err(Error::PersistenceDecode {
                    key: self.key.clone(),
                    source,
                }),
            },
        }
    }

    /// Overwrite the stored collection with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written, or, with
    /// [`CodecFailure::Surface`], if the records cannot be encoded.
    pub fn save(&self, records: &[Record]) -> Result<()> {
        let blob = match serde_json::to_vec(records) {
            Ok(blob) => blob,
            Err(source) => {
                return match self.on_failure {
                    CodecFailure::Swallow => {
                        warn!("Records could not be encoded, nothing written: {}", source);
                        Ok(())
                    }
                    CodecFailure::Surface => Err(Error::PersistenceEncode {
                        key: self.key.clone(),
                        source,
                    }),
                };
            }
        };

        self.store.put(&self.key, &blob)?;
        debug!("Saved {} records", records.len());
        Ok(())
    }

    /// Load the collection, append `record`, and save the result.
    ///
    /// # Errors
    ///
    /// Returns an error if loading or saving fails.
    pub fn append(&self, record: Record) -> Result<()> {
        let mut records = self.load()?;
        records.push(record);
        self.save(&records)
    }
}
