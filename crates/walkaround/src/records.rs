//! The saved inspection history.
//!
//! [`RecordStore`] keeps an in-memory copy of the persisted collection for
//! listing, and writes the full remaining collection back after every
//! deletion. It never holds unsaved changes.

use std::collections::BTreeSet;

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::gateway::RecordGateway;
use crate::record::Record;
use crate::storage::KeyValueStore;

/// Listing and deletion over the persisted collection.
#[derive(Debug)]
pub struct RecordStore<'g, S> {
    gateway: &'g RecordGateway<S>,
    records: Vec<Record>,
}

impl<'g, S: KeyValueStore> RecordStore<'g, S> {
    /// Load the collection through `gateway`.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded.
    pub fn open(gateway: &'g RecordGateway<S>) -> Result<Self> {
        let records = gateway.load()?;
        Ok(Self { gateway, records })
    }

    /// All records in persisted (submission) order.
    #[must_use]
    pub fn list(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check whether there are no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find a record by id.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Record> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Find a record by full id or by a unique prefix of its id.
    ///
    /// Prefix matching is case-insensitive and ignores hyphens in the
    /// reference, so `e621e1f8c3` and `E621E1F8-C3` both work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if nothing matches and
    /// [`Error::AmbiguousRecord`] if more than one record does.
    pub fn resolve(&self, reference: &str) -> Result<&Record> {
        if let Ok(id) = Uuid::parse_str(reference) {
            return self.get(id).ok_or_else(|| Error::record_not_found(id));
        }

        let needle: String = reference
            .chars()
            .filter(|c| *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        if needle.is_empty() {
            return Err(Error::RecordNotFound {
                reference: reference.to_string(),
            });
        }

        let mut matches = self
            .records
            .iter()
            .filter(|r| r.id().simple().to_string().starts_with(&needle));
        match (matches.next(), matches.count()) {
            (Some(record), 0) => Ok(record),
            (Some(_), more) => Err(Error::AmbiguousRecord {
                reference: reference.to_string(),
                count: more + 1,
            }),
            (None, _) => Err(Error::RecordNotFound {
                reference: reference.to_string(),
            }),
        }
    }

    /// Remove the record with `id` and persist the rest.
    ///
    /// Returns `false`, without writing, if no record has that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the remaining collection cannot be saved.
    pub fn delete(&mut self, id: Uuid) -> Result<bool> {
        let Some(index) = self.records.iter().position(|r| r.id() == id) else {
            debug!("No record {} to delete", id);
            return Ok(false);
        };

        self.records.remove(index);
        self.gateway.save(&self.records)?;
        info!("Deleted record {}", id);
        Ok(true)
    }

    /// Remove the records at the given positions and persist the rest.
    ///
    /// Positions refer to the current [`list`](Self::list) order. Duplicates
    /// are collapsed and out-of-range positions ignored. Returns how many
    /// records were removed; nothing is written when that is zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the remaining collection cannot be saved.
    pub fn delete_at(&mut self, indices: &[usize]) -> Result<usize> {
        let doomed: BTreeSet<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.records.len())
            .collect();
        if doomed.is_empty() {
            return Ok(0);
        }

        let mut position = 0;
        self.records.retain(|_| {
            let keep = !doomed.contains(&position);
            position += 1;
            keep
        });
        self.gateway.save(&self.records)?;
        info!("Deleted {} records", doomed.len());
        Ok(doomed.len())
    }

    /// Discard the in-memory copy and reload from storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be loaded.
    pub fn refresh(&mut self) -> Result<()> {
        self.records = self.gateway.load()?;
        debug!("Refreshed {} records", self.records.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::CodecFailure;
    use crate::record::tests::sample_record;
    use crate::storage::MemoryStore;

    fn seeded(names: &[&str]) -> RecordGateway<MemoryStore> {
        let gateway = RecordGateway::new(MemoryStore::new(), "savedRecords", CodecFailure::Swallow);
        let records: Vec<Record> = names.iter().map(|n| sample_record(n, &[], "")).collect();
        gateway.save(&records).unwrap();
        gateway
    }

    fn names<S: KeyValueStore>(store: &RecordStore<'_, S>) -> Vec<String> {
        store
            .list()
            .iter()
            .map(|r| r.driver_name().to_string())
            .collect()
    }

    #[test]
    fn test_list_keeps_persisted_order() {
        let gateway = seeded(&["C", "A", "B"]);
        let store = RecordStore::open(&gateway).unwrap();
        assert_eq!(names(&store), vec!["C", "A", "B"]);
        assert_eq!(store.len(), 3);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_empty_collection() {
        let gateway = RecordGateway::new(MemoryStore::new(), "k", CodecFailure::Swallow);
        let store = RecordStore::open(&gateway).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_removes_exactly_one() {
        let gateway = seeded(&["A", "B", "C"]);
        let mut store = RecordStore::open(&gateway).unwrap();
        let target = store.list()[1].id();
        let others: Vec<Uuid> = [0, 2].iter().map(|&i| store.list()[i].id()).collect();

        assert!(store.delete(target).unwrap());

        assert!(store.get(target).is_none());
        let persisted: Vec<Uuid> = gateway.load().unwrap().iter().map(Record::id).collect();
        assert_eq!(persisted, others);
    }

    #[test]
    fn test_delete_unknown_id_does_not_write() {
        let gateway = seeded(&["A"]);
        let writes = gateway.store().write_count();
        let mut store = RecordStore::open(&gateway).unwrap();

        assert!(!store.delete(Uuid::new_v4()).unwrap());
        assert_eq!(gateway.store().write_count(), writes);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_at_positions() {
        let gateway = seeded(&["A", "B", "C", "D"]);
        let mut store = RecordStore::open(&gateway).unwrap();

        assert_eq!(store.delete_at(&[3, 1, 1, 99]).unwrap(), 2);
        assert_eq!(names(&store), vec!["A", "C"]);

        let reloaded = RecordStore::open(&gateway).unwrap();
        assert_eq!(names(&reloaded), vec!["A", "C"]);
    }

    #[test]
    fn test_delete_at_nothing_valid() {
        let gateway = seeded(&["A"]);
        let writes = gateway.store().write_count();
        let mut store = RecordStore::open(&gateway).unwrap();

        assert_eq!(store.delete_at(&[5]).unwrap(), 0);
        assert_eq!(store.delete_at(&[]).unwrap(), 0);
        assert_eq!(gateway.store().write_count(), writes);
    }

    #[test]
    fn test_refresh_picks_up_external_writes() {
        let gateway = seeded(&["A"]);
        let mut store = RecordStore::open(&gateway).unwrap();

        gateway.append(sample_record("B", &[], "")).unwrap();
        assert_eq!(store.len(), 1);

        store.refresh().unwrap();
        assert_eq!(names(&store), vec!["A", "B"]);
    }

    #[test]
    fn test_resolve_full_id_and_prefix() {
        let gateway = seeded(&["A", "B"]);
        let store = RecordStore::open(&gateway).unwrap();
        let record = &store.list()[0];
        let id = record.id();

        assert_eq!(store.resolve(&id.to_string()).unwrap().id(), id);
        assert_eq!(
            store
                .resolve(&id.to_string().to_uppercase())
                .unwrap()
                .id(),
            id
        );
        let simple = id.simple().to_string();
        assert_eq!(store.resolve(&simple[..12]).unwrap().id(), id);
    }

    #[test]
    fn test_resolve_missing() {
        let gateway = seeded(&["A"]);
        let store = RecordStore::open(&gateway).unwrap();

        assert!(store.resolve(&Uuid::nil().to_string()).unwrap_err().is_not_found());
        assert!(store.resolve("zz").unwrap_err().is_not_found());
        assert!(store.resolve("").unwrap_err().is_not_found());
    }

    #[test]
    fn test_resolve_ambiguous_prefix() {
        let with_id = |id: &str| -> Record {
            serde_json::from_value(serde_json::json!({
                "id": id,
                "date": "2024-03-05T12:00:00Z",
                "driverName": "D",
                "truckNumber": "1",
                "completedItems": [],
                "comments": ""
            }))
            .unwrap()
        };
        let gateway = RecordGateway::new(MemoryStore::new(), "k", CodecFailure::Surface);
        gateway
            .save(&[
                with_id("abcd0000-0000-4000-8000-000000000001"),
                with_id("abcd0000-0000-4000-8000-000000000002"),
                with_id("ffff0000-0000-4000-8000-000000000003"),
            ])
            .unwrap();
        let store = RecordStore::open(&gateway).unwrap();

        assert!(matches!(
            store.resolve("abcd"),
            Err(Error::AmbiguousRecord { count: 2, .. })
        ));
        assert_eq!(
            store.resolve("abcd0000-0000-4000-8000-0000000000").unwrap_err().to_string(),
            "'abcd0000-0000-4000-8000-0000000000' matches 2 records, use a longer id"
        );
        assert!(store
            .resolve("ABCD00000000400080000000000000002")
            .unwrap_err()
            .is_not_found());
        assert_eq!(
            store.resolve("ff").unwrap().id().to_string(),
            "ffff0000-0000-4000-8000-000000000003"
        );
        assert!(store.resolve("-").unwrap_err().is_not_found());
    }
}
