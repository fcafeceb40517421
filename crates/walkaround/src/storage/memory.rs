//! In-process key-value store.

use std::cell::RefCell;
use std::collections::BTreeMap;

use crate::error::Result;

use super::KeyValueStore;

/// A [`KeyValueStore`] held entirely in memory.
///
/// Nothing survives the process; useful for tests and for embedding the
/// checklist logic where the host owns persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<BTreeMap<String, Vec<u8>>>,
    writes: RefCell<usize>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `put` calls made so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        *self.writes.borrow()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_vec());
        *self.writes.borrow_mut() += 1;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_and_write_count() {
        let store = MemoryStore::new();
        assert_eq!(store.write_count(), 0);
        assert!(store.get("k").unwrap().is_none());

        store.put("k", b"one").unwrap();
        store.put("k", b"two").unwrap();

        assert_eq!(store.get("k").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.write_count(), 2);
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::new();
        store.put("k", b"v").unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
    }
}
