// 🗂️ Record Store - Ordered, de-duplicated session list
//
// Insertion order is display order. Identity key (name, category) is
// unique across the store. Positions shift on removal, so callers
// re-derive indices after every mutation.

use crate::record::{Category, IdentityKey, Record};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("{category} {name} already exists")]
    Duplicate { name: String, category: Category },

    #[error("no record at position {index} (store holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        RecordStore {
            records: Vec::new(),
        }
    }

    /// Append `record` unless its identity key is already present.
    ///
    /// Linear scan; the store is interactive-scale.
    pub fn add(&mut self, record: Record) -> Result<(), StoreError> {
        let key = record.identity_key();

        if self.contains_key(&key) {
            warn!(name = %key.name, category = %key.category, "duplicate record rejected");
            return Err(StoreError::Duplicate {
                name: key.name,
                category: key.category,
            });
        }

        debug!(name = %key.name, category = %key.category, position = self.records.len(), "record added");
        self.records.push(record);
        Ok(())
    }

    /// Remove and return the record at `index`, shifting later entries left
    pub fn remove_at(&mut self, index: usize) -> Result<Record, StoreError> {
        let len = self.records.len();
        if index >= len {
            warn!(index, len, "stale position, nothing removed");
            return Err(StoreError::IndexOutOfRange { index, len });
        }

        let removed = self.records.remove(index);
        debug!(name = %removed.name(), category = %removed.category(), index, "record removed");
        Ok(removed)
    }

    pub fn contains_key(&self, key: &IdentityKey) -> bool {
        self.records
            .iter()
            .any(|r| r.category() == key.category && r.name() == key.name)
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Profile lines in store order
    pub fn describe_all(&self) -> Vec<String> {
        self.records.iter().map(Record::describe).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// End of session
    pub fn clear(&mut self) {
        debug!(count = self.records.len(), "store cleared");
        self.records.clear();
    }
}

// ============================================================================
// TESTS
// ============================================================================
