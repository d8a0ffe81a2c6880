use std::sync::RwLock;

use coffer_events::EventRecord;

use super::r#trait::{EventStore, EventStoreError};

/// In-memory append-only audit store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    records: RwLock<Vec<EventRecord>>,
}

impl InMemoryEventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records currently stored.
    pub fn len(&self) -> usize {
        self.records.read().map(|records| records.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventStore for InMemoryEventStore {
    fn append(&self, record: EventRecord) -> Result<(), EventStoreError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| EventStoreError::Unavailable("lock poisoned".to_string()))?;

        records.push(record);
        Ok(())
    }

    fn records(&self) -> Result<Vec<EventRecord>, EventStoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| EventStoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(records.clone())
    }

    fn records_named(&self, name: &str) -> Result<Vec<EventRecord>, EventStoreError> {
        let records = self
            .records
            .read()
            .map_err(|_| EventStoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(records
            .iter()
            .filter(|record| record.name() == name)
            .cloned()
            .collect())
    }
}
