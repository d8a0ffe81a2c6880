use coffer_events::EventRecord;

use super::r#trait::{EventStore, EventStoreError};

/// Bus subscriber that lands every published record in the audit store.
///
/// The record is already in persisted form when it leaves the publisher, so
/// this is a pure pass-through: no filtering, no transformation. Errors are
/// reported by the worker loop that drives it; the command that produced the
/// record has long since returned.
#[derive(Debug)]
pub struct EventStoreSubscriber<S> {
    store: S,
}

impl<S> EventStoreSubscriber<S>
where
    S: EventStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append one published record to the audit trail.
    pub fn handle(&self, record: EventRecord) -> Result<(), EventStoreError> {
        self.store.append(record)
    }
}
