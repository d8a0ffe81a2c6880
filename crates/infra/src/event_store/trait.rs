use std::sync::Arc;

use thiserror::Error;

use coffer_events::EventRecord;

/// Audit store operation error.
///
/// Infrastructure errors only. Callers on the command path never see these:
/// append runs downstream of commit, and its failures are logged rather than
/// returned to the command's caller.
#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error("append failed: {0}")]
    Append(String),

    #[error("event storage unavailable: {0}")]
    Unavailable(String),
}

/// Append-only audit trail of committed domain events.
///
/// The store records what happened, in arrival order, and is never consulted
/// to answer queries or rebuild state. Reads exist for audit tooling and for
/// tests that assert on the trail.
///
/// Implementations must preserve arrival order and must never update or
/// delete a record once appended.
pub trait EventStore: Send + Sync {
    /// Append one record. Records are write-once.
    fn append(&self, record: EventRecord) -> Result<(), EventStoreError>;

    /// Every record, in append order.
    fn records(&self) -> Result<Vec<EventRecord>, EventStoreError>;

    /// Records carrying one event name, in append order.
    fn records_named(&self, name: &str) -> Result<Vec<EventRecord>, EventStoreError>;
}

impl<S> EventStore for Arc<S>
where
    S: EventStore + ?Sized,
{
    fn append(&self, record: EventRecord) -> Result<(), EventStoreError> {
        (**self).append(record)
    }

    fn records(&self) -> Result<Vec<EventRecord>, EventStoreError> {
        (**self).records()
    }

    fn records_named(&self, name: &str) -> Result<Vec<EventRecord>, EventStoreError> {
        (**self).records_named(name)
    }
}
