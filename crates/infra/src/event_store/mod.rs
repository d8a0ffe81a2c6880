//! Append-only audit trail boundary.
//!
//! Committed domain events arrive here through the bus and the subscriber
//! worker. A failure anywhere on this path is logged and absorbed; the
//! command that produced the event never observes it.

pub mod in_memory;
pub mod subscriber;
pub mod r#trait;

pub use in_memory::InMemoryEventStore;
pub use subscriber::EventStoreSubscriber;
pub use r#trait::{EventStore, EventStoreError};
