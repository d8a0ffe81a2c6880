use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use coffer_core::EventId;

use crate::event::Event;

/// Persisted form of a domain event.
///
/// This is the unit the bus carries and the audit store appends. Records are
/// write-once: once built from an event they are never mutated.
///
/// Notes:
/// - `name` is the event's stable name ("AccountCreated", ...).
/// - `payload` is the entity snapshot, already serialized; consumers need no
///   knowledge of the domain types to store or forward it.
/// - `recorded_at` carries the event's business time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    event_id: EventId,
    name: String,
    payload: JsonValue,
    recorded_at: DateTime<Utc>,
}

impl EventRecord {
    pub fn new(
        event_id: EventId,
        name: impl Into<String>,
        payload: JsonValue,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            name: name.into(),
            payload,
            recorded_at,
        }
    }

    /// Build a record from a typed event, assigning a fresh record id.
    ///
    /// Fails only when the event's snapshot cannot be serialized.
    pub fn from_event<E>(event: &E) -> Result<Self, serde_json::Error>
    where
        E: Event,
    {
        Ok(Self {
            event_id: EventId::new(),
            name: event.name().to_string(),
            payload: event.payload()?,
            recorded_at: event.occurred_at(),
        })
    }

    pub fn event_id(&self) -> EventId {
        self.event_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &JsonValue {
        &self.payload
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}
