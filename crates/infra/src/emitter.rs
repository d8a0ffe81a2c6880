//! Best-effort publication of committed domain events.

use tracing::error;

use coffer_accounts::LedgerEvent;
use coffer_events::{Event, EventBus, EventRecord};

/// Turns domain events into records and hands them to the bus.
///
/// Callers emit only after their state change committed, which keeps the
/// ordering invariant without any coordination here. On this side, a
/// serialization or publish failure is logged and swallowed: audit delivery
/// must never fail the command that produced the event.
#[derive(Debug)]
pub struct EventEmitter<B> {
    bus: B,
}

impl<B> EventEmitter<B>
where
    B: EventBus<EventRecord>,
{
    pub fn new(bus: B) -> Self {
        Self { bus }
    }

    pub fn emit(&self, event: LedgerEvent) {
        let record = match EventRecord::from_event(&event) {
            Ok(record) => record,
            Err(err) => {
                error!(event = event.name(), error = %err, "event snapshot serialization failed");
                return;
            }
        };

        if let Err(err) = self.bus.publish(record) {
            error!(event = event.name(), error = ?err, "event publication failed");
        }
    }
}
