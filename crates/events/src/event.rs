use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;

/// A domain-agnostic event.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - **append-only** (never updated once recorded)
/// - named by **stable identifiers** audit tooling can filter on
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name (e.g. "AccountCreated").
    fn name(&self) -> &'static str;

    /// When the event occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;

    /// JSON snapshot of the entity the event describes.
    ///
    /// The snapshot is the audit payload: enough to reconstruct what the
    /// entity looked like when the event was recorded, without replaying.
    fn payload(&self) -> Result<JsonValue, serde_json::Error>;
}
