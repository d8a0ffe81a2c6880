use coffer_core::OwnerId;

/// A command runs on behalf of one owner (command abstraction).
///
/// Commands represent **intent** - a request to change ledger state. They are
/// **transient** (not persisted); accepted changes are described by events.
///
/// ## Command vs Event
///
/// - **Command**: Intent to do something (e.g., "Apply a deposit of 1000")
/// - **Event**: Fact that something happened (e.g., "TransactionCreated")
///
/// Commands are rejected if invalid (validation errors). Events represent
/// accepted changes.
///
/// ## Owner Scoping
///
/// Every command names the owner it runs for via `owner_id()`. The owner
/// arrives pre-validated from the identity layer; handlers treat it as the
/// authorization scope for every storage access they make.
///
/// ## Design Constraints
///
/// Commands must be:
/// - **Cloneable**: Commands may be copied for retries, logging, etc.
/// - **Send + Sync**: Commands cross thread boundaries
/// - **'static**: Commands don't contain borrowed data (must own all data)
pub trait Command: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable command name (e.g. "CreateAccount"), used in dispatch traces.
    fn name(&self) -> &'static str;

    /// The owner on whose behalf the command runs.
    fn owner_id(&self) -> &OwnerId;
}
