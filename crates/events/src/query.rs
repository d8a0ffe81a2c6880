use coffer_core::OwnerId;

/// A read-only request scoped to one owner (query abstraction).
///
/// Queries never mutate state; running the same query twice with no
/// intervening command returns identical results. Like commands, they carry
/// the owner they run for, and handlers apply that scope to every read.
pub trait Query: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable query name (e.g. "GetBalance"), used in dispatch traces.
    fn name(&self) -> &'static str;

    /// The owner on whose behalf the query runs.
    fn owner_id(&self) -> &OwnerId;
}
