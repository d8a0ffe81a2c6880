use crate::{Command, Query};

/// Handles one command type (command handler abstraction).
///
/// One implementation per command type; the dispatcher owns the mapping from
/// command to handler. Handlers return a domain result directly - event
/// emission is a side channel (the bus), not the return value.
///
/// ## Design Philosophy
///
/// This trait makes **no storage assumptions**. The error type is associated
/// because errors belong to the domain, not to this seam. `Output` is
/// whatever the caller needs back (the created entity, usually), so callers
/// at any ingress point get their answer without a follow-up read.
pub trait CommandHandler {
    type Cmd: Command;
    type Output;
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn handle(&self, command: Self::Cmd) -> Result<Self::Output, Self::Error>;
}

/// Handles one query type (query handler abstraction).
///
/// Query handlers are read-only: they must not mutate state or emit events.
pub trait QueryHandler {
    type Qry: Query;
    type Output;
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn handle(&self, query: Self::Qry) -> Result<Self::Output, Self::Error>;
}
