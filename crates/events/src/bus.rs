//! Event publishing/subscription abstraction (mechanics only).
//!
//! This module provides the **event bus pattern** - a pub/sub mechanism that
//! decouples command handling from event consumers (the audit store today,
//! more subscribers later).
//!
//! ## Design Philosophy
//!
//! The bus is intentionally **lightweight** and makes minimal assumptions:
//!
//! - **Transport-agnostic**: Works with in-memory channels or an external broker
//! - **Best-effort fan-out**: A dead or failing subscriber never blocks the others
//! - **No persistence**: The bus distributes records; durability is the audit
//!   store's job, on the consumer side
//!
//! ## Delivery and Command Success
//!
//! Commands succeed or fail on their own storage effects. Publication runs
//! after commit and its failures are logged by the publishing side, never
//! surfaced as the command's result. Consumers therefore see events with a
//! delay (or, in the worst case, not at all) and must treat duplicates and
//! gaps as possible.

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to the event stream.
///
/// Each subscription gets a copy of every record published after it was
/// created (broadcast semantics). Records published before `subscribe()` are
/// not replayed; subscribe before the producers start.
///
/// ## Consumption Pattern
///
/// ```ignore
/// let sub = bus.subscribe();
///
/// loop {
///     match sub.recv_timeout(Duration::from_millis(250)) {
///         Ok(record) => handle(record),
///         Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue, // check shutdown
///         Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break, // bus gone
///     }
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption: one
/// subscription, one consumer thread.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// The bus sits between the command path and its consumers:
///
/// ```text
/// Command handler → (commit) → EventBus (publish) → Subscribers
///                                                       └─ audit event store
/// ```
///
/// State is committed **first**, then published. The command path does not
/// wait for consumers; a slow or broken subscriber shows up in the logs, not
/// in command results.
///
/// ## Thread Safety
///
/// The trait requires `Send + Sync`; multiple threads may publish
/// concurrently. Ordering between concurrent publishers is unspecified, but
/// records from a single publisher arrive in publish order.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
