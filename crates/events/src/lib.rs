//! Messaging primitives: commands, queries, domain events, and the bus.

pub mod bus;
pub mod command;
pub mod event;
pub mod handler;
pub mod in_memory_bus;
pub mod query;
pub mod record;

pub use bus::{EventBus, Subscription};
pub use command::Command;
pub use event::Event;
pub use handler::{CommandHandler, QueryHandler};
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
pub use query::Query;
pub use record::EventRecord;
