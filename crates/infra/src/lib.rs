//! Infrastructure layer: storage adapters, the ledger runtime, dispatchers,
//! and background workers.

pub mod command_dispatcher;
pub mod emitter;
pub mod event_store;
pub mod ledger;
pub mod processor;
pub mod query_dispatcher;
pub mod repository;
pub mod workers;

mod integration_tests;
