//! Persistence boundary for primary state.
//!
//! Repositories store current entity state; the audit trail lives in the
//! event store. Every read and write is owner-scoped at the key level, so
//! a caller can never observe another owner's rows.

pub mod in_memory;
pub mod r#trait;

pub use in_memory::{InMemoryAccountRepository, InMemoryTransactionRepository};
pub use r#trait::{AccountRepository, StoreError, TransactionRepository};
