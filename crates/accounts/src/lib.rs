//! Accounts module (monetary accounts and their transactions).
//!
//! Pure domain logic only: no IO, no HTTP, no persistence concerns.

pub mod account;
pub mod events;
pub mod transaction;

pub use account::{Account, CreateAccount, GetAccounts, GetBalance};
pub use events::{AccountCreated, AccountUpdated, LedgerEvent, TransactionCreated};
pub use transaction::{ApplyTransaction, GetTransactions, Transaction, TransactionKind};
