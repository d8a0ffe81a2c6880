use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use coffer_events::Event;

use crate::account::Account;
use crate::transaction::Transaction;

/// Event: an account was opened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreated {
    pub account: Account,
    pub occurred_at: DateTime<Utc>,
}

/// Event: an account's balance changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountUpdated {
    pub account: Account,
    pub occurred_at: DateTime<Utc>,
}

/// Event: a transaction was recorded against an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCreated {
    pub transaction: Transaction,
    pub occurred_at: DateTime<Utc>,
}

/// Domain events emitted by committing ledger commands.
///
/// Every command that changes an account or records a transaction emits at
/// least one of these. Names are stable wire identifiers; the audit payload
/// is the snapshot of the entity involved, not the whole enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    AccountCreated(AccountCreated),
    AccountUpdated(AccountUpdated),
    TransactionCreated(TransactionCreated),
}

impl LedgerEvent {
    pub fn account_created(account: Account) -> Self {
        Self::AccountCreated(AccountCreated {
            account,
            occurred_at: Utc::now(),
        })
    }

    pub fn account_updated(account: Account) -> Self {
        Self::AccountUpdated(AccountUpdated {
            account,
            occurred_at: Utc::now(),
        })
    }

    pub fn transaction_created(transaction: Transaction) -> Self {
        Self::TransactionCreated(TransactionCreated {
            transaction,
            occurred_at: Utc::now(),
        })
    }
}

impl Event for LedgerEvent {
    fn name(&self) -> &'static str {
        match self {
            LedgerEvent::AccountCreated(_) => "AccountCreated",
            LedgerEvent::AccountUpdated(_) => "AccountUpdated",
            LedgerEvent::TransactionCreated(_) => "TransactionCreated",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            LedgerEvent::AccountCreated(e) => e.occurred_at,
            LedgerEvent::AccountUpdated(e) => e.occurred_at,
            LedgerEvent::TransactionCreated(e) => e.occurred_at,
        }
    }

    fn payload(&self) -> Result<JsonValue, serde_json::Error> {
        match self {
            LedgerEvent::AccountCreated(e) => serde_json::to_value(&e.account),
            LedgerEvent::AccountUpdated(e) => serde_json::to_value(&e.account),
            LedgerEvent::TransactionCreated(e) => serde_json::to_value(&e.transaction),
        }
    }
}
