use serde::{Deserialize, Serialize};

use coffer_core::{AccountId, Cents, LedgerError, LedgerResult, OwnerId};
use coffer_events::{Command, Query};

/// A monetary account, owned exclusively by one owner.
///
/// The balance is state, not a derivation: it is mutated only through the
/// ledger service, and `balance >= 0` holds at all observable times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub owner_id: OwnerId,
    pub number: u64,
    pub name: String,
    pub balance: Cents,
}

impl Account {
    /// Open a new account. Balances always start at zero.
    pub fn open(owner_id: OwnerId, number: u64, name: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            owner_id,
            number,
            name: name.into(),
            balance: 0,
        }
    }

    /// Pure decision: the account after `delta`, or why it cannot be applied.
    ///
    /// This does not persist anything; callers own serialization of the
    /// read-decide-write window.
    pub fn apply_delta(&self, delta: Cents) -> LedgerResult<Account> {
        let balance = self
            .balance
            .checked_add(delta)
            .ok_or(LedgerError::BalanceOverflow)?;

        if balance < 0 {
            return Err(LedgerError::InsufficientFunds {
                balance: self.balance,
                requested: delta.saturating_abs(),
            });
        }

        Ok(Account {
            balance,
            ..self.clone()
        })
    }
}

/// Command: open a new account for an owner.
///
/// `number` must be unique per owner; a collision is a conflict, not a retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccount {
    pub owner_id: OwnerId,
    pub number: u64,
    pub name: String,
}

impl Command for CreateAccount {
    fn name(&self) -> &'static str {
        "CreateAccount"
    }

    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}

/// Query: all accounts owned by one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetAccounts {
    pub owner_id: OwnerId,
}

impl Query for GetAccounts {
    fn name(&self) -> &'static str {
        "GetAccounts"
    }

    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}

/// Query: one account with its current balance, scoped to its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetBalance {
    pub account_id: AccountId,
    pub owner_id: OwnerId,
}

impl Query for GetBalance {
    fn name(&self) -> &'static str {
        "GetBalance"
    }

    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}
