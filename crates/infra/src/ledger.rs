//! Account ledger service.
//!
//! The single owner of the balance invariant: every balance write in the
//! system goes through [`LedgerService::apply_delta`], and every read of
//! account state goes through [`LedgerService::balance`] or
//! [`LedgerService::accounts_for`]. Nothing else touches `Account::balance`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use coffer_accounts::Account;
use coffer_core::{AccountId, Cents, LedgerError, OwnerId};

use crate::repository::{AccountRepository, StoreError};

/// Per-account lock registry.
///
/// The registry mutex is held only long enough to fetch or insert an entry;
/// the per-account mutex it hands out is what serializes the
/// read-decide-write window. Entries are never removed, so the map grows
/// with the set of accounts the process has touched.
#[derive(Debug, Default)]
struct AccountLocks {
    locks: Mutex<HashMap<AccountId, Arc<Mutex<()>>>>,
}

impl AccountLocks {
    fn lock_for(&self, account_id: AccountId) -> Result<Arc<Mutex<()>>, LedgerError> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LedgerError::concurrent("account lock registry poisoned"))?;

        Ok(locks.entry(account_id).or_default().clone())
    }
}

/// Balance mutation and account reads, serialized per account.
#[derive(Debug)]
pub struct LedgerService<A> {
    accounts: A,
    locks: AccountLocks,
}

impl<A> LedgerService<A>
where
    A: AccountRepository,
{
    pub fn new(accounts: A) -> Self {
        Self {
            accounts,
            locks: AccountLocks::default(),
        }
    }

    /// Open an account with a zero balance.
    ///
    /// A `(number, owner)` collision surfaces as a typed conflict so callers
    /// can distinguish it from storage trouble.
    pub fn create_account(
        &self,
        owner_id: OwnerId,
        number: u64,
        name: String,
    ) -> Result<Account, LedgerError> {
        let account = Account::open(owner_id, number, name);

        match self.accounts.insert(account) {
            Ok(created) => {
                debug!(account = %created.id, number, "account opened");
                Ok(created)
            }
            Err(StoreError::UniqueViolation(_)) => Err(LedgerError::DuplicateAccount { number }),
            Err(err) => Err(err.into()),
        }
    }

    /// Current state of one account, scoped to its owner.
    ///
    /// An id held by another owner reads as missing. The caller cannot tell
    /// the two cases apart, and that is the contract.
    pub fn balance(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
    ) -> Result<Account, LedgerError> {
        self.accounts
            .find(account_id, owner_id)?
            .ok_or(LedgerError::AccountNotFound)
    }

    /// All accounts owned by `owner_id`.
    pub fn accounts_for(&self, owner_id: &OwnerId) -> Result<Vec<Account>, LedgerError> {
        Ok(self.accounts.list_for_owner(owner_id)?)
    }

    /// Apply a signed delta to one account's balance.
    ///
    /// The read-decide-write sequence runs under the account's lock, so
    /// concurrent deltas on the same account observe each other's effect
    /// while deltas on different accounts proceed in parallel. Rejections
    /// leave the stored balance untouched.
    pub fn apply_delta(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
        delta: Cents,
    ) -> Result<Account, LedgerError> {
        let lock = self.locks.lock_for(account_id)?;
        let _guard = lock
            .lock()
            .map_err(|_| LedgerError::concurrent(format!("account lock poisoned: {account_id}")))?;

        let current = self
            .accounts
            .find(account_id, owner_id)?
            .ok_or(LedgerError::AccountNotFound)?;

        let decided = current.apply_delta(delta)?;

        self.accounts
            .update_balance(account_id, owner_id, decided.balance)?
            .ok_or(LedgerError::AccountNotFound)
    }
}
