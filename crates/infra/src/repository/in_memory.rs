use std::collections::HashMap;
use std::sync::RwLock;

use coffer_accounts::{Account, Transaction};
use coffer_core::{AccountId, Cents, OwnerId};

use super::r#trait::{AccountRepository, StoreError, TransactionRepository};

/// In-memory account store.
///
/// Intended for tests and embedded use. The uniqueness scan is linear; a
/// real backend would carry a `(number, owner_id)` unique index instead.
#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<HashMap<AccountId, Account>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountRepository for InMemoryAccountRepository {
    fn insert(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let taken = accounts.values().any(|existing| {
            existing.owner_id == account.owner_id && existing.number == account.number
        });
        if taken {
            return Err(StoreError::UniqueViolation(format!(
                "account number {} for owner {}",
                account.number, account.owner_id
            )));
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    fn find(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
    ) -> Result<Option<Account>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(accounts
            .get(&account_id)
            .filter(|account| &account.owner_id == owner_id)
            .cloned())
    }

    fn update_balance(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
        balance: Cents,
    ) -> Result<Option<Account>, StoreError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(match accounts.get_mut(&account_id) {
            Some(account) if &account.owner_id == owner_id => {
                account.balance = balance;
                Some(account.clone())
            }
            _ => None,
        })
    }

    fn list_for_owner(&self, owner_id: &OwnerId) -> Result<Vec<Account>, StoreError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        Ok(accounts
            .values()
            .filter(|account| &account.owner_id == owner_id)
            .cloned()
            .collect())
    }
}

/// In-memory transaction store, append-only.
#[derive(Debug, Default)]
pub struct InMemoryTransactionRepository {
    transactions: RwLock<Vec<Transaction>>,
}

impl InMemoryTransactionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionRepository for InMemoryTransactionRepository {
    fn insert(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        transactions.push(transaction.clone());
        Ok(transaction)
    }

    fn list_for_account(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
    ) -> Result<Vec<Transaction>, StoreError> {
        let transactions = self
            .transactions
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        let mut rows: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| tx.account_id == account_id && &tx.owner_id == owner_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }
}
