use std::sync::Arc;

use thiserror::Error;

use coffer_accounts::{Account, Transaction};
use coffer_core::{AccountId, Cents, LedgerError, OwnerId};

/// Repository operation error.
///
/// Carries infrastructure failures only. Domain meaning is assigned at the
/// service boundary: insert paths match `UniqueViolation` explicitly to
/// produce a typed conflict, everything else degrades to a storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique constraint was violated.
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    /// The backing store could not serve the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// Fallback mapping for read and update paths.
impl From<StoreError> for LedgerError {
    fn from(value: StoreError) -> Self {
        LedgerError::storage(value.to_string())
    }
}

/// Durable account state, keyed by `(account id, owner id)`.
///
/// Owner scoping is part of the key on every operation: an id that exists
/// under a different owner behaves exactly like a missing row.
pub trait AccountRepository: Send + Sync {
    /// Insert a new account. `(number, owner_id)` must be unique.
    fn insert(&self, account: Account) -> Result<Account, StoreError>;

    /// Look up one account by id, scoped to its owner.
    fn find(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
    ) -> Result<Option<Account>, StoreError>;

    /// Persist a new balance. Returns the updated account, or `None` when
    /// `(account_id, owner_id)` matches no row.
    fn update_balance(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
        balance: Cents,
    ) -> Result<Option<Account>, StoreError>;

    /// All accounts owned by `owner_id`. Order is unspecified.
    fn list_for_owner(&self, owner_id: &OwnerId) -> Result<Vec<Account>, StoreError>;
}

/// Durable transaction records, append-only.
pub trait TransactionRepository: Send + Sync {
    /// Persist one transaction record.
    fn insert(&self, transaction: Transaction) -> Result<Transaction, StoreError>;

    /// Transactions for one account, scoped to its owner, newest first.
    fn list_for_account(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
    ) -> Result<Vec<Transaction>, StoreError>;
}

impl<R> AccountRepository for Arc<R>
where
    R: AccountRepository + ?Sized,
{
    fn insert(&self, account: Account) -> Result<Account, StoreError> {
        (**self).insert(account)
    }

    fn find(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
    ) -> Result<Option<Account>, StoreError> {
        (**self).find(account_id, owner_id)
    }

    fn update_balance(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
        balance: Cents,
    ) -> Result<Option<Account>, StoreError> {
        (**self).update_balance(account_id, owner_id, balance)
    }

    fn list_for_owner(&self, owner_id: &OwnerId) -> Result<Vec<Account>, StoreError> {
        (**self).list_for_owner(owner_id)
    }
}

impl<R> TransactionRepository for Arc<R>
where
    R: TransactionRepository + ?Sized,
{
    fn insert(&self, transaction: Transaction) -> Result<Transaction, StoreError> {
        (**self).insert(transaction)
    }

    fn list_for_account(
        &self,
        account_id: AccountId,
        owner_id: &OwnerId,
    ) -> Result<Vec<Transaction>, StoreError> {
        (**self).list_for_account(account_id, owner_id)
    }
}
