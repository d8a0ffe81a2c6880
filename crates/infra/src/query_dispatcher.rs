//! Query routing (read side).
//!
//! Mirrors the command dispatcher for reads: one handler per query type,
//! wired at construction, routed through a `DispatchQuery<Q>` impl per
//! type. Queries serve consistent snapshots of primary state; nothing here
//! reads the audit trail.

use std::sync::Arc;

use tracing::debug;

use coffer_accounts::{Account, GetAccounts, GetBalance, GetTransactions, Transaction};
use coffer_core::LedgerError;
use coffer_events::{Query, QueryHandler};

use crate::ledger::LedgerService;
use crate::repository::{AccountRepository, TransactionRepository};

/// Handles `GetAccounts`.
pub struct GetAccountsHandler<A> {
    ledger: Arc<LedgerService<A>>,
}

impl<A> GetAccountsHandler<A>
where
    A: AccountRepository,
{
    pub fn new(ledger: Arc<LedgerService<A>>) -> Self {
        Self { ledger }
    }
}

impl<A> QueryHandler for GetAccountsHandler<A>
where
    A: AccountRepository,
{
    type Qry = GetAccounts;
    type Output = Vec<Account>;
    type Error = LedgerError;

    fn handle(&self, query: GetAccounts) -> Result<Vec<Account>, LedgerError> {
        self.ledger.accounts_for(&query.owner_id)
    }
}

/// Handles `GetBalance`.
pub struct GetBalanceHandler<A> {
    ledger: Arc<LedgerService<A>>,
}

impl<A> GetBalanceHandler<A>
where
    A: AccountRepository,
{
    pub fn new(ledger: Arc<LedgerService<A>>) -> Self {
        Self { ledger }
    }
}

impl<A> QueryHandler for GetBalanceHandler<A>
where
    A: AccountRepository,
{
    type Qry = GetBalance;
    type Output = Account;
    type Error = LedgerError;

    fn handle(&self, query: GetBalance) -> Result<Account, LedgerError> {
        self.ledger.balance(query.account_id, &query.owner_id)
    }
}

/// Handles `GetTransactions`.
///
/// An account held by another owner yields an empty history, not an error:
/// the repository key simply matches nothing.
pub struct GetTransactionsHandler<T> {
    transactions: T,
}

impl<T> GetTransactionsHandler<T>
where
    T: TransactionRepository,
{
    pub fn new(transactions: T) -> Self {
        Self { transactions }
    }
}

impl<T> QueryHandler for GetTransactionsHandler<T>
where
    T: TransactionRepository,
{
    type Qry = GetTransactions;
    type Output = Vec<Transaction>;
    type Error = LedgerError;

    fn handle(&self, query: GetTransactions) -> Result<Vec<Transaction>, LedgerError> {
        Ok(self
            .transactions
            .list_for_account(query.account_id, &query.owner_id)?)
    }
}

/// Routes a typed query to its single registered handler.
pub trait DispatchQuery<Q: Query> {
    type Output;

    fn dispatch(&self, query: Q) -> Result<Self::Output, LedgerError>;
}

/// Read-side entry point.
pub struct QueryDispatcher<A, T> {
    get_accounts: GetAccountsHandler<A>,
    get_balance: GetBalanceHandler<A>,
    get_transactions: GetTransactionsHandler<T>,
}

impl<A, T> QueryDispatcher<A, T>
where
    A: AccountRepository,
    T: TransactionRepository,
{
    pub fn new(ledger: Arc<LedgerService<A>>, transactions: T) -> Self {
        Self {
            get_accounts: GetAccountsHandler::new(ledger.clone()),
            get_balance: GetBalanceHandler::new(ledger),
            get_transactions: GetTransactionsHandler::new(transactions),
        }
    }
}

impl<A, T> DispatchQuery<GetAccounts> for QueryDispatcher<A, T>
where
    A: AccountRepository,
    T: TransactionRepository,
{
    type Output = Vec<Account>;

    fn dispatch(&self, query: GetAccounts) -> Result<Vec<Account>, LedgerError> {
        debug!(query = query.name(), owner = %query.owner_id(), "dispatching query");
        self.get_accounts.handle(query)
    }
}

impl<A, T> DispatchQuery<GetBalance> for QueryDispatcher<A, T>
where
    A: AccountRepository,
    T: TransactionRepository,
{
    type Output = Account;

    fn dispatch(&self, query: GetBalance) -> Result<Account, LedgerError> {
        debug!(query = query.name(), owner = %query.owner_id(), "dispatching query");
        self.get_balance.handle(query)
    }
}

impl<A, T> DispatchQuery<GetTransactions> for QueryDispatcher<A, T>
where
    A: AccountRepository,
    T: TransactionRepository,
{
    type Output = Vec<Transaction>;

    fn dispatch(&self, query: GetTransactions) -> Result<Vec<Transaction>, LedgerError> {
        debug!(query = query.name(), owner = %query.owner_id(), "dispatching query");
        self.get_transactions.handle(query)
    }
}
