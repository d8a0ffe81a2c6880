//! Command routing (application-level orchestration).
//!
//! This module implements the **typed command dispatch pattern** for the
//! write side. Each command type has exactly one handler, wired in at
//! construction time, and routing is resolved statically through a
//! `DispatchCommand<C>` impl per command type. There is no runtime registry
//! to misconfigure and no downcasting on the hot path.
//!
//! ## Command Execution Flow
//!
//! ```text
//! Command
//!   ↓
//! 1. Dispatcher picks the handler for the command's type (compile-time)
//!   ↓
//! 2. Handler runs the domain operation (ledger, processor)
//!   ↓
//! 3. Committed state changes are emitted to the bus as event records
//! ```
//!
//! ## Error Semantics
//!
//! The dispatcher adds nothing to handler semantics: no retries, no
//! queueing, no error mapping. A handler's `LedgerError` reaches the caller
//! exactly as the handler produced it; the dispatcher only logs the routing
//! decision.

use std::sync::Arc;

use tracing::debug;

use coffer_accounts::{Account, ApplyTransaction, CreateAccount, LedgerEvent, Transaction};
use coffer_core::LedgerError;
use coffer_events::{Command, CommandHandler, EventBus, EventRecord};

use crate::emitter::EventEmitter;
use crate::ledger::LedgerService;
use crate::processor::{ProcessorConfig, TransactionProcessor};
use crate::repository::{AccountRepository, TransactionRepository};

/// Handles `CreateAccount`: open the account, then emit `AccountCreated`.
pub struct CreateAccountHandler<A, B> {
    ledger: Arc<LedgerService<A>>,
    emitter: EventEmitter<B>,
}

impl<A, B> CreateAccountHandler<A, B>
where
    A: AccountRepository,
    B: EventBus<EventRecord>,
{
    pub fn new(ledger: Arc<LedgerService<A>>, bus: B) -> Self {
        Self {
            ledger,
            emitter: EventEmitter::new(bus),
        }
    }
}

impl<A, B> CommandHandler for CreateAccountHandler<A, B>
where
    A: AccountRepository,
    B: EventBus<EventRecord>,
{
    type Cmd = CreateAccount;
    type Output = Account;
    type Error = LedgerError;

    fn handle(&self, command: CreateAccount) -> Result<Account, LedgerError> {
        let account = self
            .ledger
            .create_account(command.owner_id, command.number, command.name)?;

        self.emitter
            .emit(LedgerEvent::account_created(account.clone()));

        Ok(account)
    }
}

/// Handles `ApplyTransaction` by delegating to the transaction pipeline.
pub struct ApplyTransactionHandler<A, T, B> {
    processor: TransactionProcessor<A, T, B>,
}

impl<A, T, B> ApplyTransactionHandler<A, T, B>
where
    A: AccountRepository,
    T: TransactionRepository,
    B: EventBus<EventRecord>,
{
    pub fn new(processor: TransactionProcessor<A, T, B>) -> Self {
        Self { processor }
    }
}

impl<A, T, B> CommandHandler for ApplyTransactionHandler<A, T, B>
where
    A: AccountRepository,
    T: TransactionRepository,
    B: EventBus<EventRecord>,
{
    type Cmd = ApplyTransaction;
    type Output = Transaction;
    type Error = LedgerError;

    fn handle(&self, command: ApplyTransaction) -> Result<Transaction, LedgerError> {
        self.processor.process(
            command.owner_id,
            command.account_id,
            command.amount,
            command.kind,
        )
    }
}

/// Routes a typed command to its single registered handler.
pub trait DispatchCommand<C: Command> {
    type Output;

    fn dispatch(&self, command: C) -> Result<Self::Output, LedgerError>;
}

/// Write-side entry point: the full command pipeline behind typed routing.
///
/// Construction wires every handler once; there is no way to dispatch a
/// command type the dispatcher was not built for.
pub struct CommandDispatcher<A, T, B> {
    create_account: CreateAccountHandler<A, B>,
    apply_transaction: ApplyTransactionHandler<A, T, B>,
}

impl<A, T, B> CommandDispatcher<A, T, B>
where
    A: AccountRepository,
    T: TransactionRepository,
    B: EventBus<EventRecord> + Clone,
{
    pub fn new(
        ledger: Arc<LedgerService<A>>,
        transactions: T,
        bus: B,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            create_account: CreateAccountHandler::new(ledger.clone(), bus.clone()),
            apply_transaction: ApplyTransactionHandler::new(TransactionProcessor::new(
                ledger,
                transactions,
                bus,
                config,
            )),
        }
    }
}

impl<A, T, B> DispatchCommand<CreateAccount> for CommandDispatcher<A, T, B>
where
    A: AccountRepository,
    T: TransactionRepository,
    B: EventBus<EventRecord>,
{
    type Output = Account;

    fn dispatch(&self, command: CreateAccount) -> Result<Account, LedgerError> {
        debug!(command = command.name(), owner = %command.owner_id(), "dispatching command");
        self.create_account.handle(command)
    }
}

impl<A, T, B> DispatchCommand<ApplyTransaction> for CommandDispatcher<A, T, B>
where
    A: AccountRepository,
    T: TransactionRepository,
    B: EventBus<EventRecord>,
{
    type Output = Transaction;

    fn dispatch(&self, command: ApplyTransaction) -> Result<Transaction, LedgerError> {
        debug!(command = command.name(), owner = %command.owner_id(), "dispatching command");
        self.apply_transaction.handle(command)
    }
}
