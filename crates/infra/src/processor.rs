//! Transaction pipeline: mutate the balance, record the transaction, emit.

use std::sync::Arc;

use tracing::{error, warn};

use coffer_accounts::{LedgerEvent, Transaction, TransactionKind};
use coffer_core::{AccountId, Cents, LedgerError, OwnerId, format_cents};
use coffer_events::{EventBus, EventRecord};

use crate::emitter::EventEmitter;
use crate::ledger::LedgerService;
use crate::repository::{AccountRepository, TransactionRepository};

/// Transaction pipeline configuration.
#[derive(Debug, Clone, Copy)]
pub struct ProcessorConfig {
    /// Deposits at or above this amount, in cents, are flagged in the logs.
    pub large_deposit_alert_threshold: Cents,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            // 10,000.00 in minor units.
            large_deposit_alert_threshold: 1_000_000,
        }
    }
}

/// Coordinates one transaction request into a single logical unit.
///
/// Step order is the contract: validate, mutate the balance, record the
/// transaction, emit. Rejections before the balance moves propagate
/// unchanged and leave no trace. A failure to record the transaction after
/// the balance committed is a consistency breach, not a rejection, and is
/// reported as [`LedgerError::PersistenceInconsistency`].
pub struct TransactionProcessor<A, T, B> {
    ledger: Arc<LedgerService<A>>,
    transactions: T,
    emitter: EventEmitter<B>,
    config: ProcessorConfig,
}

impl<A, T, B> TransactionProcessor<A, T, B>
where
    A: AccountRepository,
    T: TransactionRepository,
    B: EventBus<EventRecord>,
{
    pub fn new(
        ledger: Arc<LedgerService<A>>,
        transactions: T,
        bus: B,
        config: ProcessorConfig,
    ) -> Self {
        Self {
            ledger,
            transactions,
            emitter: EventEmitter::new(bus),
            config,
        }
    }

    pub fn process(
        &self,
        owner_id: OwnerId,
        account_id: AccountId,
        amount: Cents,
        kind: TransactionKind,
    ) -> Result<Transaction, LedgerError> {
        // 1) Validate and sign before any state is touched.
        let delta = kind.signed_delta(amount)?;

        if kind == TransactionKind::Deposit && amount >= self.config.large_deposit_alert_threshold {
            warn!(
                owner = %owner_id,
                account = %account_id,
                amount = %format_cents(amount),
                "large deposit flagged"
            );
        }

        // 2) Balance mutation, serialized per account. Rejections propagate
        //    unchanged; nothing has been recorded yet.
        let account = self.ledger.apply_delta(account_id, &owner_id, delta)?;

        // 3) Record the transaction. The balance is already committed, so a
        //    failure here is a divergence between history and state.
        let transaction = Transaction::record(account_id, owner_id, amount, kind);
        let transaction = match self.transactions.insert(transaction) {
            Ok(recorded) => recorded,
            Err(err) => {
                error!(
                    account = %account_id,
                    balance = account.balance,
                    error = %err,
                    "transaction record lost after balance update"
                );
                return Err(LedgerError::inconsistency(format!(
                    "transaction record failed after balance update: {err}"
                )));
            }
        };

        // 4) Emit after commit. Audit delivery never fails the command.
        self.emitter
            .emit(LedgerEvent::transaction_created(transaction.clone()));
        self.emitter.emit(LedgerEvent::account_updated(account));

        Ok(transaction)
    }
}
