use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use coffer_core::{AccountId, Cents, LedgerError, LedgerResult, OwnerId, TransactionId};
use coffer_events::{Command, Query};

/// Direction of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    Deposit,
    Withdrawal,
}

impl TransactionKind {
    /// Translate a positive amount into the signed balance delta.
    ///
    /// Zero and negative amounts are rejected here, before any state is
    /// touched; "withdraw a negative amount" must never become a deposit.
    pub fn signed_delta(self, amount: Cents) -> LedgerResult<Cents> {
        if amount <= 0 {
            return Err(LedgerError::InvalidAmount { amount });
        }

        Ok(match self {
            TransactionKind::Deposit => amount,
            TransactionKind::Withdrawal => -amount,
        })
    }
}

/// A recorded transaction. Immutable once created; append-only per account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub account_id: AccountId,
    pub owner_id: OwnerId,
    /// Always positive; direction lives in `kind`.
    pub amount: Cents,
    pub kind: TransactionKind,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// New transaction record with a fresh id, stamped now.
    pub fn record(
        account_id: AccountId,
        owner_id: OwnerId,
        amount: Cents,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            account_id,
            owner_id,
            amount,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Command: apply a deposit or withdrawal to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyTransaction {
    pub owner_id: OwnerId,
    pub account_id: AccountId,
    pub amount: Cents,
    pub kind: TransactionKind,
}

impl Command for ApplyTransaction {
    fn name(&self) -> &'static str {
        "ApplyTransaction"
    }

    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}

/// Query: transactions for one account, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetTransactions {
    pub account_id: AccountId,
    pub owner_id: OwnerId,
}

impl Query for GetTransactions {
    fn name(&self) -> &'static str {
        "GetTransactions"
    }

    fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deposits_add_and_withdrawals_subtract() {
        assert_eq!(TransactionKind::Deposit.signed_delta(1000), Ok(1000));
        assert_eq!(TransactionKind::Withdrawal.signed_delta(1000), Ok(-1000));
    }

    #[test]
    fn non_positive_amounts_are_rejected_for_both_kinds() {
        for kind in [TransactionKind::Deposit, TransactionKind::Withdrawal] {
            assert_eq!(
                kind.signed_delta(0),
                Err(LedgerError::InvalidAmount { amount: 0 })
            );
            assert_eq!(
                kind.signed_delta(-5),
                Err(LedgerError::InvalidAmount { amount: -5 })
            );
        }
    }

    #[test]
    fn kinds_keep_their_wire_names() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Deposit).unwrap(),
            "\"DEPOSIT\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Withdrawal).unwrap(),
            "\"WITHDRAWAL\""
        );
    }

    #[test]
    fn records_carry_the_requested_amount_and_kind() {
        let account_id = AccountId::new();
        let tx = Transaction::record(
            account_id,
            OwnerId::from("u1"),
            1000,
            TransactionKind::Deposit,
        );
        assert_eq!(tx.account_id, account_id);
        assert_eq!(tx.amount, 1000);
        assert_eq!(tx.kind, TransactionKind::Deposit);
    }
}
