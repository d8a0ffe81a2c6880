//! Domain error model.

use thiserror::Error;

use crate::money::Cents;

/// Result type used across the ledger.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// One taxonomy for the whole command/query surface: validation, not-found,
/// conflicts, and internal consistency failures. Infrastructure adapters map
/// their own errors into `Storage` at the service boundary. Amounts in
/// messages are minor units (cents).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A transaction amount failed validation (must be strictly positive).
    #[error("amount must be positive, got {amount}")]
    InvalidAmount { amount: Cents },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// No account matches the (id, owner) pair.
    ///
    /// Deliberately indistinguishable from "exists but owned by someone
    /// else"; ownership mismatches must not leak account existence.
    #[error("account not found")]
    AccountNotFound,

    /// Account number already taken for this owner.
    #[error("account number {number} already exists for this owner")]
    DuplicateAccount { number: u64 },

    /// The balance would go negative.
    #[error("insufficient funds: balance {balance}, requested {requested}")]
    InsufficientFunds { balance: Cents, requested: Cents },

    /// Balance arithmetic left the representable range.
    #[error("balance out of range")]
    BalanceOverflow,

    /// Per-account serialization broke down (e.g. a writer died mid-update).
    #[error("concurrent modification: {0}")]
    ConcurrentModification(String),

    /// A write that must pair with an already-committed mutation was lost.
    /// Fatal for the request; the divergence is logged for reconciliation.
    #[error("persistence inconsistency: {0}")]
    PersistenceInconsistency(String),

    /// Infrastructure failure surfaced from a repository.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl LedgerError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn concurrent(msg: impl Into<String>) -> Self {
        Self::ConcurrentModification(msg.into())
    }

    pub fn inconsistency(msg: impl Into<String>) -> Self {
        Self::PersistenceInconsistency(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_reports_both_sides() {
        let err = LedgerError::InsufficientFunds {
            balance: 800,
            requested: 1000,
        };
        assert_eq!(
            err.to_string(),
            "insufficient funds: balance 800, requested 1000"
        );
    }

    #[test]
    fn invalid_amount_reports_the_offending_value() {
        let err = LedgerError::InvalidAmount { amount: -50 };
        assert_eq!(err.to_string(), "amount must be positive, got -50");
    }
}
