//! Error types for the Business Registration handler.
//!
//! Validation failures abort a single operation. Pool conflicts are not
//! errors at all: they are pushed to the batch processor as
//! [`PoolRejection`](super::value_objects::PoolRejection)s.

use super::entities::{OperationType, PublicKey};
use thiserror::Error;

/// Coarse classification of handler failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or invalid payload fields.
    MalformedInput,
    /// Account state forbids the operation.
    StateConflict,
    /// Generic precondition (fee, balance, sequence) failed.
    Framework,
    /// Collaborator or routing failure.
    Infrastructure,
}

/// All errors raised by the handler.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Name or website missing, empty or too long.
    #[error("Malformed business registration asset: {reason}")]
    MalformedAsset { reason: String },

    /// Sender already carries a business registration.
    #[error("Account {} is already registered as a business", hex::encode(.identity))]
    DuplicateBusiness { identity: PublicKey },

    /// Envelope routed to the wrong handler.
    #[error("Wrong operation type: expected {expected}, got {actual}")]
    WrongOperationType {
        expected: OperationType,
        actual: OperationType,
    },

    /// Sender account unknown to the store.
    #[error("Account not found: {}", hex::encode(.identity))]
    AccountNotFound { identity: PublicKey },

    /// A replayed log entry does not carry the expected payload.
    #[error("Corrupt log entry {op_id}: {reason}")]
    CorruptLogEntry { op_id: String, reason: String },

    /// Generic precondition failure from the base pipeline.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Account store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Operation log failure.
    #[error(transparent)]
    Log(#[from] LogError),
}

impl HandlerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MalformedAsset { .. } => ErrorCategory::MalformedInput,
            Self::DuplicateBusiness { .. } => ErrorCategory::StateConflict,
            Self::Ledger(_) => ErrorCategory::Framework,
            Self::WrongOperationType { .. }
            | Self::AccountNotFound { .. }
            | Self::CorruptLogEntry { .. }
            | Self::Store(_)
            | Self::Log(_) => ErrorCategory::Infrastructure,
        }
    }

    /// Malformed and state-conflict failures are final for the operation;
    /// resubmitting the same envelope can never succeed.
    pub fn is_fatal_to_operation(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::MalformedInput | ErrorCategory::StateConflict
        )
    }
}

/// Generic precondition failures (fee, balance, sequence).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: u128, available: u128 },

    #[error("Invalid nonce: expected {expected}, got {actual}")]
    InvalidNonce { expected: u64, actual: u64 },

    #[error("Cannot revert nonce {nonce}: account is at {current}")]
    RevertOutOfOrder { nonce: u64, current: u64 },

    #[error("Balance overflow while reverting fee {fee}")]
    BalanceOverflow { fee: u128 },

    #[error("Nonce {nonce} cannot be advanced")]
    NonceExhausted { nonce: u64 },
}

/// Account store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Account not found: {}", hex::encode(.0))]
    NotFound(PublicKey),
}

/// Operation log failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("Log reader exhausted")]
    Exhausted,

    #[error("Log read failed: {0}")]
    ReadFailed(String),
}

/// Event publish failures. Logged by the caller, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    #[error("No active subscribers for topic {0}")]
    NoSubscribers(String),
}
