//! Reference generic pipeline: fee against balance, strict sequence.
//!
//! Stands in for the framework's shared preconditions so apply and revert
//! can be exercised end to end.

use crate::domain::{AccountRecord, LedgerError, Operation};
use crate::ports::LedgerRules;

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceFeeRules;

impl LedgerRules for SequenceFeeRules {
    fn check_preconditions(
        &self,
        op: &Operation,
        sender: &AccountRecord,
    ) -> Result<(), LedgerError> {
        let expected = sender
            .nonce
            .checked_add(1)
            .ok_or(LedgerError::NonceExhausted {
                nonce: sender.nonce,
            })?;
        if op.nonce != expected {
            return Err(LedgerError::InvalidNonce {
                expected,
                actual: op.nonce,
            });
        }
        if sender.balance < op.fee {
            return Err(LedgerError::InsufficientBalance {
                required: op.fee,
                available: sender.balance,
            });
        }
        Ok(())
    }

    fn apply_to_sender(
        &self,
        op: &Operation,
        sender: &mut AccountRecord,
    ) -> Result<(), LedgerError> {
        self.check_preconditions(op, sender)?;
        sender.balance -= op.fee;
        sender.nonce = op.nonce;
        Ok(())
    }

    fn revert_for_sender(
        &self,
        op: &Operation,
        sender: &mut AccountRecord,
    ) -> Result<(), LedgerError> {
        let out_of_order = LedgerError::RevertOutOfOrder {
            nonce: op.nonce,
            current: sender.nonce,
        };
        if sender.nonce != op.nonce {
            return Err(out_of_order);
        }
        // Nonce 0 was never applied.
        let previous_nonce = sender.nonce.checked_sub(1).ok_or(out_of_order)?;
        let restored = sender
            .balance
            .checked_add(op.fee)
            .ok_or(LedgerError::BalanceOverflow { fee: op.fee })?;

        sender.balance = restored;
        sender.nonce = previous_nonce;
        Ok(())
    }
}
