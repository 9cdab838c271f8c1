//! # Inbound Port - OperationHandler
//!
//! The contract the dispatch framework drives. One implementation exists per
//! operation type; the framework routes envelopes by `operation_type()`.
//!
//! ## Call Order Over An Operation's Lifetime
//!
//! | Stage | Method |
//! |-------|--------|
//! | Gating | `is_activated` |
//! | Admission | `check_admission` |
//! | Pool entry | `can_enter_pool` |
//! | Commit | `apply` (sender, then recipient) |
//! | Rollback | `revert` (sender, then recipient) |
//! | Startup | `bootstrap` |
//!
//! The provided methods are the framework's shared pipeline; handlers
//! override only the required ones.

use crate::domain::{
    AccountRecord, ApplyOutcome, BootstrapReport, HandlerError, Operation, OperationType,
    PoolRejection, RejectionCode,
};
use crate::ports::outbound::{
    AccountStore, BatchProcessor, EventNotifier, OperationLogReader, PendingPool,
};
use async_trait::async_trait;
use tracing::{debug, warn};

#[async_trait]
pub trait OperationHandler: Send + Sync {
    /// Type tag this handler is registered under.
    fn operation_type(&self) -> OperationType;

    /// Operation types whose handlers must be registered first.
    fn dependencies(&self) -> &'static [OperationType] {
        &[]
    }

    /// Whether the operation type is valid on the network yet.
    fn is_activated(&self) -> bool;

    /// Pure admission check against the sender's current record.
    fn check_admission(&self, op: &Operation, sender: &AccountRecord) -> Result<(), HandlerError>;

    /// Decides pool entry. Rejections are pushed to `batch`, never raised.
    async fn can_enter_pool(
        &self,
        op: &Operation,
        batch: &mut dyn BatchProcessor,
        pool: &dyn PendingPool,
    ) -> bool;

    fn apply_to_sender(
        &self,
        op: &Operation,
        store: &mut dyn AccountStore,
    ) -> Result<ApplyOutcome, HandlerError>;

    fn apply_to_recipient(
        &self,
        op: &Operation,
        store: &mut dyn AccountStore,
    ) -> Result<(), HandlerError>;

    fn revert_for_sender(
        &self,
        op: &Operation,
        store: &mut dyn AccountStore,
    ) -> Result<(), HandlerError>;

    fn revert_for_recipient(
        &self,
        op: &Operation,
        store: &mut dyn AccountStore,
    ) -> Result<(), HandlerError>;

    /// Rebuilds state from committed log entries at startup.
    async fn bootstrap(
        &self,
        reader: &mut dyn OperationLogReader,
        store: &mut dyn AccountStore,
    ) -> Result<BootstrapReport, HandlerError>;

    /// Commits an operation.
    fn apply(
        &self,
        op: &Operation,
        store: &mut dyn AccountStore,
    ) -> Result<ApplyOutcome, HandlerError> {
        let outcome = self.apply_to_sender(op, store)?;
        self.apply_to_recipient(op, store)?;
        Ok(outcome)
    }

    /// Rolls back a previously applied operation.
    fn revert(&self, op: &Operation, store: &mut dyn AccountStore) -> Result<(), HandlerError> {
        self.revert_for_sender(op, store)?;
        self.revert_for_recipient(op, store)
    }

    /// One pending operation per type per sender.
    ///
    /// Records its own `ERR_PENDING` diagnostic when it fires.
    async fn type_from_sender_already_in_pool(
        &self,
        op: &Operation,
        batch: &mut dyn BatchProcessor,
        pool: &dyn PendingPool,
    ) -> bool {
        if !pool.sender_has_operation_of_type(&op.sender, op.op_type).await {
            return false;
        }

        batch.record_rejection(PoolRejection::new(
            op.id,
            RejectionCode::Pending,
            format!(
                "Sender {} already has a transaction of type '{}' in the pool",
                hex::encode(op.sender),
                op.op_type
            ),
        ));
        true
    }

    /// Publishes the events of an apply outcome. Failures are logged only.
    fn emit_events(&self, outcome: &ApplyOutcome, notifier: &dyn EventNotifier) {
        for event in &outcome.events {
            match notifier.notify(event.clone()) {
                Ok(receivers) => {
                    debug!(topic = event.topic(), receivers, "Event published");
                }
                Err(e) => {
                    warn!(topic = event.topic(), error = %e, "Event publish failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Test that the trait is object-safe (can be used as dyn OperationHandler)
    fn _assert_object_safe(_: &dyn OperationHandler) {}
}
