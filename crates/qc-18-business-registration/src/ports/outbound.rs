//! Outbound (Driven) ports for the Business Registration handler.
//!
//! Everything the handler reads or mutates lives behind one of these
//! traits. Pool and log access are the only suspension points.

use crate::domain::{
    AccountRecord, BusinessEvent, LedgerError, LogError, Operation, OperationType, PoolRejection,
    PublicKey, PublishError, StoreError,
};
use async_trait::async_trait;

/// Account store keyed by identity.
///
/// Attribute get/set/remove happen on the typed [`AccountRecord`]; the store
/// only has to keep its secondary indexes current when `reindex` is called.
pub trait AccountStore: Send + Sync {
    fn find_by_identity(&self, identity: &PublicKey) -> Option<&AccountRecord>;

    fn find_by_identity_mut(&mut self, identity: &PublicKey) -> Option<&mut AccountRecord>;

    /// Looks up the account currently registered under `name`.
    fn find_by_business_name(&self, name: &str) -> Option<&AccountRecord>;

    /// Refreshes attribute-based indexes for one account.
    fn reindex(&mut self, identity: &PublicKey) -> Result<(), StoreError>;
}

/// Read access to the pending-operation pool.
#[async_trait]
pub trait PendingPool: Send + Sync {
    /// Snapshot of every pooled operation of `op_type`.
    ///
    /// Returned by value so a single admission decision sees one consistent view.
    async fn operations_by_type(&self, op_type: OperationType) -> Vec<Operation>;

    async fn sender_has_operation_of_type(&self, sender: &PublicKey, op_type: OperationType)
        -> bool;
}

/// The submission batch currently being admitted, plus its diagnostic channel.
pub trait BatchProcessor: Send {
    /// Operations of the batch, in submission order.
    fn operations(&self) -> &[Operation];

    /// Records a rejection. Siblings in the batch are unaffected.
    fn record_rejection(&mut self, rejection: PoolRejection);
}

/// Paged, forward-only reader over committed operations.
#[async_trait]
pub trait OperationLogReader: Send {
    fn has_next(&self) -> bool;

    async fn read_next_page(&mut self) -> Result<Vec<Operation>, LogError>;
}

/// Generic sender-side preconditions and effects (fee, balance, sequence).
pub trait LedgerRules: Send + Sync {
    fn check_preconditions(&self, op: &Operation, sender: &AccountRecord)
        -> Result<(), LedgerError>;

    fn apply_to_sender(&self, op: &Operation, sender: &mut AccountRecord)
        -> Result<(), LedgerError>;

    fn revert_for_sender(&self, op: &Operation, sender: &mut AccountRecord)
        -> Result<(), LedgerError>;
}

/// Feature gating by network milestone.
pub trait ActivationGate: Send + Sync {
    fn is_milestone_active(&self, milestone: &str) -> bool;
}

/// Fire-and-forget event publication.
pub trait EventNotifier: Send + Sync {
    /// Returns the number of receivers the event reached.
    fn notify(&self, event: BusinessEvent) -> Result<usize, PublishError>;
}
