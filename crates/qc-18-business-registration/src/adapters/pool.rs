//! In-memory pending pool and submission batch adapters.

use crate::domain::{Hash, Operation, OperationType, PoolRejection, PublicKey};
use crate::ports::{BatchProcessor, PendingPool};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
struct PoolInner {
    by_id: HashMap<Hash, Operation>,
    /// Insertion order, for deterministic snapshots.
    order: Vec<Hash>,
}

/// Pending-operation pool shared across tasks.
///
/// Every query takes one read lock and returns owned data.
#[derive(Debug, Default)]
pub struct InMemoryPendingPool {
    inner: RwLock<PoolInner>,
}

impl InMemoryPendingPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operation. Returns false if its id is already pooled.
    pub fn add(&self, op: Operation) -> bool {
        let mut inner = self.inner.write();
        if inner.by_id.contains_key(&op.id) {
            return false;
        }
        inner.order.push(op.id);
        inner.by_id.insert(op.id, op);
        true
    }

    pub fn remove(&self, id: &Hash) -> Option<Operation> {
        let mut inner = self.inner.write();
        let removed = inner.by_id.remove(id)?;
        inner.order.retain(|pooled| pooled != id);
        Some(removed)
    }

    pub fn contains(&self, id: &Hash) -> bool {
        self.inner.read().by_id.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().by_id.is_empty()
    }

    /// Snapshot of the whole pool in insertion order.
    pub fn snapshot(&self) -> Vec<Operation> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id).cloned())
            .collect()
    }
}

#[async_trait]
impl PendingPool for InMemoryPendingPool {
    async fn operations_by_type(&self, op_type: OperationType) -> Vec<Operation> {
        let inner = self.inner.read();
        inner
            .order
            .iter()
            .filter_map(|id| inner.by_id.get(id))
            .filter(|op| op.op_type == op_type)
            .cloned()
            .collect()
    }

    async fn sender_has_operation_of_type(
        &self,
        sender: &PublicKey,
        op_type: OperationType,
    ) -> bool {
        self.inner
            .read()
            .by_id
            .values()
            .any(|op| op.sender == *sender && op.op_type == op_type)
    }
}

/// One submission batch and the rejections recorded against it.
#[derive(Clone, Debug, Default)]
pub struct SubmissionBatch {
    operations: Vec<Operation>,
    rejections: Vec<PoolRejection>,
}

impl SubmissionBatch {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self {
            operations,
            rejections: Vec::new(),
        }
    }

    pub fn rejections(&self) -> &[PoolRejection] {
        &self.rejections
    }

    pub fn rejection_for(&self, id: &Hash) -> Option<&PoolRejection> {
        self.rejections.iter().find(|r| r.op_id == *id)
    }
}

impl BatchProcessor for SubmissionBatch {
    fn operations(&self) -> &[Operation] {
        &self.operations
    }

    fn record_rejection(&mut self, rejection: PoolRejection) {
        self.rejections.push(rejection);
    }
}
