//! Business Registration Handler
//!
//! Implements `OperationHandler` for `OperationType::BusinessRegistration`.
//!
//! Pipeline per operation:
//! 1. Admission: payload well-formed, sender not yet a business, generic preconditions
//! 2. Pool entry: one per sender, unique name in batch, unique name in pool
//! 3. Apply: generic effects, set attribute, reindex, emit `business.registered`
//! 4. Revert: generic reversal, remove attribute, reindex

use crate::config::RegistrationConfig;
use crate::domain::conflicts::{batch_name_collisions, pool_name_collision};
use crate::domain::validation::{ensure_registration_type, validate_asset};
use crate::domain::{
    AccountRecord, ApplyOutcome, AssetRules, BootstrapReport, BusinessEvent,
    BusinessRegistrationAsset, HandlerError, Operation, OperationType, PoolRejection,
    RejectionCode,
};
use crate::ports::{
    AccountStore, ActivationGate, BatchProcessor, LedgerRules, OperationHandler,
    OperationLogReader, PendingPool,
};
use async_trait::async_trait;
use std::sync::Arc;

use tracing::{debug, info, warn};

/// Handler for `OperationType::BusinessRegistration`.
///
/// Owns the payload rules and delegates fee/nonce accounting to
/// [`LedgerRules`]. Holds no account state itself; every call works on the
/// store or pool it is handed.
pub struct BusinessRegistrationHandler {
    config: RegistrationConfig,
    rules: AssetRules,
    ledger: Arc<dyn LedgerRules>,
    gate: Arc<dyn ActivationGate>,
}

impl BusinessRegistrationHandler {
    pub fn new(
        config: RegistrationConfig,
        ledger: Arc<dyn LedgerRules>,
        gate: Arc<dyn ActivationGate>,
    ) -> Self {
        let rules = config.asset_rules();
        Self {
            config,
            rules,
            ledger,
            gate,
        }
    }

    pub fn config(&self) -> &RegistrationConfig {
        &self.config
    }

    /// Payload of an envelope that already passed admission.
    fn committed_asset(op: &Operation) -> Result<BusinessRegistrationAsset, HandlerError> {
        ensure_registration_type(op)?;
        op.business_asset()
            .cloned()
            .ok_or_else(|| HandlerError::MalformedAsset {
                reason: "business registration asset is missing".into(),
            })
    }

    fn sender_mut<'a>(
        op: &Operation,
        store: &'a mut dyn AccountStore,
    ) -> Result<&'a mut AccountRecord, HandlerError> {
        store
            .find_by_identity_mut(&op.sender)
            .ok_or(HandlerError::AccountNotFound {
                identity: op.sender,
            })
    }

    fn reject(batch: &mut dyn BatchProcessor, op: &Operation, code: RejectionCode, message: String) {
        info!(
            op_id = %op.short_id(),
            code = code.as_str(),
            %message,
            "Pool entry rejected"
        );
        batch.record_rejection(PoolRejection::new(op.id, code, message));
    }
}

#[async_trait]
impl OperationHandler for BusinessRegistrationHandler {
    fn operation_type(&self) -> OperationType {
        OperationType::BusinessRegistration
    }

    fn is_activated(&self) -> bool {
        self.gate
            .is_milestone_active(&self.config.activation_milestone)
    }

    fn check_admission(&self, op: &Operation, sender: &AccountRecord) -> Result<(), HandlerError> {
        ensure_registration_type(op)?;

        if let Err(e) = validate_asset(op, &self.rules) {
            debug!(op_id = %op.short_id(), error = %e, "Admission rejected");
            return Err(e);
        }

        if sender.has_business() {
            debug!(op_id = %op.short_id(), "Admission rejected: sender already a business");
            return Err(HandlerError::DuplicateBusiness {
                identity: sender.identity,
            });
        }

        self.ledger.check_preconditions(op, sender)?;
        Ok(())
    }

    async fn can_enter_pool(
        &self,
        op: &Operation,
        batch: &mut dyn BatchProcessor,
        pool: &dyn PendingPool,
    ) -> bool {
        // 1. One pending registration per sender
        if self.type_from_sender_already_in_pool(op, batch, pool).await {
            return false;
        }

        let name = match (op.op_type, op.business_name()) {
            (OperationType::BusinessRegistration, Some(name)) => name,
            _ => {
                Self::reject(
                    batch,
                    op,
                    RejectionCode::Malformed,
                    "Business registration asset is missing".to_string(),
                );
                return false;
            }
        };

        // 2. Same name twice in this submission
        if batch_name_collisions(op, name, batch.operations()) > 1 {
            Self::reject(
                batch,
                op,
                RejectionCode::Conflict,
                format!(
                    "Multiple business registrations for \"{}\" in transaction payload",
                    name
                ),
            );
            return false;
        }

        // 3. Same name already pending
        let pooled = pool.operations_by_type(self.operation_type()).await;
        if pool_name_collision(name, &pooled).is_some() {
            Self::reject(
                batch,
                op,
                RejectionCode::Pending,
                format!("Business registration for \"{}\" already in the pool", name),
            );
            return false;
        }

        true
    }

    fn apply_to_sender(
        &self,
        op: &Operation,
        store: &mut dyn AccountStore,
    ) -> Result<ApplyOutcome, HandlerError> {
        let asset = Self::committed_asset(op)?;
        let sender = Self::sender_mut(op, store)?;

        self.ledger.apply_to_sender(op, sender)?;
        sender.set_business(asset);
        store.reindex(&op.sender)?;

        debug!(op_id = %op.short_id(), "Business registration applied");
        Ok(ApplyOutcome::with_event(BusinessEvent::registered(
            op.clone(),
        )))
    }

    fn apply_to_recipient(
        &self,
        _op: &Operation,
        _store: &mut dyn AccountStore,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    fn revert_for_sender(
        &self,
        op: &Operation,
        store: &mut dyn AccountStore,
    ) -> Result<(), HandlerError> {
        ensure_registration_type(op)?;
        let sender = Self::sender_mut(op, store)?;

        self.ledger.revert_for_sender(op, sender)?;
        if sender.forget_business().is_none() {
            warn!(op_id = %op.short_id(), "Reverted registration had no business attribute");
        }
        store.reindex(&op.sender)?;

        debug!(op_id = %op.short_id(), "Business registration reverted");
        Ok(())
    }

    fn revert_for_recipient(
        &self,
        _op: &Operation,
        _store: &mut dyn AccountStore,
    ) -> Result<(), HandlerError> {
        Ok(())
    }

    async fn bootstrap(
        &self,
        reader: &mut dyn OperationLogReader,
        store: &mut dyn AccountStore,
    ) -> Result<BootstrapReport, HandlerError> {
        let mut report = BootstrapReport::default();

        while reader.has_next() {
            let page = reader.read_next_page().await?;
            report.pages += 1;

            for op in &page {
                if op.op_type != self.operation_type() {
                    report.skipped += 1;
                    continue;
                }
                let asset =
                    op.business_asset()
                        .cloned()
                        .ok_or_else(|| HandlerError::CorruptLogEntry {
                            op_id: hex::encode(op.id),
                            reason: "business registration asset is missing".into(),
                        })?;

                Self::sender_mut(op, store)?.set_business(asset);
                store.reindex(&op.sender)?;
                report.applied += 1;
            }

            debug!(page = report.pages, entries = page.len(), "Replayed log page");
        }

        info!(
            pages = report.pages,
            applied = report.applied,
            skipped = report.skipped,
            "Business registrations bootstrapped"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{
        InMemoryAccountStore, InMemoryPendingPool, MemoryOperationLog, SequenceFeeRules,
        SubmissionBatch,
    };
    use crate::domain::{LedgerError, OperationAsset};
    use crate::ports::outbound::mocks::{
        FailingLogReader, FixedGate, PermissiveLedger, RecordingNotifier, RejectingLedger,
    };

    const ALICE: [u8; 32] = [0xA1; 32];
    const BOB: [u8; 32] = [0xB0; 32];

    fn handler() -> BusinessRegistrationHandler {
        BusinessRegistrationHandler::new(
            RegistrationConfig::for_testing(),
            Arc::new(SequenceFeeRules),
            Arc::new(FixedGate(true)),
        )
    }

    fn store_with(identities: &[[u8; 32]]) -> InMemoryAccountStore {
        let mut store = InMemoryAccountStore::new();
        for id in identities {
            store.insert(AccountRecord::new(*id, 1_000));
        }
        store
    }

    fn reg(sender: [u8; 32], name: &str) -> Operation {
        Operation::business_registration(sender, 1, 25, name, "site.example")
    }

    #[test]
    fn test_is_activated_follows_gate() {
        let off = BusinessRegistrationHandler::new(
            RegistrationConfig::default(),
            Arc::new(PermissiveLedger),
            Arc::new(FixedGate(false)),
        );
        assert!(!off.is_activated());
        assert!(handler().is_activated());
    }

    #[test]
    fn test_admission_accepts_well_formed() {
        let sender = AccountRecord::new(ALICE, 1_000);
        assert!(handler().check_admission(&reg(ALICE, "Acme"), &sender).is_ok());
    }

    #[test]
    fn test_admission_malformed_checked_before_duplicate() {
        let mut sender = AccountRecord::new(ALICE, 1_000);
        sender.set_business(BusinessRegistrationAsset::new("Old", "old.example"));

        let op = Operation::business_registration(ALICE, 1, 25, "", "site.example");
        assert!(matches!(
            handler().check_admission(&op, &sender),
            Err(HandlerError::MalformedAsset { .. })
        ));
    }

    #[test]
    fn test_admission_rejects_existing_business() {
        let mut sender = AccountRecord::new(ALICE, 1_000);
        sender.set_business(BusinessRegistrationAsset::new("Old", "old.example"));
        assert!(matches!(
            handler().check_admission(&reg(ALICE, "Acme"), &sender),
            Err(HandlerError::DuplicateBusiness { identity }) if identity == ALICE
        ));
    }

    #[test]
    fn test_admission_duplicate_checked_before_generic() {
        let handler = BusinessRegistrationHandler::new(
            RegistrationConfig::default(),
            Arc::new(RejectingLedger(LedgerError::InvalidNonce {
                expected: 1,
                actual: 9,
            })),
            Arc::new(FixedGate(true)),
        );
        let mut sender = AccountRecord::new(ALICE, 1_000);
        assert!(matches!(
            handler.check_admission(&reg(ALICE, "Acme"), &sender),
            Err(HandlerError::Ledger(LedgerError::InvalidNonce { .. }))
        ));

        sender.set_business(BusinessRegistrationAsset::new("Old", "old.example"));
        assert!(matches!(
            handler.check_admission(&reg(ALICE, "Acme"), &sender),
            Err(HandlerError::DuplicateBusiness { .. })
        ));
    }

    #[test]
    fn test_admission_rejects_wrong_type() {
        let transfer = Operation::new(OperationType::Transfer, ALICE, 1, 1, OperationAsset::None);
        assert!(matches!(
            handler().check_admission(&transfer, &AccountRecord::new(ALICE, 10)),
            Err(HandlerError::WrongOperationType { .. })
        ));
    }

    #[tokio::test]
    async fn test_pool_admits_unique_name() {
        let op = reg(ALICE, "Acme");
        let mut batch = SubmissionBatch::new(vec![op.clone()]);
        let pool = InMemoryPendingPool::new();

        assert!(handler().can_enter_pool(&op, &mut batch, &pool).await);
        assert!(batch.rejections().is_empty());
    }

    #[tokio::test]
    async fn test_pool_same_sender_guard_records_framework_diagnostic() {
        let pool = InMemoryPendingPool::new();
        pool.add(reg(ALICE, "Globex"));

        let op = Operation::business_registration(ALICE, 2, 25, "Acme", "site.example");
        let mut batch = SubmissionBatch::new(vec![op.clone()]);

        assert!(!handler().can_enter_pool(&op, &mut batch, &pool).await);
        let rejection = batch.rejection_for(&op.id).unwrap();
        assert_eq!(rejection.code, RejectionCode::Pending);
        assert!(rejection.message.contains("already has a transaction of type"));
        assert_eq!(batch.rejections().len(), 1);
    }

    #[tokio::test]
    async fn test_pool_batch_conflict_rejects_second_only() {
        let first = reg(ALICE, "Acme");
        let second = reg(BOB, "Acme");
        let mut batch = SubmissionBatch::new(vec![first.clone(), second.clone()]);
        let pool = InMemoryPendingPool::new();
        let handler = handler();

        assert!(handler.can_enter_pool(&first, &mut batch, &pool).await);
        assert!(!handler.can_enter_pool(&second, &mut batch, &pool).await);

        let rejection = batch.rejection_for(&second.id).unwrap();
        assert_eq!(rejection.code, RejectionCode::Conflict);
        assert_eq!(
            rejection.message,
            "Multiple business registrations for \"Acme\" in transaction payload"
        );
        assert!(batch.rejection_for(&first.id).is_none());
    }

    #[tokio::test]
    async fn test_pool_collision_rejects_pending_name() {
        let pool = InMemoryPendingPool::new();
        pool.add(reg(BOB, "Acme"));

        let op = reg(ALICE, "Acme");
        let mut batch = SubmissionBatch::new(vec![op.clone()]);
        assert!(!handler().can_enter_pool(&op, &mut batch, &pool).await);

        let rejection = batch.rejection_for(&op.id).unwrap();
        assert_eq!(rejection.code, RejectionCode::Pending);
        assert_eq!(
            rejection.message,
            "Business registration for \"Acme\" already in the pool"
        );
    }

    #[tokio::test]
    async fn test_pool_name_comparison_is_exact() {
        let pool = InMemoryPendingPool::new();
        pool.add(reg(BOB, "acme"));

        let op = reg(ALICE, "Acme");
        let mut batch = SubmissionBatch::new(vec![op.clone()]);
        assert!(handler().can_enter_pool(&op, &mut batch, &pool).await);
    }

    #[tokio::test]
    async fn test_pool_rejects_missing_asset() {
        let op = Operation::new(
            OperationType::BusinessRegistration,
            ALICE,
            1,
            25,
            OperationAsset::None,
        );
        let mut batch = SubmissionBatch::new(vec![op.clone()]);
        let pool = InMemoryPendingPool::new();

        assert!(!handler().can_enter_pool(&op, &mut batch, &pool).await);
        assert_eq!(
            batch.rejection_for(&op.id).unwrap().code,
            RejectionCode::Malformed
        );
    }

    #[test]
    fn test_apply_sets_attribute_and_reindexes() {
        let mut store = store_with(&[ALICE]);
        let op = reg(ALICE, "Acme");

        let outcome = handler().apply(&op, &mut store).unwrap();

        let account = store.get(&ALICE).unwrap();
        assert_eq!(account.business().unwrap().name, "Acme");
        assert_eq!(account.balance, 975);
        assert_eq!(account.nonce, 1);
        assert_eq!(store.find_by_business_name("Acme").unwrap().identity, ALICE);
        assert_eq!(outcome.events.len(), 1);
        assert_eq!(outcome.events[0].operation(), &op);
    }

    #[test]
    fn test_apply_unknown_sender_fails_without_effects() {
        let mut store = store_with(&[BOB]);
        let before = store.clone();
        assert!(matches!(
            handler().apply(&reg(ALICE, "Acme"), &mut store),
            Err(HandlerError::AccountNotFound { identity }) if identity == ALICE
        ));
        assert_eq!(store, before);
    }

    #[test]
    fn test_apply_generic_failure_leaves_attribute_unset() {
        let mut store = store_with(&[ALICE]);
        let op = Operation::business_registration(ALICE, 5, 25, "Acme", "site.example");
        assert!(matches!(
            handler().apply(&op, &mut store),
            Err(HandlerError::Ledger(LedgerError::InvalidNonce { .. }))
        ));
        assert!(!store.get(&ALICE).unwrap().has_business());
    }

    #[test]
    fn test_revert_restores_pre_apply_state() {
        let mut store = store_with(&[ALICE]);
        let before = store.clone();
        let op = reg(ALICE, "Acme");
        let handler = handler();

        handler.apply(&op, &mut store).unwrap();
        handler.revert(&op, &mut store).unwrap();

        assert_eq!(store, before);
        assert!(store.find_by_business_name("Acme").is_none());
    }

    #[test]
    fn test_emit_events_publishes_registered() {
        let mut store = store_with(&[ALICE]);
        let handler = handler();
        let notifier = RecordingNotifier::default();

        let outcome = handler.apply(&reg(ALICE, "Acme"), &mut store).unwrap();
        handler.emit_events(&outcome, &notifier);

        let events = notifier.events.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].topic(), "business.registered");
    }

    #[tokio::test]
    async fn test_bootstrap_restores_without_fee_effects() {
        let mut log = MemoryOperationLog::new();
        log.append(reg(ALICE, "Acme"));
        log.append(Operation::new(OperationType::Transfer, BOB, 1, 1, OperationAsset::None));
        log.append(reg(BOB, "Globex"));

        let mut store = store_with(&[ALICE, BOB]);
        let mut reader = log.reader(2);
        let report = handler().bootstrap(&mut reader, &mut store).await.unwrap();

        assert_eq!(
            report,
            BootstrapReport {
                pages: 2,
                applied: 2,
                skipped: 1
            }
        );
        let alice = store.get(&ALICE).unwrap();
        assert_eq!(alice.business().unwrap().name, "Acme");
        assert_eq!(alice.balance, 1_000);
        assert_eq!(alice.nonce, 0);
        assert_eq!(store.find_by_business_name("Globex").unwrap().identity, BOB);
    }

    #[tokio::test]
    async fn test_bootstrap_tolerates_conflicting_names() {
        let mut log = MemoryOperationLog::new();
        log.append(reg(ALICE, "Acme"));
        log.append(reg(BOB, "Acme"));

        let mut store = store_with(&[ALICE, BOB]);
        let mut reader = log.reader_for(OperationType::BusinessRegistration, 10);
        let report = handler().bootstrap(&mut reader, &mut store).await.unwrap();

        assert_eq!(report.applied, 2);
        assert!(store.get(&ALICE).unwrap().has_business());
        assert!(store.get(&BOB).unwrap().has_business());
    }

    #[tokio::test]
    async fn test_bootstrap_unknown_sender_fails() {
        let mut log = MemoryOperationLog::new();
        log.append(reg(ALICE, "Acme"));

        let mut store = InMemoryAccountStore::new();
        let mut reader = log.reader(10);
        assert!(matches!(
            handler().bootstrap(&mut reader, &mut store).await,
            Err(HandlerError::AccountNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_corrupt_entry_fails() {
        let mut log = MemoryOperationLog::new();
        log.append(Operation::new(
            OperationType::BusinessRegistration,
            ALICE,
            1,
            25,
            OperationAsset::None,
        ));

        let mut store = store_with(&[ALICE]);
        let mut reader = log.reader(10);
        assert!(matches!(
            handler().bootstrap(&mut reader, &mut store).await,
            Err(HandlerError::CorruptLogEntry { .. })
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_propagates_log_errors() {
        let mut store = store_with(&[ALICE]);
        let err = handler()
            .bootstrap(&mut FailingLogReader, &mut store)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Log read failed: disk unavailable");
    }
}
