//! Domain invariants for business registrations.
//!
//! Name uniqueness is soft: it is enforced at admission, never at commit,
//! so these checks report rather than repair.

use super::entities::{AccountRecord, Operation, OperationType};
use std::collections::HashSet;

/// INVARIANT-1: an account holds the business attribute iff the net count
/// of applied minus reverted registrations for it is exactly one.
pub fn invariant_registration_witness(account: &AccountRecord, applied: u64, reverted: u64) -> bool {
    let net = applied as i128 - reverted as i128;
    account.has_business() == (net == 1)
}

/// INVARIANT-2 (pool side): no two pending registrations share a name.
pub fn invariant_unique_pending_names(pooled: &[Operation]) -> bool {
    let mut seen = HashSet::new();
    pooled
        .iter()
        .filter(|op| op.op_type == OperationType::BusinessRegistration)
        .filter_map(Operation::business_name)
        .all(|name| seen.insert(name))
}

/// INVARIANT-2 (ledger side): no two accounts hold the same business name.
pub fn invariant_unique_applied_names<'a>(
    accounts: impl IntoIterator<Item = &'a AccountRecord>,
) -> bool {
    let mut seen = HashSet::new();
    accounts
        .into_iter()
        .filter_map(AccountRecord::business)
        .all(|asset| seen.insert(asset.name.as_str()))
}
