//! Business-name collision detection over batch and pool snapshots.
//!
//! Pure reads. Names match by exact byte equality.

use super::entities::{Operation, OperationType};

/// Counts registrations named `name` that the candidate competes with inside
/// its submission batch, the candidate included.
///
/// Batch entries are ordered. Only entries up to and including the
/// candidate's own position are counted, so the first of two same-name
/// registrations sees a count of 1 and the second a count of 2. A candidate
/// absent from the batch is counted once on top of every matching entry.
pub fn batch_name_collisions(candidate: &Operation, name: &str, batch: &[Operation]) -> usize {
    let mut count = 0;
    for op in batch {
        if is_registration_named(op, name) {
            count += 1;
        }
        if op.id == candidate.id {
            return count;
        }
    }
    count + 1
}

/// Returns the first pooled registration using `name`, if any.
pub fn pool_name_collision<'a>(name: &str, pooled: &'a [Operation]) -> Option<&'a Operation> {
    pooled.iter().find(|op| is_registration_named(op, name))
}

fn is_registration_named(op: &Operation, name: &str) -> bool {
    op.op_type == OperationType::BusinessRegistration && op.business_name() == Some(name)
}
