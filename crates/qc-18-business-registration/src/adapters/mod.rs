//! Adapters layer for the Business Registration subsystem.
//!
//! In-memory implementations of the outbound ports.

pub mod account_store;
pub mod activation;
pub mod ledger_rules;
pub mod log_reader;
pub mod notifier;
pub mod pool;

pub use account_store::InMemoryAccountStore;
pub use activation::MilestoneGate;
pub use ledger_rules::SequenceFeeRules;
pub use log_reader::{MemoryOperationLog, PagedLogReader};
pub use notifier::{BroadcastNotifier, NoOpNotifier};
pub use pool::{InMemoryPendingPool, SubmissionBatch};
