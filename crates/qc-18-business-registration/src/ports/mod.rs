//! Ports layer for the Business Registration subsystem.
//!
//! - Inbound (Driving) port: `OperationHandler`, driven by the dispatch framework
//! - Outbound (Driven) ports: store, pool, batch, log, ledger rules, gating, bus

pub mod inbound;
pub mod outbound;

pub use inbound::OperationHandler;
pub use outbound::{
    AccountStore, ActivationGate, BatchProcessor, EventNotifier, LedgerRules,
    OperationLogReader, PendingPool,
};
