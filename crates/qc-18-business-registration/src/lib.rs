//! # QC-18: Business Registration Subsystem
//!
//! Lifecycle handler for the "register an account as a business" operation.
//! The dispatch framework routes envelopes of type
//! `OperationType::BusinessRegistration` here and drives the handler through
//! admission, pool entry, commit, rollback and startup replay.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement |
//! |----|-----------|-------------|
//! | INVARIANT-1 | Account holds `business` iff a registration is applied and not reverted | `apply_to_sender` / `revert_for_sender` |
//! | INVARIANT-2 | At most one pending and one applied registration per name | `can_enter_pool` (soft, admission-time only) |
//!
//! ## Pipeline
//!
//! ```text
//! [submit] ──check_admission──→ [admitted] ──can_enter_pool──→ [POOLED]
//!                                                                  │
//!                                                     apply ───────┘
//!                                                       │
//!                                   [APPLIED] ──revert──→ [REVERTED]
//!
//! [startup] ──bootstrap(log)──→ attributes restored, no fees, no checks
//! ```
//!
//! ## Pool Diagnostics
//!
//! | Code | Cause |
//! |------|-------|
//! | `ERR_CONFLICT` | Same business name twice in one submission batch |
//! | `ERR_PENDING` | Same name already pooled, or sender already has a pending registration |
//! | `ERR_MALFORMED` | Envelope carries no registration payload |
//!
//! Names compare by exact byte equality; no case folding or trimming.
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/ - in-memory store, pool, log, notifier, ledger rules │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/inbound.rs  - OperationHandler trait                     │
//! │  ports/outbound.rs - AccountStore, PendingPool, BatchProcessor, │
//! │                      OperationLogReader, LedgerRules, ...       │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/ - entities, validation, conflicts, invariants, errors  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

pub use adapters::*;
pub use application::BusinessRegistrationHandler;
pub use config::{ConfigError, RegistrationConfig};
pub use domain::*;
pub use ports::*;
pub use telemetry::{init_tracing, TelemetryError};
