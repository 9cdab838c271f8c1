//! # Domain Layer - Business Registration Subsystem
//!
//! Pure business logic: entities, payload rules, name-collision detection
//! and invariant checks. No I/O.
//!
//! ## Components
//!
//! - `entities`: Operation envelope, registration payload, AccountRecord
//! - `value_objects`: RejectionCode, PoolRejection, BusinessEvent, ApplyOutcome
//! - `errors`: HandlerError and collaborator error enums
//! - `validation`: payload well-formedness
//! - `conflicts`: batch and pool name collisions
//! - `invariants`: uniqueness checks used by tests and diagnostics

pub mod conflicts;
pub mod entities;
pub mod errors;
pub mod invariants;
pub mod validation;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use validation::AssetRules;
pub use value_objects::*;
