//! Value objects produced by the handler: pool diagnostics, apply outcomes,
//! bus events and replay reports.

use super::entities::{Hash, Operation};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Event bus topics.
pub mod topics {
    /// Published after a registration is applied.
    pub const BUSINESS_REGISTERED: &str = "business.registered";
}

/// Diagnostic codes recorded against a rejected pool candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectionCode {
    /// Same business name appears more than once in the submission batch.
    Conflict,
    /// Same business name (or same sender and type) already pending in the pool.
    Pending,
    /// Candidate carries no usable registration payload.
    Malformed,
}

impl RejectionCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Conflict => "ERR_CONFLICT",
            Self::Pending => "ERR_PENDING",
            Self::Malformed => "ERR_MALFORMED",
        }
    }
}

impl fmt::Display for RejectionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejection pushed to the batch processor.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRejection {
    pub op_id: Hash,
    pub code: RejectionCode,
    pub message: String,
}

impl PoolRejection {
    pub fn new(op_id: Hash, code: RejectionCode, message: impl Into<String>) -> Self {
        Self {
            op_id,
            code,
            message: message.into(),
        }
    }
}

/// Events emitted by the handler.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BusinessEvent {
    /// A registration was applied; carries the full operation data.
    Registered { event_id: Uuid, operation: Operation },
}

impl BusinessEvent {
    pub fn registered(operation: Operation) -> Self {
        Self::Registered {
            event_id: Uuid::new_v4(),
            operation,
        }
    }

    pub fn topic(&self) -> &'static str {
        match self {
            Self::Registered { .. } => topics::BUSINESS_REGISTERED,
        }
    }

    pub fn operation(&self) -> &Operation {
        match self {
            Self::Registered { operation, .. } => operation,
        }
    }
}

/// Result of a successful apply: the events that should be published.
///
/// Publishing is left to an [`EventNotifier`](crate::ports::EventNotifier).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub events: Vec<BusinessEvent>,
}

impl ApplyOutcome {
    pub fn with_event(event: BusinessEvent) -> Self {
        Self {
            events: vec![event],
        }
    }
}

/// Summary of a replay run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Pages read from the log.
    pub pages: usize,
    /// Entries whose registration was restored.
    pub applied: usize,
    /// Entries of another operation type.
    pub skipped: usize,
}
