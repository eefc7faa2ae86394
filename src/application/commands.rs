//! Commands accepted by the session store and the results it returns.

use serde::Serialize;

use crate::domain::compliance::{ComplianceResult, DomainType};
use crate::domain::foundation::{NodeId, SessionId, Timestamp};
use crate::domain::workflow::{AppliedChange, WorkflowGraph};
use crate::ports::DeliveryReport;

/// Command to open a new editing session.
#[derive(Debug, Clone)]
pub struct CreateSessionCommand {
    pub user_id: String,
    /// Free text the domain is inferred from.
    pub seed_input: String,
    /// Falls back to the configured default title when absent or blank.
    pub title: Option<String>,
    pub description: Option<String>,
}

impl CreateSessionCommand {
    pub fn new(user_id: impl Into<String>, seed_input: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            seed_input: seed_input.into(),
            title: None,
            description: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// Result of a committed delta.
#[derive(Debug, Clone)]
pub struct DeltaOutcome {
    pub version: u64,
    pub flow: WorkflowGraph,
    pub compliance: ComplianceResult,
    pub change: AppliedChange,
    /// Nodes the compliance repair added on top of the delta.
    pub repaired: Vec<NodeId>,
    pub delivery: DeliveryReport,
}

/// Result of an explicit enforcement pass.
#[derive(Debug, Clone)]
pub struct EnforcementOutcome {
    pub version: u64,
    pub compliance: ComplianceResult,
    pub repaired: Vec<NodeId>,
    /// `None` when nothing needed repair and nothing was published.
    pub delivery: Option<DeliveryReport>,
}

impl EnforcementOutcome {
    pub fn was_repaired(&self) -> bool {
        !self.repaired.is_empty()
    }
}

/// Lightweight compliance summary of a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceStatus {
    pub session_id: SessionId,
    pub domain: DomainType,
    pub is_compliant: bool,
    pub violations_count: usize,
    pub version: u64,
    pub last_updated: Timestamp,
}
