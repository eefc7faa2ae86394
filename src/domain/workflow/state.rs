//! Versioned workflow state owned by a session.

use serde::{Deserialize, Serialize};

use crate::domain::compliance::DomainType;
use crate::domain::foundation::{Timestamp, UserId, WorkflowId};

use super::edge::FlowEdge;
use super::graph::{Viewport, WorkflowGraph};
use super::node::FlowNode;

/// The committed graph of one session plus its metadata.
///
/// # Invariants
///
/// - `version` starts at 1 and grows by exactly 1 per [`commit`](Self::commit)
/// - `updated_at` is never before `created_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    id: WorkflowId,
    user_id: UserId,
    domain: DomainType,
    title: String,
    description: Option<String>,
    graph: WorkflowGraph,
    version: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl WorkflowState {
    pub fn new(
        user_id: UserId,
        domain: DomainType,
        title: impl Into<String>,
        description: Option<String>,
        graph: WorkflowGraph,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            id: WorkflowId::new(),
            user_id,
            domain,
            title: title.into(),
            description,
            graph,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &WorkflowId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn domain(&self) -> DomainType {
        self.domain
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn graph(&self) -> &WorkflowGraph {
        &self.graph
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Replaces the graph and advances the version. Returns the new version.
    pub fn commit(&mut self, graph: WorkflowGraph) -> u64 {
        self.graph = graph;
        self.version += 1;
        self.updated_at = Timestamp::now();
        self.version
    }

    /// Snapshot in the format consumed by renderers and converters.
    pub fn export(&self) -> WorkflowExport {
        WorkflowExport {
            workflow_id: self.id,
            domain: self.domain,
            title: self.title.clone(),
            nodes: self.graph.nodes.clone(),
            edges: self.graph.edges.clone(),
            viewport: self.graph.viewport,
            version: self.version,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Read-only export of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowExport {
    pub workflow_id: WorkflowId,
    pub domain: DomainType,
    pub title: String,
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    pub viewport: Viewport,
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
