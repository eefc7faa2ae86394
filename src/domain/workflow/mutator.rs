//! Applies one delta to a graph and restores compliance.
//!
//! [`GraphMutator::apply`] never touches the graph it is given. It edits a
//! copy, runs validation, repairs the copy if the edit dropped a mandated
//! node, and hands back the result for the caller to commit. A rejected
//! delta therefore leaves no trace.

use std::borrow::Cow;

use crate::domain::compliance::{fix, validate, ComplianceResult, DomainType};
use crate::domain::foundation::{NodeId, ValidationError};

use super::delta::{FlowDelta, NodeSpec, NodeUpdate};
use super::edge::FlowEdge;
use super::errors::WorkflowError;
use super::graph::WorkflowGraph;
use super::node::{FlowNode, LockState, NodeData, Position};

/// What a delta did before compliance repair ran.
#[derive(Debug, Clone, PartialEq)]
pub enum AppliedChange {
    NodeAdded(FlowNode),
    NodeRemoved { node: FlowNode, edges: Vec<FlowEdge> },
    NodeUpdated(FlowNode),
    /// `None` when the pair was already connected.
    EdgeAdded(Option<FlowEdge>),
    /// Empty when no edge had that id.
    EdgeRemoved(Vec<FlowEdge>),
    ViewportChanged,
}

/// A graph that passed validation (after repair, if one was needed).
#[derive(Debug, Clone, PartialEq)]
pub struct Settled {
    pub graph: WorkflowGraph,
    pub compliance: ComplianceResult,
    /// Ids of nodes synthesized by the repair step, in insertion order.
    pub repaired: Vec<NodeId>,
}

impl Settled {
    pub fn was_repaired(&self) -> bool {
        !self.repaired.is_empty()
    }
}

/// Outcome of a successful [`GraphMutator::apply`].
#[derive(Debug, Clone, PartialEq)]
pub struct Mutation {
    pub change: AppliedChange,
    pub settled: Settled,
}

/// Delta interpreter bound to one domain.
#[derive(Debug, Clone, Copy)]
pub struct GraphMutator {
    domain: DomainType,
    auto_wire: bool,
}

impl GraphMutator {
    pub fn new(domain: DomainType) -> Self {
        Self {
            domain,
            auto_wire: true,
        }
    }

    /// Whether synthesized nodes get chained after the last existing node.
    pub fn with_auto_wire(mut self, auto_wire: bool) -> Self {
        self.auto_wire = auto_wire;
        self
    }

    pub fn domain(&self) -> DomainType {
        self.domain
    }

    /// Applies `delta` to a copy of `graph`, then validates and repairs it.
    ///
    /// # Errors
    ///
    /// - `NodeNotFound` for an unknown node id on remove/update
    /// - `Forbidden` when removing a locked node
    /// - `InvalidReference` when a new edge names a missing node
    /// - `Validation` for an empty label or a clashing caller-supplied id
    pub fn apply(&self, graph: &WorkflowGraph, delta: &FlowDelta) -> Result<Mutation, WorkflowError> {
        let mut candidate = graph.clone();
        let change = match delta {
            FlowDelta::NodeAdded { data } => add_node(&mut candidate, data)?,
            FlowDelta::NodeRemoved { node_id } => remove_node(&mut candidate, node_id)?,
            FlowDelta::NodeUpdated { node_id, updates } => {
                update_node(&mut candidate, node_id, updates)?
            }
            FlowDelta::EdgeAdded { source, target } => add_edge(&mut candidate, source, target)?,
            FlowDelta::EdgeRemoved { edge_id } => {
                AppliedChange::EdgeRemoved(candidate.remove_edge(edge_id))
            }
            FlowDelta::ViewportChanged { viewport } => {
                candidate.viewport = *viewport;
                AppliedChange::ViewportChanged
            }
        };

        Ok(Mutation {
            change,
            settled: self.settle(candidate),
        })
    }

    /// Validates and, if needed, repairs a graph without applying a delta.
    pub fn enforce(&self, graph: &WorkflowGraph) -> Settled {
        self.settle(graph.clone())
    }

    fn settle(&self, mut graph: WorkflowGraph) -> Settled {
        let before = graph.node_count();
        let last_existing = graph.nodes.last().map(|n| n.id.clone());

        let fixed = match fix(&graph, self.domain) {
            Cow::Borrowed(_) => None,
            Cow::Owned(fixed) => Some(fixed),
        };
        let mut repaired = Vec::new();
        if let Some(fixed) = fixed {
            graph = fixed;
            repaired = graph.nodes[before..].iter().map(|n| n.id.clone()).collect();
            if self.auto_wire {
                wire_chain(&mut graph, last_existing, &repaired);
            }
            tracing::info!(
                domain = %self.domain,
                added = repaired.len(),
                auto_wired = self.auto_wire,
                "Restored compliance by synthesizing mandated nodes"
            );
        }

        let compliance = validate(&graph.nodes, self.domain);
        if !compliance.is_compliant {
            tracing::error!(
                domain = %self.domain,
                missing = compliance.violations.len(),
                "Graph still non-compliant after repair"
            );
        }
        debug_assert!(graph.check_integrity().is_ok());

        Settled {
            graph,
            compliance,
            repaired,
        }
    }
}

/// Connects `start -> ids[0] -> ids[1] -> ...`.
fn wire_chain(graph: &mut WorkflowGraph, start: Option<NodeId>, ids: &[NodeId]) {
    let mut previous = start;
    for id in ids {
        if let Some(prev) = &previous {
            graph.connect(prev, id);
        }
        previous = Some(id.clone());
    }
}

fn add_node(graph: &mut WorkflowGraph, spec: &NodeSpec) -> Result<AppliedChange, WorkflowError> {
    if spec.label.trim().is_empty() {
        return Err(ValidationError::empty_field("label").into());
    }
    let id = match &spec.id {
        Some(id) if id.as_str().trim().is_empty() => {
            return Err(ValidationError::empty_field("id").into());
        }
        Some(id) if graph.contains_node(id) => {
            return Err(
                ValidationError::invalid_format("id", format!("node '{}' already exists", id)).into(),
            );
        }
        Some(id) => id.clone(),
        None => graph.generate_node_id("node"),
    };

    let mut data = NodeData::new(spec.label.clone());
    data.description = spec.description.clone();
    data.locked = spec.locked;
    data.parameters = spec.parameters.clone();

    let node = FlowNode::new(id, spec.node_type, data, Position::new(spec.x, spec.y));
    graph.push_node(node.clone());
    Ok(AppliedChange::NodeAdded(node))
}

fn remove_node(graph: &mut WorkflowGraph, id: &NodeId) -> Result<AppliedChange, WorkflowError> {
    let node = graph
        .node(id)
        .ok_or_else(|| WorkflowError::NodeNotFound(id.clone()))?;
    if node.lock_state().is_locked() {
        return Err(WorkflowError::Forbidden(id.clone()));
    }
    let (node, edges) = graph
        .remove_node(id)
        .ok_or_else(|| WorkflowError::NodeNotFound(id.clone()))?;
    Ok(AppliedChange::NodeRemoved { node, edges })
}

fn update_node(
    graph: &mut WorkflowGraph,
    id: &NodeId,
    updates: &NodeUpdate,
) -> Result<AppliedChange, WorkflowError> {
    let node = graph
        .node_mut(id)
        .ok_or_else(|| WorkflowError::NodeNotFound(id.clone()))?;

    match node.lock_state() {
        LockState::Locked => {
            if updates.touches_content() {
                tracing::debug!(node_id = %id, "Ignoring content edit on locked node");
            }
        }
        LockState::Editable => {
            if let Some(label) = &updates.label {
                if label.trim().is_empty() {
                    return Err(ValidationError::empty_field("label").into());
                }
                node.data.label = label.clone();
            }
            if let Some(description) = &updates.description {
                node.data.description = Some(description.clone());
            }
        }
    }
    node.move_to(updates.x, updates.y);
    Ok(AppliedChange::NodeUpdated(node.clone()))
}

fn add_edge(
    graph: &mut WorkflowGraph,
    source: &NodeId,
    target: &NodeId,
) -> Result<AppliedChange, WorkflowError> {
    if graph.has_edge_between(source, target) {
        return Ok(AppliedChange::EdgeAdded(None));
    }
    for endpoint in [source, target] {
        if !graph.contains_node(endpoint) {
            return Err(WorkflowError::InvalidReference(endpoint.clone()));
        }
    }
    Ok(AppliedChange::EdgeAdded(graph.connect(source, target)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::EdgeId;
    use crate::domain::workflow::{NodeType, Viewport};

    fn process(id: &str) -> FlowNode {
        FlowNode::new(NodeId::from(id), NodeType::Process, NodeData::new(id), Position::ORIGIN)
    }

    /// input -> process, plus the generic repair node.
    fn generic_graph() -> WorkflowGraph {
        let mut graph = WorkflowGraph::new(vec![process("a"), process("b")], vec![]);
        graph.connect(&NodeId::from("a"), &NodeId::from("b"));
        GraphMutator::new(DomainType::Generic).enforce(&graph).graph
    }

    fn healthcare_graph() -> WorkflowGraph {
        GraphMutator::new(DomainType::Healthcare)
            .enforce(&WorkflowGraph::new(vec![process("input")], vec![]))
            .graph
    }

    #[test]
    fn node_added_appends_node_with_fresh_id() {
        let graph = generic_graph();
        assert_eq!(graph.node_count(), 3);

        let mutation = GraphMutator::new(DomainType::Generic)
            .apply(&graph, &FlowDelta::NodeAdded { data: NodeSpec::labeled("Custom Step") })
            .unwrap();

        let AppliedChange::NodeAdded(node) = &mutation.change else {
            panic!("expected NodeAdded");
        };
        assert_eq!(mutation.settled.graph.node_count(), 4);
        assert!(!graph.contains_node(&node.id));
        assert!(node.id.as_str().starts_with("node_"));
        assert_eq!(node.position, Position::new(100.0, 100.0));
        assert!(!mutation.settled.was_repaired());
    }

    #[test]
    fn node_added_requires_label() {
        let graph = generic_graph();
        let err = GraphMutator::new(DomainType::Generic)
            .apply(&graph, &FlowDelta::NodeAdded { data: NodeSpec::labeled("  ") })
            .unwrap_err();
        assert_eq!(err, WorkflowError::Validation(ValidationError::empty_field("label")));
    }

    #[test]
    fn node_added_rejects_existing_id() {
        let mut spec = NodeSpec::labeled("Dup");
        spec.id = Some(NodeId::from("a"));
        let err = GraphMutator::new(DomainType::Generic)
            .apply(&generic_graph(), &FlowDelta::NodeAdded { data: spec })
            .unwrap_err();
        assert!(matches!(err, WorkflowError::Validation(_)));
    }

    #[test]
    fn removing_locked_node_is_forbidden() {
        let graph = healthcare_graph();
        let phi = graph
            .nodes
            .iter()
            .find(|n| n.data.compliance_type.as_deref() == Some("HIPAA_PHI_REDACTION"))
            .unwrap()
            .id
            .clone();

        let err = GraphMutator::new(DomainType::Healthcare)
            .apply(&graph, &FlowDelta::NodeRemoved { node_id: phi.clone() })
            .unwrap_err();
        assert_eq!(err, WorkflowError::Forbidden(phi));
        assert_eq!(graph.node_count(), 7);
    }

    #[test]
    fn removing_unknown_node_is_not_found() {
        let err = GraphMutator::new(DomainType::Generic)
            .apply(&generic_graph(), &FlowDelta::NodeRemoved { node_id: NodeId::from("nope") })
            .unwrap_err();
        assert_eq!(err, WorkflowError::NodeNotFound(NodeId::from("nope")));
    }

    #[test]
    fn removing_node_cascades_edges() {
        let mutation = GraphMutator::new(DomainType::Generic)
            .apply(&generic_graph(), &FlowDelta::NodeRemoved { node_id: NodeId::from("b") })
            .unwrap();
        let AppliedChange::NodeRemoved { edges, .. } = &mutation.change else {
            panic!("expected NodeRemoved");
        };
        assert!(edges.iter().all(|e| e.touches(&NodeId::from("b"))));
        assert!(mutation
            .settled
            .graph
            .edges
            .iter()
            .all(|e| !e.touches(&NodeId::from("b"))));
    }

    #[test]
    fn removing_unlocked_mandated_node_triggers_repair() {
        let graph = generic_graph();
        let basic = NodeId::from("compliance_generic_basic_security");
        assert!(graph.contains_node(&basic));

        let mutation = GraphMutator::new(DomainType::Generic)
            .apply(&graph, &FlowDelta::NodeRemoved { node_id: basic.clone() })
            .unwrap();
        assert!(mutation.settled.compliance.is_compliant);
        assert_eq!(mutation.settled.repaired, vec![basic]);
    }

    #[test]
    fn locked_node_update_only_moves_it() {
        let graph = healthcare_graph();
        let locked = graph.nodes.iter().find(|n| n.data.locked).unwrap().clone();

        let delta = FlowDelta::NodeUpdated {
            node_id: locked.id.clone(),
            updates: NodeUpdate {
                label: Some("Renamed".into()),
                description: Some("gone".into()),
                x: Some(999.0),
                y: None,
            },
        };
        let mutation = GraphMutator::new(DomainType::Healthcare).apply(&graph, &delta).unwrap();
        let updated = mutation.settled.graph.node(&locked.id).unwrap();

        assert_eq!(updated.data.label, locked.data.label);
        assert_eq!(updated.data.description, locked.data.description);
        assert_eq!(updated.position.x, 999.0);
        assert_eq!(updated.position.y, locked.position.y);
    }

    #[test]
    fn editable_node_update_applies_all_fields() {
        let delta = FlowDelta::NodeUpdated {
            node_id: NodeId::from("a"),
            updates: NodeUpdate {
                label: Some("Renamed".into()),
                description: Some("details".into()),
                x: Some(1.0),
                y: Some(2.0),
            },
        };
        let mutation = GraphMutator::new(DomainType::Generic)
            .apply(&generic_graph(), &delta)
            .unwrap();
        let node = mutation.settled.graph.node(&NodeId::from("a")).unwrap();
        assert_eq!(node.data.label, "Renamed");
        assert_eq!(node.data.description.as_deref(), Some("details"));
        assert_eq!(node.position, Position::new(1.0, 2.0));
    }

    #[test]
    fn update_unknown_node_is_not_found() {
        let delta = FlowDelta::NodeUpdated {
            node_id: NodeId::from("ghost"),
            updates: NodeUpdate::default(),
        };
        let err = GraphMutator::new(DomainType::Generic)
            .apply(&generic_graph(), &delta)
            .unwrap_err();
        assert_eq!(err.code().to_string(), "NODE_NOT_FOUND");
    }

    #[test]
    fn update_rejects_empty_label() {
        let delta = FlowDelta::NodeUpdated {
            node_id: NodeId::from("a"),
            updates: NodeUpdate {
                label: Some(String::new()),
                ..Default::default()
            },
        };
        assert!(GraphMutator::new(DomainType::Generic)
            .apply(&generic_graph(), &delta)
            .is_err());
    }

    #[test]
    fn edge_added_twice_yields_one_edge() {
        let mutator = GraphMutator::new(DomainType::Generic);
        let delta = FlowDelta::EdgeAdded {
            source: NodeId::from("b"),
            target: NodeId::from("a"),
        };
        let first = mutator.apply(&generic_graph(), &delta).unwrap();
        let second = mutator.apply(&first.settled.graph, &delta).unwrap();

        assert_eq!(second.change, AppliedChange::EdgeAdded(None));
        let count = second
            .settled
            .graph
            .edges
            .iter()
            .filter(|e| e.joins(&NodeId::from("b"), &NodeId::from("a")))
            .count();
        assert_eq!(count, 1);
    }

    #[test]
    fn edge_to_missing_node_is_invalid_reference() {
        let delta = FlowDelta::EdgeAdded {
            source: NodeId::from("a"),
            target: NodeId::from("ghost"),
        };
        let err = GraphMutator::new(DomainType::Generic)
            .apply(&generic_graph(), &delta)
            .unwrap_err();
        assert_eq!(err, WorkflowError::InvalidReference(NodeId::from("ghost")));
    }

    #[test]
    fn edge_removed_is_noop_when_absent() {
        let graph = generic_graph();
        let mutation = GraphMutator::new(DomainType::Generic)
            .apply(&graph, &FlowDelta::EdgeRemoved { edge_id: EdgeId::from("edge_x_y") })
            .unwrap();
        assert_eq!(mutation.change, AppliedChange::EdgeRemoved(Vec::new()));
        assert_eq!(mutation.settled.graph, graph);
    }

    #[test]
    fn edges_with_clashing_canonical_ids_stay_addressable() {
        let graph = WorkflowGraph::new(
            vec![process("a_b"), process("c"), process("a"), process("b_c")],
            vec![],
        );
        let mutator = GraphMutator::new(DomainType::Generic).with_auto_wire(false);
        let first = mutator
            .apply(&graph, &FlowDelta::EdgeAdded { source: NodeId::from("a_b"), target: NodeId::from("c") })
            .unwrap();
        let second = mutator
            .apply(
                &first.settled.graph,
                &FlowDelta::EdgeAdded { source: NodeId::from("a"), target: NodeId::from("b_c") },
            )
            .unwrap();
        let ids: Vec<_> = second.settled.graph.edges.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["edge_a_b_c", "edge_a_b_c_2"]);

        let removed = mutator
            .apply(
                &second.settled.graph,
                &FlowDelta::EdgeRemoved { edge_id: EdgeId::from("edge_a_b_c") },
            )
            .unwrap();
        let edges = &removed.settled.graph.edges;
        assert_eq!(edges.len(), 1);
        assert!(edges[0].joins(&NodeId::from("a"), &NodeId::from("b_c")));
    }

    #[test]
    fn viewport_is_replaced_wholesale() {
        let viewport = Viewport { x: 10.0, y: -5.0, zoom: 2.0 };
        let mutation = GraphMutator::new(DomainType::Generic)
            .apply(&generic_graph(), &FlowDelta::ViewportChanged { viewport })
            .unwrap();
        assert_eq!(mutation.settled.graph.viewport, viewport);
    }

    #[test]
    fn finance_graph_without_compliance_nodes_gets_all_three() {
        let graph = WorkflowGraph::new(vec![process("a"), process("b"), process("c")], vec![]);
        let mutation = GraphMutator::new(DomainType::Finance)
            .apply(&graph, &FlowDelta::ViewportChanged { viewport: Viewport::default() })
            .unwrap();

        let types = mutation.settled.graph.compliance_types();
        for required in ["PCI_DSS", "FRAUD_DETECTION", "FINANCIAL_AUDIT"] {
            assert!(types.contains(required));
        }
        assert_eq!(mutation.settled.repaired.len(), 3);
    }

    #[test]
    fn repairs_are_chained_after_last_existing_node() {
        let graph = WorkflowGraph::new(vec![process("a")], vec![]);
        let settled = GraphMutator::new(DomainType::Education).enforce(&graph);

        let [ferpa, audit] = settled.repaired.as_slice() else {
            panic!("expected two repairs");
        };
        assert!(settled.graph.has_edge_between(&NodeId::from("a"), ferpa));
        assert!(settled.graph.has_edge_between(ferpa, audit));
        assert_eq!(settled.graph.edge_count(), 2);
    }

    #[test]
    fn repairs_stay_unwired_when_disabled() {
        let graph = WorkflowGraph::new(vec![process("a")], vec![]);
        let settled = GraphMutator::new(DomainType::Education)
            .with_auto_wire(false)
            .enforce(&graph);
        assert_eq!(settled.repaired.len(), 2);
        assert_eq!(settled.graph.edge_count(), 0);
    }

    #[test]
    fn rejected_delta_leaves_input_untouched() {
        let graph = healthcare_graph();
        let snapshot = graph.clone();
        let locked = graph.nodes.iter().find(|n| n.data.locked).unwrap().id.clone();
        let _ = GraphMutator::new(DomainType::Healthcare)
            .apply(&graph, &FlowDelta::NodeRemoved { node_id: locked });
        assert_eq!(graph, snapshot);
    }
}
