//! Auto-repair of non-compliant node sets.
//!
//! [`fix`] inserts exactly the mandated nodes that [`validate`] reports as
//! missing, in catalog order, laid out on a row below the existing nodes.
//! Calling it on its own output is a no-op.

use std::borrow::Cow;

use crate::domain::foundation::NodeId;
use crate::domain::workflow::{FlowNode, NodeData, Position, WorkflowGraph};

use super::catalog::{self, RequiredNode};
use super::validator::validate;
use super::DomainType;

/// Horizontal gap between synthesized nodes.
pub const REPAIR_SPACING_X: f64 = 200.0;
/// Vertical gap between the lowest existing node and the repair row.
pub const REPAIR_OFFSET_Y: f64 = 150.0;
const REPAIR_ANCHOR_X: f64 = 100.0;

/// Builds the node for a catalog requirement.
pub fn synthesize(required: &RequiredNode, id: NodeId, position: Position) -> FlowNode {
    let mut data = NodeData::new(required.label).with_description(required.description);
    data.domain_required = true;
    data.compliance_type = Some(required.compliance_type.to_string());
    data.locked = required.locked;

    let mut node = FlowNode::new(id, required.node_type, data, position);
    node.draggable = !required.locked;
    node.deletable = !required.locked;
    node.selectable = true;
    node
}

/// Where the first repair node goes.
fn repair_anchor(graph: &WorkflowGraph) -> Position {
    match graph.max_y() {
        Some(max_y) => Position::new(REPAIR_ANCHOR_X, max_y + REPAIR_OFFSET_Y),
        None => Position::ORIGIN,
    }
}

/// Deterministic, collision-free id for a synthesized node.
fn repair_node_id(graph: &WorkflowGraph, domain: DomainType, compliance_type: &str) -> NodeId {
    graph.unused_node_id(&format!(
        "compliance_{}_{}",
        domain,
        compliance_type.to_ascii_lowercase()
    ))
}

/// Returns `graph` with every missing mandated node appended.
///
/// A compliant graph comes back as `Cow::Borrowed`, so callers can tell a
/// no-op apart from a repair without comparing graphs. Edges are left alone.
pub fn fix(graph: &WorkflowGraph, domain: DomainType) -> Cow<'_, WorkflowGraph> {
    let result = validate(&graph.nodes, domain);
    if result.is_compliant {
        return Cow::Borrowed(graph);
    }

    let requirement = catalog::requirements_for(domain);
    let anchor = repair_anchor(graph);
    let mut repaired = graph.clone();

    let mut slot = 0usize;
    for violation in &result.violations {
        let Some(required) = requirement.required_node(&violation.compliance_type) else {
            continue;
        };
        if repaired
            .compliance_types()
            .contains(required.compliance_type)
        {
            continue;
        }
        let id = repair_node_id(&repaired, domain, required.compliance_type);
        let position = Position::new(anchor.x + slot as f64 * REPAIR_SPACING_X, anchor.y);
        repaired.push_node(synthesize(required, id, position));
        slot += 1;
    }

    tracing::debug!(
        %domain,
        added = slot,
        "Synthesized missing compliance nodes"
    );
    Cow::Owned(repaired)
}
