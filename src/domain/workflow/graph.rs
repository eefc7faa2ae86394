//! The workflow graph: nodes, edges and the editor viewport.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EdgeId, NodeId};

use super::edge::FlowEdge;
use super::node::FlowNode;

/// Editor camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Structural problems that a committed graph must never exhibit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    DuplicateNodeId(NodeId),
    DanglingEdge { edge_id: EdgeId, missing: NodeId },
}

/// Nodes (ordered, id-unique), edges (ordered) and viewport.
///
/// # Invariants
///
/// - Node ids are unique
/// - Every edge's source and target name an existing node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WorkflowGraph {
    pub nodes: Vec<FlowNode>,
    pub edges: Vec<FlowEdge>,
    #[serde(default)]
    pub viewport: Viewport,
}

impl WorkflowGraph {
    pub fn new(nodes: Vec<FlowNode>, edges: Vec<FlowEdge>) -> Self {
        Self {
            nodes,
            edges,
            viewport: Viewport::default(),
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, id: &NodeId) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut FlowNode> {
        self.nodes.iter_mut().find(|n| &n.id == id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn has_edge_between(&self, source: &NodeId, target: &NodeId) -> bool {
        self.edges.iter().any(|e| e.joins(source, target))
    }

    /// Returns a node id based on `base` that is not used in this graph.
    ///
    /// `base` itself is returned when free; otherwise `{base}_2`, `{base}_3`, ...
    pub fn unused_node_id(&self, base: &str) -> NodeId {
        let candidate = NodeId::new(base);
        if !self.contains_node(&candidate) {
            return candidate;
        }
        (2u32..)
            .map(|n| NodeId::new(format!("{}_{}", base, n)))
            .find(|id| !self.contains_node(id))
            .unwrap_or_else(|| NodeId::generate(base))
    }

    fn contains_edge(&self, id: &EdgeId) -> bool {
        self.edges.iter().any(|e| &e.id == id)
    }

    /// Returns `base` when no edge uses it, otherwise `{base}_2`, `{base}_3`, ...
    ///
    /// Node ids may contain `_`, so `edge_{source}_{target}` alone can clash
    /// for different endpoint pairs.
    pub fn unused_edge_id(&self, base: &EdgeId) -> EdgeId {
        if !self.contains_edge(base) {
            return base.clone();
        }
        (2u32..)
            .map(|n| EdgeId::new(format!("{}_{}", base, n)))
            .find(|id| !self.contains_edge(id))
            .unwrap_or_else(|| base.clone())
    }

    /// Generates a random `{prefix}_xxxxxxxx` id that does not collide.
    pub fn generate_node_id(&self, prefix: &str) -> NodeId {
        loop {
            let id = NodeId::generate(prefix);
            if !self.contains_node(&id) {
                return id;
            }
        }
    }

    /// Appends a node. Returns false (and leaves the graph unchanged) on an id clash.
    pub fn push_node(&mut self, node: FlowNode) -> bool {
        if self.contains_node(&node.id) {
            return false;
        }
        self.nodes.push(node);
        true
    }

    /// Removes a node and every edge touching it.
    ///
    /// Returns the removed node and the cascaded edges, in their original order.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<(FlowNode, Vec<FlowEdge>)> {
        let index = self.nodes.iter().position(|n| &n.id == id)?;
        let node = self.nodes.remove(index);
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.edges).into_iter().partition(|e| e.touches(id));
        self.edges = kept;
        Some((node, removed))
    }

    /// Adds `source -> target` unless that pair is already connected.
    ///
    /// Callers are responsible for checking that both endpoints exist.
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Option<FlowEdge> {
        if self.has_edge_between(source, target) {
            return None;
        }
        let mut edge = FlowEdge::connect(source.clone(), target.clone());
        edge.id = self.unused_edge_id(&edge.id);
        self.edges.push(edge.clone());
        Some(edge)
    }

    /// Removes every edge carrying `id`. Returns the removed edges.
    pub fn remove_edge(&mut self, id: &EdgeId) -> Vec<FlowEdge> {
        let (removed, kept): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.edges).into_iter().partition(|e| &e.id == id);
        self.edges = kept;
        removed
    }

    /// Largest y coordinate over all nodes, if any.
    pub fn max_y(&self) -> Option<f64> {
        self.nodes.iter().map(|n| n.position.y).reduce(f64::max)
    }

    /// Compliance tags satisfied by mandated nodes currently present.
    pub fn compliance_types(&self) -> HashSet<&str> {
        self.nodes
            .iter()
            .filter_map(FlowNode::satisfied_compliance_type)
            .collect()
    }

    /// Checks node-id uniqueness and edge referential integrity.
    pub fn check_integrity(&self) -> Result<(), IntegrityViolation> {
        let mut seen = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !seen.insert(&node.id) {
                return Err(IntegrityViolation::DuplicateNodeId(node.id.clone()));
            }
        }
        for edge in &self.edges {
            for endpoint in [&edge.source, &edge.target] {
                if !seen.contains(endpoint) {
                    return Err(IntegrityViolation::DanglingEdge {
                        edge_id: edge.id.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
