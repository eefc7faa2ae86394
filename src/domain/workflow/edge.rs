//! Directed edges between flow nodes.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EdgeId, NodeId};

fn default_edge_type() -> String {
    "default".to_string()
}

/// A directed connection between two nodes of the same graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,
    #[serde(rename = "type", default = "default_edge_type")]
    pub edge_type: String,
    #[serde(default)]
    pub animated: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FlowEdge {
    /// Creates a default edge with the canonical `edge_{source}_{target}` id.
    pub fn connect(source: NodeId, target: NodeId) -> Self {
        Self {
            id: EdgeId::between(&source, &target),
            source,
            target,
            edge_type: default_edge_type(),
            animated: false,
            label: None,
        }
    }

    /// True if either endpoint is the given node.
    pub fn touches(&self, node_id: &NodeId) -> bool {
        &self.source == node_id || &self.target == node_id
    }

    pub fn joins(&self, source: &NodeId, target: &NodeId) -> bool {
        &self.source == source && &self.target == target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_builds_canonical_edge() {
        let edge = FlowEdge::connect(NodeId::from("a"), NodeId::from("b"));
        assert_eq!(edge.id.as_str(), "edge_a_b");
        assert_eq!(edge.edge_type, "default");
        assert!(!edge.animated);
    }

    #[test]
    fn touches_matches_either_endpoint() {
        let edge = FlowEdge::connect(NodeId::from("a"), NodeId::from("b"));
        assert!(edge.touches(&NodeId::from("a")));
        assert!(edge.touches(&NodeId::from("b")));
        assert!(!edge.touches(&NodeId::from("c")));
    }
}
