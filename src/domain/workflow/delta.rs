//! Incremental edit requests against a workflow graph.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::{EdgeId, NodeId};

use super::graph::Viewport;
use super::node::NodeType;

fn default_coordinate() -> f64 {
    100.0
}

/// Payload of a `node_added` delta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    #[serde(rename = "type", default)]
    pub node_type: NodeType,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default = "default_coordinate")]
    pub x: f64,
    #[serde(default = "default_coordinate")]
    pub y: f64,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl NodeSpec {
    /// A process node with the given label at the default position.
    pub fn labeled(label: impl Into<String>) -> Self {
        Self {
            id: None,
            node_type: NodeType::Process,
            label: label.into(),
            description: None,
            x: default_coordinate(),
            y: default_coordinate(),
            locked: false,
            parameters: Map::new(),
        }
    }
}

/// Partial update for `node_updated`. Absent fields are left as they are.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl NodeUpdate {
    pub fn touches_content(&self) -> bool {
        self.label.is_some() || self.description.is_some()
    }
}

/// One edit request, as received from the transport layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowDelta {
    NodeAdded { data: NodeSpec },
    NodeRemoved { node_id: NodeId },
    NodeUpdated { node_id: NodeId, updates: NodeUpdate },
    EdgeAdded { source: NodeId, target: NodeId },
    EdgeRemoved { edge_id: EdgeId },
    ViewportChanged { viewport: Viewport },
}

impl FlowDelta {
    /// Wire name of the delta, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            FlowDelta::NodeAdded { .. } => "node_added",
            FlowDelta::NodeRemoved { .. } => "node_removed",
            FlowDelta::NodeUpdated { .. } => "node_updated",
            FlowDelta::EdgeAdded { .. } => "edge_added",
            FlowDelta::EdgeRemoved { .. } => "edge_removed",
            FlowDelta::ViewportChanged { .. } => "viewport_changed",
        }
    }
}
