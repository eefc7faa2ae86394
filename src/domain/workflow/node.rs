//! Flow nodes and their payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::foundation::NodeId;

/// Visual/semantic kind of a node, as understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Input,
    #[default]
    Process,
    Output,
    Compliance,
    Security,
    Approval,
    Audit,
}

/// Canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const ORIGIN: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Whether a node accepts structural edits.
///
/// Every mutation consults this once, up front, instead of checking the
/// `locked` flag field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    /// Only repositioning is allowed; deletion and relabeling are rejected.
    Locked,
    Editable,
}

impl LockState {
    pub fn is_locked(&self) -> bool {
        matches!(self, LockState::Locked)
    }
}

/// Payload carried by every node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub domain_required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compliance_type: Option<String>,
    #[serde(default)]
    pub locked: bool,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

impl NodeData {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            description: None,
            domain_required: false,
            compliance_type: None,
            locked: false,
            parameters: Map::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

fn default_true() -> bool {
    true
}

/// A vertex of the workflow graph.
///
/// # Invariants
///
/// - A locked node is never deletable (`deletable == false`)
/// - A locked node keeps its label and description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub data: NodeData,
    pub position: Position,
    #[serde(default = "default_true")]
    pub draggable: bool,
    #[serde(default = "default_true")]
    pub selectable: bool,
    #[serde(default = "default_true")]
    pub deletable: bool,
}

impl FlowNode {
    /// Creates an editable node with default interaction flags.
    pub fn new(id: NodeId, node_type: NodeType, data: NodeData, position: Position) -> Self {
        let deletable = !data.locked;
        Self {
            id,
            node_type,
            data,
            position,
            draggable: true,
            selectable: true,
            deletable,
        }
    }

    pub fn lock_state(&self) -> LockState {
        if self.data.locked {
            LockState::Locked
        } else {
            LockState::Editable
        }
    }

    /// The compliance tag this node satisfies, if it is a mandated node.
    pub fn satisfied_compliance_type(&self) -> Option<&str> {
        if self.data.domain_required {
            self.data.compliance_type.as_deref()
        } else {
            None
        }
    }

    /// Moves the node. Allowed regardless of lock state.
    pub fn move_to(&mut self, x: Option<f64>, y: Option<f64>) {
        if let Some(x) = x {
            self.position.x = x;
        }
        if let Some(y) = y {
            self.position.y = y;
        }
    }
}
