//! Workflow graph model and its mutation rules.

mod delta;
mod edge;
mod errors;
mod graph;
mod mutator;
mod node;
mod state;

pub use delta::{FlowDelta, NodeSpec, NodeUpdate};
pub use edge::FlowEdge;
pub use errors::WorkflowError;
pub use graph::{IntegrityViolation, Viewport, WorkflowGraph};
pub use mutator::{AppliedChange, GraphMutator, Mutation, Settled};
pub use node::{FlowNode, LockState, NodeData, NodeType, Position};
pub use state::{WorkflowExport, WorkflowState};
