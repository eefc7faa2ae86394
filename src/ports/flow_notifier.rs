//! FlowNotifier port - Interface for pushing committed graph changes to
//! subscribers.
//!
//! The session store publishes after every commit; a transport adapter
//! (WebSocket, SSE, ...) owns the receiving end of each subscription.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::domain::compliance::ComplianceResult;
use crate::domain::foundation::{NodeId, SessionId, SubscriberId};
use crate::domain::workflow::WorkflowGraph;

/// Message delivered to subscribers of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowNotification {
    /// A delta was committed.
    FlowUpdated {
        flow: WorkflowGraph,
        compliance: ComplianceResult,
        version: u64,
    },
    /// An explicit enforcement pass repaired the graph.
    ComplianceEnforced {
        flow: WorkflowGraph,
        compliance: ComplianceResult,
        version: u64,
        added_nodes: Vec<NodeId>,
    },
}

impl FlowNotification {
    pub fn version(&self) -> u64 {
        match self {
            FlowNotification::FlowUpdated { version, .. }
            | FlowNotification::ComplianceEnforced { version, .. } => *version,
        }
    }

    pub fn flow(&self) -> &WorkflowGraph {
        match self {
            FlowNotification::FlowUpdated { flow, .. }
            | FlowNotification::ComplianceEnforced { flow, .. } => flow,
        }
    }
}

/// Receiving end handed to a new subscriber.
///
/// The channel closes when the subscriber is dropped for being slow, when
/// it unsubscribes, or when the session is cleaned up.
#[derive(Debug)]
pub struct Subscription {
    pub id: SubscriberId,
    pub receiver: mpsc::Receiver<FlowNotification>,
}

/// Outcome of one publish.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DeliveryReport {
    pub delivered: usize,
    /// Subscribers removed because they timed out or hung up.
    pub dropped: usize,
}

/// Port for per-session notification fan-out.
///
/// Implementations must ensure:
/// - `publish` returns within a bounded time regardless of subscriber speed
/// - Delivery failures never surface as errors to the publisher
/// - Notifications reach each subscriber in publish order
#[async_trait]
pub trait FlowNotifier: Send + Sync {
    /// Registers a new subscriber for a session.
    async fn subscribe(&self, session_id: SessionId) -> Subscription;

    /// Removes a subscriber. Returns false if it was not registered.
    async fn unsubscribe(&self, session_id: &SessionId, subscriber_id: &SubscriberId) -> bool;

    /// Delivers a notification to every subscriber of the session.
    async fn publish(&self, session_id: &SessionId, notification: FlowNotification) -> DeliveryReport;

    async fn subscriber_count(&self, session_id: &SessionId) -> usize;

    /// Drops every subscriber of a session, closing their channels.
    /// Returns how many were removed.
    async fn close_session(&self, session_id: &SessionId) -> usize;
}
