//! SessionStore - owns every live session and serializes its mutations.
//!
//! # Locking
//!
//! ```text
//! sessions: RwLock<HashMap<SessionId, Arc<Mutex<Session>>>>
//!             │                            │
//!             │ held only to look up,      │ held for the whole
//!             │ insert or remove           │ mutate → validate → repair → commit → notify
//! ```
//!
//! The registry lock is never held while a session lock is awaited, so
//! creating or cleaning up one session never waits on another session's
//! delta. Tokio's mutex is FIFO, which gives per-session submission order.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};
use tokio::sync::{Mutex, RwLock};

use crate::adapters::notifications::ChannelNotifier;
use crate::config::{AppConfig, EngineConfig};
use crate::domain::compliance::{classify, validate, ComplianceReport};
use crate::domain::foundation::{SessionId, SubscriberId, Timestamp, UserId};
use crate::domain::session::{Session, SessionError};
use crate::domain::workflow::{FlowDelta, GraphMutator, Mutation, WorkflowExport, WorkflowState};
use crate::ports::{FlowNotification, FlowNotifier, Subscription};

use super::commands::{
    ComplianceStatus, CreateSessionCommand, DeltaOutcome, EnforcementOutcome,
};
use super::seed::seed_graph;

type SessionHandle = Arc<Mutex<Session>>;

/// In-memory session registry and mutation pipeline.
pub struct SessionStore {
    sessions: RwLock<HashMap<SessionId, SessionHandle>>,
    notifier: Arc<dyn FlowNotifier>,
    config: EngineConfig,
}

impl SessionStore {
    pub fn new(notifier: Arc<dyn FlowNotifier>, config: EngineConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            notifier,
            config,
        }
    }

    /// Store backed by a [`ChannelNotifier`] sized from `config.notifier`.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            Arc::new(ChannelNotifier::from_config(&config.notifier)),
            config.engine.clone(),
        )
    }

    pub fn with_defaults() -> Self {
        Self::from_config(&AppConfig::default())
    }

    fn mutator_for(&self, session: &Session) -> GraphMutator {
        GraphMutator::new(session.domain()).with_auto_wire(self.config.auto_wire_repairs)
    }

    async fn handle(&self, session_id: &SessionId) -> Result<SessionHandle, SessionError> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .cloned()
            .ok_or_else(|| SessionError::not_found(*session_id))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Classifies the seed input, builds the initial graph and registers the
    /// session at version 1.
    ///
    /// # Errors
    ///
    /// - `Validation` if the user id is blank
    pub async fn create_session(&self, cmd: CreateSessionCommand) -> Result<Session, SessionError> {
        let user_id = UserId::new(cmd.user_id)?;
        let classification = classify(&cmd.seed_input);
        let domain = classification.domain;

        let graph = seed_graph(&cmd.seed_input, domain, self.config.seed_excerpt_chars);
        let title = cmd
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.config.default_title.clone());
        let state = WorkflowState::new(user_id.clone(), domain, title, cmd.description, graph);

        let mut context = Map::new();
        context.insert(
            "domain_info".to_string(),
            serde_json::to_value(&classification).unwrap_or_default(),
        );
        context.insert("initial_input".to_string(), Value::String(cmd.seed_input));

        let session_id = SessionId::new();
        let session = Session::new(session_id, user_id, state, context);
        self.sessions
            .write()
            .await
            .insert(session_id, Arc::new(Mutex::new(session.clone())));

        tracing::info!(
            session_id = %session_id,
            %domain,
            confidence = classification.confidence,
            nodes = session.graph().node_count(),
            "Session created"
        );
        Ok(session)
    }

    /// Snapshot of a session.
    pub async fn get_session(&self, session_id: &SessionId) -> Result<Session, SessionError> {
        let handle = self.handle(session_id).await?;
        let session = handle.lock().await;
        Ok(session.clone())
    }

    /// Removes a session and closes its subscriber channels.
    ///
    /// Deltas already waiting on the session fail with `Closed`.
    pub async fn cleanup(&self, session_id: &SessionId) -> Result<(), SessionError> {
        let handle = self
            .sessions
            .write()
            .await
            .remove(session_id)
            .ok_or_else(|| SessionError::not_found(*session_id))?;

        let mut session = handle.lock().await;
        session.close();
        let subscribers = self.notifier.close_session(session_id).await;

        tracing::info!(
            session_id = %session_id,
            version = session.version(),
            subscribers,
            "Session cleaned up"
        );
        Ok(())
    }

    /// Cleans up every session idle for at least `max_idle`. Returns how many were evicted.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let handles: Vec<(SessionId, SessionHandle)> = self
            .sessions
            .read()
            .await
            .iter()
            .map(|(id, handle)| (*id, Arc::clone(handle)))
            .collect();

        let now = Timestamp::now();
        let mut idle = Vec::new();
        for (id, handle) in handles {
            let session = handle.lock().await;
            let expired = session
                .idle_for(&now)
                .to_std()
                .map(|elapsed| elapsed >= max_idle)
                .unwrap_or(false);
            if expired {
                idle.push(id);
            }
        }

        let mut evicted = 0;
        for id in idle {
            // A concurrent cleanup may have won the race.
            if self.cleanup(&id).await.is_ok() {
                evicted += 1;
            }
        }
        if evicted > 0 {
            tracing::info!(evicted, max_idle_secs = max_idle.as_secs(), "Idle sessions evicted");
        }
        evicted
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.read().await.keys().copied().collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies one delta, restores compliance, commits and notifies.
    ///
    /// The whole sequence runs under the session's lock. On error nothing
    /// is committed or published.
    pub async fn apply_delta(
        &self,
        session_id: &SessionId,
        delta: FlowDelta,
    ) -> Result<DeltaOutcome, SessionError> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;
        session.ensure_open()?;

        let Mutation { change, settled } = self
            .mutator_for(&session)
            .apply(session.graph(), &delta)
            .map_err(|err| {
                tracing::warn!(
                    session_id = %session_id,
                    delta = delta.kind(),
                    code = %err.code(),
                    error = %err,
                    "Delta rejected"
                );
                err
            })?;

        let version = session.commit(settled.graph.clone())?;
        let delivery = self
            .notifier
            .publish(
                session_id,
                FlowNotification::FlowUpdated {
                    flow: settled.graph.clone(),
                    compliance: settled.compliance.clone(),
                    version,
                },
            )
            .await;

        tracing::info!(
            session_id = %session_id,
            delta = delta.kind(),
            version,
            repaired = settled.repaired.len(),
            delivered = delivery.delivered,
            dropped = delivery.dropped,
            "Delta committed"
        );

        Ok(DeltaOutcome {
            version,
            flow: settled.graph,
            compliance: settled.compliance,
            change,
            repaired: settled.repaired,
            delivery,
        })
    }

    /// Runs validation and repair without a delta.
    ///
    /// Commits and publishes `compliance_enforced` only when something was
    /// added; a compliant session keeps its version.
    pub async fn enforce_compliance(
        &self,
        session_id: &SessionId,
    ) -> Result<EnforcementOutcome, SessionError> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;
        session.ensure_open()?;

        let settled = self.mutator_for(&session).enforce(session.graph());
        if !settled.was_repaired() {
            return Ok(EnforcementOutcome {
                version: session.version(),
                compliance: settled.compliance,
                repaired: Vec::new(),
                delivery: None,
            });
        }

        let version = session.commit(settled.graph.clone())?;
        let delivery = self
            .notifier
            .publish(
                session_id,
                FlowNotification::ComplianceEnforced {
                    flow: settled.graph,
                    compliance: settled.compliance.clone(),
                    version,
                    added_nodes: settled.repaired.clone(),
                },
            )
            .await;

        tracing::info!(
            session_id = %session_id,
            version,
            added = settled.repaired.len(),
            "Compliance enforced"
        );

        Ok(EnforcementOutcome {
            version,
            compliance: settled.compliance,
            repaired: settled.repaired,
            delivery: Some(delivery),
        })
    }

    /// Merges keys into the session context.
    pub async fn update_context(
        &self,
        session_id: &SessionId,
        updates: Map<String, Value>,
    ) -> Result<(), SessionError> {
        let handle = self.handle(session_id).await?;
        let mut session = handle.lock().await;
        session.merge_context(updates)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn export(&self, session_id: &SessionId) -> Result<WorkflowExport, SessionError> {
        let handle = self.handle(session_id).await?;
        let session = handle.lock().await;
        Ok(session.state().export())
    }

    pub async fn compliance_status(
        &self,
        session_id: &SessionId,
    ) -> Result<ComplianceStatus, SessionError> {
        let handle = self.handle(session_id).await?;
        let session = handle.lock().await;
        let result = validate(&session.graph().nodes, session.domain());
        Ok(ComplianceStatus {
            session_id: *session_id,
            domain: session.domain(),
            is_compliant: result.is_compliant,
            violations_count: result.violations.len(),
            version: session.version(),
            last_updated: *session.state().updated_at(),
        })
    }

    pub async fn compliance_report(
        &self,
        session_id: &SessionId,
    ) -> Result<ComplianceReport, SessionError> {
        let handle = self.handle(session_id).await?;
        let session = handle.lock().await;
        Ok(ComplianceReport::assess(session.state()))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Subscriptions
    // ─────────────────────────────────────────────────────────────────────────

    /// Subscribes to a session's notifications.
    ///
    /// Takes the session lock so a subscription cannot slip in after cleanup.
    pub async fn register(&self, session_id: &SessionId) -> Result<Subscription, SessionError> {
        let handle = self.handle(session_id).await?;
        let session = handle.lock().await;
        session.ensure_open()?;
        Ok(self.notifier.subscribe(*session_id).await)
    }

    pub async fn unregister(&self, session_id: &SessionId, subscriber_id: &SubscriberId) -> bool {
        self.notifier.unsubscribe(session_id, subscriber_id).await
    }
}
