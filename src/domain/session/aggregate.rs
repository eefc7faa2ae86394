//! Session aggregate entity.
//!
//! A session owns exactly one [`WorkflowState`] for its lifetime, plus a
//! free-form context map that collaborators (the generation pipeline, the
//! transport) use to stash conversation data.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::compliance::DomainType;
use crate::domain::foundation::{SessionId, Timestamp, UserId};
use crate::domain::workflow::{WorkflowGraph, WorkflowState};

use super::SessionError;

/// Session aggregate.
///
/// # Invariants
///
/// - The workflow state is only replaced through [`commit`](Self::commit)
/// - A closed session accepts no further commits
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    id: SessionId,
    user_id: UserId,
    state: WorkflowState,
    context: Map<String, Value>,
    last_interaction: Timestamp,
    #[serde(skip)]
    closed: bool,
}

impl Session {
    pub fn new(id: SessionId, user_id: UserId, state: WorkflowState, context: Map<String, Value>) -> Self {
        Self {
            id,
            user_id,
            state,
            context,
            last_interaction: Timestamp::now(),
            closed: false,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn domain(&self) -> DomainType {
        self.state.domain()
    }

    pub fn graph(&self) -> &WorkflowGraph {
        self.state.graph()
    }

    pub fn version(&self) -> u64 {
        self.state.version()
    }

    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    pub fn last_interaction(&self) -> &Timestamp {
        &self.last_interaction
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Time since the last commit or context update, as seen at `now`.
    pub fn idle_for(&self, now: &Timestamp) -> chrono::Duration {
        now.duration_since(&self.last_interaction)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// - `Closed` once [`close`](Self::close) has run
    pub fn ensure_open(&self) -> Result<(), SessionError> {
        if self.closed {
            Err(SessionError::closed(self.id))
        } else {
            Ok(())
        }
    }

    /// Commits a new graph. Returns the new version.
    pub fn commit(&mut self, graph: WorkflowGraph) -> Result<u64, SessionError> {
        self.ensure_open()?;
        self.touch();
        Ok(self.state.commit(graph))
    }

    /// Merges `updates` into the context, overwriting existing keys.
    pub fn merge_context(&mut self, updates: Map<String, Value>) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.context.extend(updates);
        self.touch();
        Ok(())
    }

    pub fn close(&mut self) {
        self.closed = true;
    }

    fn touch(&mut self) {
        self.last_interaction = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session() -> Session {
        let state = WorkflowState::new(
            UserId::new("user-1").unwrap(),
            DomainType::Education,
            "Grades",
            None,
            WorkflowGraph::default(),
        );
        let mut context = Map::new();
        context.insert("initial_input".into(), json!("export grades"));
        Session::new(SessionId::new(), UserId::new("user-1").unwrap(), state, context)
    }

    #[test]
    fn commit_advances_version() {
        let mut session = session();
        assert_eq!(session.commit(WorkflowGraph::default()).unwrap(), 2);
        assert_eq!(session.version(), 2);
    }

    #[test]
    fn closed_session_rejects_commits() {
        let mut session = session();
        session.close();
        let err = session.commit(WorkflowGraph::default()).unwrap_err();
        assert_eq!(err, SessionError::Closed(*session.id()));
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn merge_context_overwrites_and_keeps_other_keys() {
        let mut session = session();
        let mut updates = Map::new();
        updates.insert("initial_input".into(), json!("new"));
        updates.insert("step".into(), json!(2));
        session.merge_context(updates).unwrap();

        assert_eq!(session.context()["initial_input"], json!("new"));
        assert_eq!(session.context()["step"], json!(2));
    }

    #[test]
    fn idle_time_resets_on_commit() {
        let mut session = session();
        std::thread::sleep(std::time::Duration::from_millis(5));
        let before_commit = session.idle_for(&Timestamp::now());
        session.commit(WorkflowGraph::default()).unwrap();

        assert!(before_commit.num_milliseconds() >= 5);
        assert!(session.idle_for(&Timestamp::now()) < before_commit);
    }

    #[test]
    fn serializes_without_closed_flag() {
        let json = serde_json::to_value(session()).unwrap();
        assert!(json.get("closed").is_none());
        assert_eq!(json["state"]["version"], 1);
    }
}
