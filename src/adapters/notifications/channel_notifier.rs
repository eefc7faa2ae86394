//! In-process notification fan-out over bounded channels.
//!
//! Subscribers are grouped by session:
//!
//! ```text
//! session-123          session-456
//! ├── subscriber-a     └── subscriber-d
//! └── subscriber-b
//! ```
//!
//! Each subscriber owns a bounded `mpsc` channel. A publish waits at most
//! `delivery_timeout` for room in a subscriber's buffer; subscribers that
//! time out or have hung up are removed, so one stalled consumer cannot
//! hold up later commits.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tokio::sync::RwLock;

use crate::config::NotifierConfig;
use crate::domain::foundation::{SessionId, SubscriberId};
use crate::ports::{DeliveryReport, FlowNotification, FlowNotifier, Subscription};

type Senders = HashMap<SubscriberId, mpsc::Sender<FlowNotification>>;

/// Channel-backed [`FlowNotifier`].
///
/// # Thread Safety
///
/// Uses `RwLock` for the registry since publishes (reads) vastly outnumber
/// subscribes (writes). The lock is released before any send is awaited.
pub struct ChannelNotifier {
    sessions: RwLock<HashMap<SessionId, Senders>>,
    channel_capacity: usize,
    delivery_timeout: Duration,
}

impl ChannelNotifier {
    pub fn new(channel_capacity: usize, delivery_timeout: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            channel_capacity: channel_capacity.max(1),
            delivery_timeout,
        }
    }

    pub fn from_config(config: &NotifierConfig) -> Self {
        Self::new(config.channel_capacity, config.delivery_timeout())
    }

    /// Total subscribers across all sessions.
    pub async fn total_subscriber_count(&self) -> usize {
        self.sessions.read().await.values().map(HashMap::len).sum()
    }

    async fn drop_subscribers(&self, session_id: &SessionId, ids: &[SubscriberId]) {
        let mut sessions = self.sessions.write().await;
        if let Some(senders) = sessions.get_mut(session_id) {
            for id in ids {
                senders.remove(id);
            }
            if senders.is_empty() {
                sessions.remove(session_id);
            }
        }
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::from_config(&NotifierConfig::default())
    }
}

#[async_trait]
impl FlowNotifier for ChannelNotifier {
    async fn subscribe(&self, session_id: SessionId) -> Subscription {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let id = SubscriberId::new();
        self.sessions
            .write()
            .await
            .entry(session_id)
            .or_default()
            .insert(id, tx);

        tracing::debug!(session_id = %session_id, subscriber_id = %id, "Subscriber registered");
        Subscription { id, receiver: rx }
    }

    async fn unsubscribe(&self, session_id: &SessionId, subscriber_id: &SubscriberId) -> bool {
        let mut sessions = self.sessions.write().await;
        let Some(senders) = sessions.get_mut(session_id) else {
            return false;
        };
        let removed = senders.remove(subscriber_id).is_some();
        if senders.is_empty() {
            sessions.remove(session_id);
        }
        removed
    }

    async fn publish(&self, session_id: &SessionId, notification: FlowNotification) -> DeliveryReport {
        let targets: Vec<(SubscriberId, mpsc::Sender<FlowNotification>)> = {
            let sessions = self.sessions.read().await;
            match sessions.get(session_id) {
                Some(senders) => senders.iter().map(|(id, tx)| (*id, tx.clone())).collect(),
                None => return DeliveryReport::default(),
            }
        };

        let timeout = self.delivery_timeout;
        let sends = targets.into_iter().map(|(id, tx)| {
            let notification = notification.clone();
            async move { (id, tx.send_timeout(notification, timeout).await) }
        });

        let mut report = DeliveryReport::default();
        let mut failed = Vec::new();
        for (id, result) in join_all(sends).await {
            match result {
                Ok(()) => report.delivered += 1,
                Err(err) => {
                    let reason = match err {
                        SendTimeoutError::Timeout(_) => "timeout",
                        SendTimeoutError::Closed(_) => "closed",
                    };
                    tracing::warn!(
                        session_id = %session_id,
                        subscriber_id = %id,
                        reason,
                        version = notification.version(),
                        "Dropping subscriber after failed delivery"
                    );
                    failed.push(id);
                }
            }
        }

        if !failed.is_empty() {
            report.dropped = failed.len();
            self.drop_subscribers(session_id, &failed).await;
        }
        report
    }

    async fn subscriber_count(&self, session_id: &SessionId) -> usize {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(HashMap::len)
            .unwrap_or(0)
    }

    async fn close_session(&self, session_id: &SessionId) -> usize {
        self.sessions
            .write()
            .await
            .remove(session_id)
            .map(|senders| senders.len())
            .unwrap_or(0)
    }
}
