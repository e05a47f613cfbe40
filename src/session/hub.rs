//! Auth-state change notifications.
//!
//! Each user has at most one watch channel, created by the first
//! subscriber and removed when the last [`AuthSubscription`] is dropped.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::watch;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
    UserUpdated,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SessionSnapshot {
    pub event: AuthEvent,
    pub user_id: Uuid,
    pub email: Option<String>,
    pub at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn new(event: AuthEvent, user_id: Uuid, email: Option<String>) -> Self {
        Self {
            event,
            user_id,
            email,
            at: Utc::now(),
        }
    }

    pub fn is_signed_in(&self) -> bool {
        self.event != AuthEvent::SignedOut
    }
}

struct Channel {
    sender: watch::Sender<Option<SessionSnapshot>>,
    listeners: usize,
}

type Channels = Arc<Mutex<HashMap<Uuid, Channel>>>;

#[derive(Clone, Default)]
pub struct SessionHub {
    channels: Channels,
}

impl SessionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers a snapshot to the user's current listeners. Without
    /// listeners the snapshot is discarded.
    pub fn publish(&self, snapshot: SessionSnapshot) {
        let channels = self.channels.lock();
        if let Some(channel) = channels.get(&snapshot.user_id) {
            tracing::debug!(
                user_id = %snapshot.user_id,
                event = ?snapshot.event,
                listeners = channel.listeners,
                "auth state change"
            );
            channel.sender.send_replace(Some(snapshot));
        }
    }

    pub fn subscribe(&self, user_id: Uuid) -> AuthSubscription {
        let mut channels = self.channels.lock();
        let channel = channels.entry(user_id).or_insert_with(|| Channel {
            sender: watch::channel(None).0,
            listeners: 0,
        });
        channel.listeners += 1;
        let receiver = channel.sender.subscribe();

        AuthSubscription {
            user_id,
            receiver,
            channels: Arc::clone(&self.channels),
        }
    }

    pub fn listener_count(&self, user_id: &Uuid) -> usize {
        self.channels
            .lock()
            .get(user_id)
            .map(|c| c.listeners)
            .unwrap_or(0)
    }
}

/// A live listener on one user's auth state. Dropping it unsubscribes.
pub struct AuthSubscription {
    user_id: Uuid,
    receiver: watch::Receiver<Option<SessionSnapshot>>,
    channels: Channels,
}

impl AuthSubscription {
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Waits for the next snapshot published after this subscription was
    /// taken (or after the previous call returned).
    pub async fn changed(&mut self) -> Option<SessionSnapshot> {
        self.receiver.changed().await.ok()?;
        self.receiver.borrow_and_update().clone()
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        let mut channels = self.channels.lock();
        if let Some(channel) = channels.get_mut(&self.user_id) {
            channel.listeners = channel.listeners.saturating_sub(1);
            if channel.listeners == 0 {
                channels.remove(&self.user_id);
            }
        }
        tracing::trace!(user_id = %self.user_id, "auth subscription released");
    }
}
