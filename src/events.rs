//! Session event bus.
//!
//! Replaces the implicit `window` custom-event coupling with an explicit
//! publish/subscribe interface owned by the session-state layer. Events
//! carry no payload; subscribers re-run a gate check in response.

use tokio::sync::broadcast;
use tracing::debug;

/// Fire-and-forget session notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    /// Login, logout, or invalidation changed the session cookies.
    AuthChanged,
    /// Another tab mutated shared storage; re-derive local state from the
    /// jar. Eventually consistent, not linearizable.
    StorageSync,
}

/// A broadcast bus for [`AuthEvent`]s. Cloning shares the underlying
/// channel, so the gate and its subscribers see the same stream.
#[derive(Clone)]
pub struct SessionEvents {
    tx: broadcast::Sender<AuthEvent>,
}

impl SessionEvents {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        SessionEvents { tx }
    }

    /// Publish an event. A send with no live subscriber is not an error;
    /// the event is simply dropped.
    pub fn publish(&self, event: AuthEvent) {
        debug!("Publishing session event {:?}", event);
        let _ = self.tx.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.tx.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
