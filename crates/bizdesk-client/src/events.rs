//! Session lifecycle notifications.
//!
//! The HTTP layer never navigates. When the backend rejects the stored
//! credential it publishes [`SessionEvent::Invalidated`]; whichever
//! application composes the client subscribes and decides what "go to login"
//! means for it. Internally this is a `tokio::broadcast` channel, so slow
//! subscribers lose the oldest events rather than blocking requests.

use tokio::sync::broadcast;
use tracing::debug;

use crate::error::AuthFailure;

/// Route the application should show after a forced logout.
pub const LOGIN_ROUTE: &str = "/login";

const DEFAULT_CAPACITY: usize = 16;

/// Events published by the client about the stored session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The backend rejected the credential and local session state was cleared.
    Invalidated {
        /// Tag the backend supplied.
        reason: AuthFailure,
        /// Navigation target for the composing application.
        redirect_to: &'static str,
    },
}

/// Broadcast fan-out for [`SessionEvent`]s.
#[derive(Debug, Clone)]
pub struct SessionEvents {
    sender: broadcast::Sender<SessionEvent>,
}

impl SessionEvents {
    /// Channel with room for `capacity` undelivered events per subscriber.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "session event capacity must be positive");
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Channel with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Deliver an event to current subscribers, returning how many received it.
    pub fn publish(&self, event: SessionEvent) -> usize {
        match self.sender.send(event) {
            Ok(receivers) => receivers,
            Err(broadcast::error::SendError(event)) => {
                debug!(?event, "no session event subscribers");
                0
            }
        }
    }

    /// Subscribe to events published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.sender.subscribe()
    }
}

impl Default for SessionEvents {
    fn default() -> Self {
        Self::new()
    }
}
