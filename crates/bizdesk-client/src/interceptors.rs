//! Hooks applied around every API call.
//!
//! # Design
//! - Before a call: attach the bearer token selected by the stored user type,
//!   or nothing at all. Missing or unreadable credentials never fail a request.
//! - After a failed call: log by class and, for a rejected token, clear the
//!   session and publish [`SessionEvent::Invalidated`]. The error itself is
//!   never swallowed or rewritten.

use std::sync::Arc;

use bizdesk_config::ClientMode;
use reqwest::RequestBuilder;
use tracing::{debug, error, warn};

use crate::error::{ApiError, ErrorClass};
use crate::events::{LOGIN_ROUTE, SessionEvent, SessionEvents};
use crate::session::{Session, SessionStore};

/// Message logged for server faults whose body carries none.
pub const DEFAULT_SERVER_MESSAGE: &str = "Internal server error";

/// Token to send with the next request, if any.
///
/// Returns `None` in [`ClientMode::Server`] without touching storage.
#[must_use]
pub fn bearer_token(mode: ClientMode, store: &dyn SessionStore) -> Option<String> {
    if !mode.attaches_credentials() {
        return None;
    }
    match Session::new(store).active_token() {
        Ok(token) => token,
        Err(err) => {
            debug!(error = %err, "session storage unreadable; sending request unauthenticated");
            None
        }
    }
}

/// Attach the selected bearer credential to an outgoing request.
#[must_use]
pub fn authorize(
    builder: RequestBuilder,
    mode: ClientMode,
    store: &dyn SessionStore,
) -> RequestBuilder {
    match bearer_token(mode, store) {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Post-response failure handling shared by every call on a client.
#[derive(Clone)]
pub struct ResponseInspector {
    store: Arc<dyn SessionStore>,
    events: SessionEvents,
}

impl ResponseInspector {
    /// Inspector clearing `store` and publishing on `events`.
    #[must_use]
    pub fn new(store: Arc<dyn SessionStore>, events: SessionEvents) -> Self {
        Self { store, events }
    }

    /// React to a failed call. The caller still returns `error` unchanged.
    pub fn inspect(&self, error: &ApiError) {
        match error.class() {
            ErrorClass::SessionInvalid(reason) => {
                warn!(
                    path = error.path(),
                    reason = reason.as_str(),
                    "backend rejected session credentials; signing out"
                );
                if let Err(err) = Session::new(self.store.as_ref()).clear() {
                    warn!(error = %err, "failed to clear session credentials");
                }
                self.events.publish(SessionEvent::Invalidated {
                    reason,
                    redirect_to: LOGIN_ROUTE,
                });
            }
            ErrorClass::Forbidden => {
                warn!(path = error.path(), "access forbidden for current session");
            }
            ErrorClass::ServerFault => {
                error!(
                    path = error.path(),
                    status = error.status().map(|status| status.as_u16()),
                    "{}",
                    error.server_message().unwrap_or(DEFAULT_SERVER_MESSAGE)
                );
            }
            ErrorClass::Other => {}
        }
    }
}
