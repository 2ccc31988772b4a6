//! Shared fixtures for client integration tests.

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use bizdesk_client::session::{EMPLOYEE_TOKEN_KEY, PARTNER_TOKEN_KEY, USER_TYPE_KEY};
use bizdesk_client::{ApiClient, MemorySessionStore};
use bizdesk_config::ClientConfig;
use httpmock::MockServer;
use tracing::field::{Field, Visit};
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

/// Client against `server` with a signed-in partner session.
pub fn partner_client(server: &MockServer) -> Result<(ApiClient, Arc<MemorySessionStore>)> {
    let store = Arc::new(MemorySessionStore::with_entries([
        (USER_TYPE_KEY, "partner"),
        (PARTNER_TOKEN_KEY, "partner-token"),
        (EMPLOYEE_TOKEN_KEY, "emp-token"),
    ]));
    let client = ApiClient::new(ClientConfig::new(server.base_url()), store.clone())?;
    Ok((client, store))
}

/// One recorded event: level, target and its fields rendered as strings.
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub fields: BTreeMap<String, String>,
}

/// Every event seen on the current thread.
#[derive(Clone, Default)]
pub struct CapturedEvents(Arc<Mutex<Vec<CapturedEvent>>>);

impl CapturedEvents {
    /// Events at `level` whose target starts with `prefix`.
    pub fn matching(&self, level: Level, prefix: &str) -> Vec<CapturedEvent> {
        self.0.lock().map_or_else(
            |_| Vec::new(),
            |events| {
                events
                    .iter()
                    .filter(|event| event.level == level && event.target.starts_with(prefix))
                    .cloned()
                    .collect()
            },
        )
    }

    /// Number of events at `level` whose target starts with `prefix`.
    pub fn count(&self, level: Level, prefix: &str) -> usize {
        self.matching(level, prefix).len()
    }
}

#[derive(Default)]
struct FieldRecorder(BTreeMap<String, String>);

impl Visit for FieldRecorder {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.insert(field.name().to_string(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.insert(field.name().to_string(), format!("{value:?}"));
    }
}

struct CaptureLayer(CapturedEvents);

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut recorder = FieldRecorder::default();
        event.record(&mut recorder);
        if let Ok(mut events) = (self.0).0.lock() {
            events.push(CapturedEvent {
                level: *metadata.level(),
                target: metadata.target().to_string(),
                fields: recorder.0,
            });
        }
    }
}

/// Capture events until the returned guard drops.
///
/// Thread-local, so tests must run on the current-thread runtime.
pub fn capture_events() -> (CapturedEvents, DefaultGuard) {
    let events = CapturedEvents::default();
    let subscriber = Registry::default().with(CaptureLayer(events.clone()));
    let guard = tracing::subscriber::set_default(subscriber);
    (events, guard)
}
