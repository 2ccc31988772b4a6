//! Route decision for scanned device QR codes.
//!
//! # Design
//! - A QR code carries only the device id. Whether the scanner may see the
//!   management view is decided by probing the authenticated device endpoint.
//! - Any failed probe routes to the public view; [`ProbeOutcome`] keeps the
//!   cause so callers can still tell a refusal from an outage.

use std::fmt;

use reqwest::{Method, StatusCode};
use tracing::info;

use crate::client::ApiClient;
use crate::services::devices::DEVICES_PATH;
use crate::services::item_path;

/// Route prefix of the authenticated device view.
pub const DEVICE_ROUTE: &str = "/device";
/// Route prefix of the anonymous device view.
pub const PUBLIC_DEVICE_ROUTE: &str = "/public/device";

/// Why a probe resolved the way it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The device endpoint answered with a success status.
    Authorized,
    /// The backend refused the caller (401, 403 or 405).
    Denied(u16),
    /// Any other failure; `status` is absent when no response arrived.
    Failed {
        /// Response status, when the backend answered.
        status: Option<u16>,
    },
}

impl ProbeOutcome {
    /// Classify a probe status; `None` means the request never completed.
    #[must_use]
    pub fn from_status(status: Option<StatusCode>) -> Self {
        match status {
            Some(code) if code.is_success() => Self::Authorized,
            Some(
                code @ (StatusCode::UNAUTHORIZED
                | StatusCode::FORBIDDEN
                | StatusCode::METHOD_NOT_ALLOWED),
            ) => Self::Denied(code.as_u16()),
            other => Self::Failed {
                status: other.map(|code| code.as_u16()),
            },
        }
    }

    /// Whether the management view is allowed.
    #[must_use]
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }
}

/// Navigation target chosen for a scanned device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRoute {
    /// Application route to open, e.g. `/device/42`.
    pub target: String,
    /// Probe result that selected the route.
    pub outcome: ProbeOutcome,
}

impl DeviceRoute {
    /// Route for `id` given a probe outcome.
    #[must_use]
    pub fn for_outcome(id: &str, outcome: ProbeOutcome) -> Self {
        let prefix = if outcome.is_authorized() {
            DEVICE_ROUTE
        } else {
            PUBLIC_DEVICE_ROUTE
        };
        Self {
            target: format!("{prefix}/{id}"),
            outcome,
        }
    }
}

impl fmt::Display for DeviceRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.target)
    }
}

/// Probe `GET /partner/devices/:id` and pick the view to open.
///
/// Never fails: every error resolves to the public view. Only the status
/// decides; the body of a successful reply is not read as JSON. The probe runs
/// through the normal client pipeline, so a rejected token still clears the
/// session.
pub async fn resolve_device_route(client: &ApiClient, id: &str) -> DeviceRoute {
    let path = item_path(DEVICES_PATH, id);
    let probe = client
        .execute(&path, client.request(Method::GET, &path))
        .await;
    let outcome = ProbeOutcome::from_status(match probe {
        Ok(status) => Some(status),
        Err(err) => err.status(),
    });
    let route = DeviceRoute::for_outcome(id, outcome);
    info!(device_id = id, target = %route.target, ?outcome, "resolved device route");
    route
}
