//! Typed client settings.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Front end a process is acting as.
///
/// Both share one client; the distinction only selects which command groups
/// the composing application exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppKind {
    /// Platform administration (partner management).
    Admin,
    /// Partner and employee workspace.
    #[default]
    Client,
}

impl AppKind {
    /// Stable label used in configuration and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "client" => Ok(Self::Client),
            _ => Err(ConfigError::InvalidValue {
                variable: crate::defaults::ENV_APP,
                value: value.to_string(),
                reason: "expected admin or client",
            }),
        }
    }
}

/// Execution context of the client.
///
/// Credentials are only attached in interactive contexts; server-side
/// rendering never reads session storage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClientMode {
    /// A user-facing session with persisted credentials.
    #[default]
    Interactive,
    /// A non-interactive rendering context.
    Server,
}

impl ClientMode {
    /// Stable label used in configuration and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Interactive => "interactive",
            Self::Server => "server",
        }
    }

    /// Whether outgoing requests should carry stored credentials.
    #[must_use]
    pub const fn attaches_credentials(self) -> bool {
        matches!(self, Self::Interactive)
    }
}

impl fmt::Display for ClientMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "interactive" => Ok(Self::Interactive),
            "server" => Ok(Self::Server),
            _ => Err(ConfigError::InvalidValue {
                variable: crate::defaults::ENV_CLIENT_MODE,
                value: value.to_string(),
                reason: "expected interactive or server",
            }),
        }
    }
}

/// Settings consumed once when the API client is constructed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base endpoint; not validated, may be empty.
    pub api_url: String,
    /// Front end this process acts as.
    pub app: AppKind,
    /// Execution context.
    pub mode: ClientMode,
    /// Whole-request timeout; `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Interactive client-app configuration pointed at `api_url`.
    #[must_use]
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Self::default()
        }
    }

    /// Replace the front end selection.
    #[must_use]
    pub const fn with_app(mut self, app: AppKind) -> Self {
        self.app = app;
        self
    }

    /// Replace the execution context.
    #[must_use]
    pub const fn with_mode(mut self, mode: ClientMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set a whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}
