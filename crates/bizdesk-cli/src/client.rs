//! Dependency wiring, error types, and API error mapping for the CLI.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::anyhow;
use bizdesk_client::{ApiClient, ApiError, FileSessionStore};
use bizdesk_config::{AppKind, ClientConfig};
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::cli::Cli;

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

const SESSION_DIR: &str = ".bizdesk";
const SESSION_FILE: &str = "session.json";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ApiError> for CliError {
    fn from(error: ApiError) -> Self {
        let ApiError::Status {
            status, body, raw, ..
        } = &error
        else {
            return Self::failure(error);
        };

        let message = body
            .message
            .as_deref()
            .filter(|message| !message.trim().is_empty())
            .or_else(|| body.error.as_deref())
            .unwrap_or_else(|| raw.trim())
            .to_string();

        if matches!(
            *status,
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
        ) && !message.is_empty()
        {
            Self::validation(message)
        } else if message.is_empty() {
            Self::failure(anyhow!("request to {} failed with status {status}", error.path()))
        } else {
            Self::failure(anyhow!("{message} (status {status})"))
        }
    }
}

/// Dependencies constructed from CLI options and environment fallbacks.
pub(crate) struct CliDependencies {
    pub(crate) client: ApiClient,
}

impl CliDependencies {
    /// Construct the API client over the on-disk session store.
    pub(crate) fn from_cli(cli: &Cli, trace_id: &str) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let timeout = cli.timeout;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|err| CliError::failure(anyhow!("failed to build HTTP client: {err}")))?;

        let session_path = cli
            .session_file
            .clone()
            .unwrap_or_else(|| default_session_path(std::env::var_os("HOME").map(PathBuf::from)));
        let config = ClientConfig::new(cli.api_url.clone())
            .with_app(cli.app)
            .with_mode(cli.mode)
            .with_timeout(Some(timeout));

        Ok(Self {
            client: ApiClient::with_http(
                config,
                Arc::new(FileSessionStore::new(session_path)),
                http,
            ),
        })
    }
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) client: ApiClient,
    pub(crate) app: AppKind,
}

impl AppContext {
    /// Reject commands that belong to the other front end.
    pub(crate) fn require_app(&self, expected: AppKind, group: &str) -> CliResult<()> {
        if self.app == expected {
            Ok(())
        } else {
            Err(CliError::validation(format!(
                "`{group}` commands require --app {expected} (current: {})",
                self.app
            )))
        }
    }
}

/// Session file location under `home`, or relative to the working directory.
#[must_use]
pub(crate) fn default_session_path(home: Option<PathBuf>) -> PathBuf {
    home.unwrap_or_default().join(SESSION_DIR).join(SESSION_FILE)
}

/// Load a JSON request body from disk.
pub(crate) fn read_json_file<T>(path: &Path) -> CliResult<T>
where
    T: DeserializeOwned,
{
    let text = std::fs::read_to_string(path).map_err(|err| {
        CliError::failure(anyhow!("failed to read '{}': {err}", path.display()))
    })?;
    serde_json::from_str(&text).map_err(|err| {
        CliError::validation(format!("invalid JSON payload in '{}': {err}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bizdesk_api_models::{CompanyInput, ErrorBody};
    use std::io::Write;

    fn status_error(status: StatusCode, body: ErrorBody, raw: &str) -> ApiError {
        ApiError::Status {
            path: "/partner/companies".into(),
            status,
            body,
            raw: raw.into(),
        }
    }

    #[test]
    fn unprocessable_entity_is_validation() {
        let err = CliError::from(status_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            ErrorBody {
                error: Some("VALIDATION".into()),
                message: Some("name is required".into()),
            },
            "",
        ));
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.display_message(), "name is required");
    }

    #[test]
    fn server_fault_is_failure_with_raw_text() {
        let err = CliError::from(status_error(
            StatusCode::BAD_GATEWAY,
            ErrorBody::default(),
            "upstream down\n",
        ));
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            err.display_message(),
            "upstream down (status 502 Bad Gateway)"
        );
    }

    #[test]
    fn empty_conflict_body_is_failure() {
        let err = CliError::from(status_error(StatusCode::CONFLICT, ErrorBody::default(), ""));
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("/partner/companies"));
    }

    #[test]
    fn session_path_prefers_home() {
        assert_eq!(
            default_session_path(Some(PathBuf::from("/home/ops"))),
            PathBuf::from("/home/ops/.bizdesk/session.json")
        );
        assert_eq!(
            default_session_path(None),
            PathBuf::from(".bizdesk/session.json")
        );
    }

    #[test]
    fn require_app_names_expected_front_end() {
        let client = ApiClient::new(
            ClientConfig::new("http://api.test"),
            Arc::new(bizdesk_client::MemorySessionStore::new()),
        )
        .expect("client builds");
        let ctx = AppContext {
            client,
            app: AppKind::Client,
        };
        assert!(ctx.require_app(AppKind::Client, "companies").is_ok());
        let err = ctx
            .require_app(AppKind::Admin, "partners")
            .expect_err("client app cannot manage partners");
        assert_eq!(err.exit_code(), 2);
        assert!(err.display_message().contains("--app admin"));
    }

    #[test]
    fn malformed_payload_is_validation() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{\"name\": ").expect("write");
        let err = read_json_file::<CompanyInput>(file.path()).expect_err("truncated JSON");
        assert_eq!(err.exit_code(), 2);

        let missing = read_json_file::<CompanyInput>(Path::new("/nonexistent/payload.json"))
            .expect_err("missing file");
        assert_eq!(missing.exit_code(), 3);
    }
}
