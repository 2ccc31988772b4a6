//! Environment variable names and fallback values.
//!
//! # Design
//! - Keep every variable name in one place so the CLI and library agree.
//! - The base URL has no fallback; an unset value is carried through as empty.

/// Base endpoint of the REST backend.
pub const ENV_API_URL: &str = "BIZDESK_API_URL";
/// Front end the process acts as (`admin` or `client`).
pub const ENV_APP: &str = "BIZDESK_APP";
/// Execution context (`interactive` or `server`).
pub const ENV_CLIENT_MODE: &str = "BIZDESK_CLIENT_MODE";
/// Optional whole-request timeout in seconds.
pub const ENV_HTTP_TIMEOUT_SECS: &str = "BIZDESK_HTTP_TIMEOUT_SECS";
