//! Environment-driven configuration loading.
//!
//! # Design
//! - `from_lookup` is pure so tests can feed a map instead of mutating the
//!   process environment.
//! - The base URL fails open: a missing value is logged and carried as empty.

use std::time::Duration;

use tracing::warn;

use crate::defaults::{ENV_API_URL, ENV_APP, ENV_CLIENT_MODE, ENV_HTTP_TIMEOUT_SECS};
use crate::error::{ConfigError, ConfigResult};
use crate::model::{AppKind, ClientConfig, ClientMode};

impl ClientConfig {
    /// Load settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when an enum or numeric variable
    /// is present but malformed.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when an enum or numeric variable
    /// is present but malformed.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = lookup(ENV_API_URL)
            .map(|value| value.trim().to_string())
            .unwrap_or_default();
        if api_url.is_empty() {
            warn!(variable = ENV_API_URL, "API base URL is not configured");
        }

        let app = non_empty(lookup(ENV_APP))
            .map(|value| value.parse::<AppKind>())
            .transpose()?
            .unwrap_or_default();
        let mode = non_empty(lookup(ENV_CLIENT_MODE))
            .map(|value| value.parse::<ClientMode>())
            .transpose()?
            .unwrap_or_default();
        let timeout = non_empty(lookup(ENV_HTTP_TIMEOUT_SECS))
            .map(|value| parse_timeout_secs(&value))
            .transpose()?;

        Ok(Self {
            api_url,
            app,
            mode,
            timeout,
        })
    }
}

/// Parse a positive number of seconds into a timeout.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] for non-numeric or zero input.
pub fn parse_timeout_secs(value: &str) -> ConfigResult<Duration> {
    let invalid = |reason| ConfigError::InvalidValue {
        variable: ENV_HTTP_TIMEOUT_SECS,
        value: value.to_string(),
        reason,
    };
    let secs = value
        .trim()
        .parse::<u64>()
        .map_err(|_| invalid("expected a whole number of seconds"))?;
    if secs == 0 {
        return Err(invalid("timeout must be positive"));
    }
    Ok(Duration::from_secs(secs))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|raw| !raw.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn missing_variables_fall_back_to_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).expect("config loads");
        assert_eq!(config, ClientConfig::default());
        assert!(config.api_url.is_empty());
    }

    #[test]
    fn all_variables_are_honoured() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENV_API_URL, " https://api.bizdesk.test "),
            (ENV_APP, "admin"),
            (ENV_CLIENT_MODE, "server"),
            (ENV_HTTP_TIMEOUT_SECS, "15"),
        ]))
        .expect("config loads");
        assert_eq!(config.api_url, "https://api.bizdesk.test");
        assert_eq!(config.app, AppKind::Admin);
        assert_eq!(config.mode, ClientMode::Server);
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn malformed_mode_is_rejected() {
        let err = ClientConfig::from_lookup(lookup_from(&[(ENV_CLIENT_MODE, "batch")]))
            .expect_err("mode must be validated");
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                variable: ENV_CLIENT_MODE,
                ..
            }
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        assert!(parse_timeout_secs("0").is_err());
        assert!(parse_timeout_secs("soon").is_err());
        assert_eq!(parse_timeout_secs("2"), Ok(Duration::from_secs(2)));
    }
}
