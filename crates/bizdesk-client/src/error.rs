//! Error types and status classification for API calls.
//!
//! # Design
//! - Classification is derived from the HTTP status and the body's `error` tag only.
//! - Classifying never alters the error; callers always get the value the transport produced.

use bizdesk_api_models::{ERROR_TAG_INVALID_TOKEN, ERROR_TAG_TOKEN_EXPIRED, ErrorBody};
use reqwest::StatusCode;
use thiserror::Error;

/// Result alias for API calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure surfaced by [`crate::ApiClient`] and every service function.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The underlying HTTP client could not be constructed.
    #[error("failed to build HTTP client")]
    Setup {
        /// Builder error from the HTTP stack.
        #[source]
        source: reqwest::Error,
    },
    /// The request never produced a response (bad base URL, DNS, connect, timeout).
    #[error("request to {path} failed")]
    Transport {
        /// Request path relative to the base endpoint.
        path: String,
        /// Transport error from the HTTP stack.
        #[source]
        source: reqwest::Error,
    },
    /// The backend answered with a non-success status.
    #[error("request to {path} returned {status}")]
    Status {
        /// Request path relative to the base endpoint.
        path: String,
        /// Response status code.
        status: StatusCode,
        /// Leniently decoded failure body; empty when the body was not JSON.
        body: ErrorBody,
        /// Raw response body text.
        raw: String,
    },
    /// A success response carried a payload of the wrong shape.
    #[error("failed to decode response from {path}")]
    Decode {
        /// Request path relative to the base endpoint.
        path: String,
        /// Decoding error.
        #[source]
        source: serde_json::Error,
    },
}

/// Recognised reasons a backend rejects a bearer credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthFailure {
    /// Token was malformed, revoked, or signed by another issuer.
    InvalidToken,
    /// Token lifetime elapsed.
    TokenExpired,
}

impl AuthFailure {
    /// Match a backend error tag.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            ERROR_TAG_INVALID_TOKEN => Some(Self::InvalidToken),
            ERROR_TAG_TOKEN_EXPIRED => Some(Self::TokenExpired),
            _ => None,
        }
    }

    /// Backend error tag for this failure.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidToken => ERROR_TAG_INVALID_TOKEN,
            Self::TokenExpired => ERROR_TAG_TOKEN_EXPIRED,
        }
    }
}

/// Coarse failure classes used by the response interceptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// 401 carrying a recognised token error tag.
    SessionInvalid(AuthFailure),
    /// 403.
    Forbidden,
    /// Any 5xx.
    ServerFault,
    /// Transport errors, decode errors, untagged 401s and remaining 4xx.
    Other,
}

/// Classify a failed response.
#[must_use]
pub fn classify(status: StatusCode, body: &ErrorBody) -> ErrorClass {
    if status == StatusCode::UNAUTHORIZED {
        return body
            .error
            .as_deref()
            .and_then(AuthFailure::from_tag)
            .map_or(ErrorClass::Other, ErrorClass::SessionInvalid);
    }
    if status == StatusCode::FORBIDDEN {
        return ErrorClass::Forbidden;
    }
    if status.is_server_error() {
        return ErrorClass::ServerFault;
    }
    ErrorClass::Other
}

impl ApiError {
    /// Failure class used for interceptor decisions.
    #[must_use]
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Status { status, body, .. } => classify(*status, body),
            Self::Setup { .. } | Self::Transport { .. } | Self::Decode { .. } => ErrorClass::Other,
        }
    }

    /// Response status, when the backend answered.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoded failure body, when the backend answered.
    #[must_use]
    pub const fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Human-readable message supplied by the backend.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        self.body()
            .and_then(|body| body.message.as_deref())
            .filter(|message| !message.trim().is_empty())
    }

    /// Request path the error belongs to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Setup { .. } => "",
            Self::Transport { path, .. } | Self::Status { path, .. } | Self::Decode { path, .. } => {
                path
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: &str) -> ErrorBody {
        ErrorBody {
            error: Some(tag.to_string()),
            message: None,
        }
    }

    #[test]
    fn tagged_unauthorized_is_session_invalid() {
        assert_eq!(
            classify(StatusCode::UNAUTHORIZED, &tagged("TOKEN_EXPIRED")),
            ErrorClass::SessionInvalid(AuthFailure::TokenExpired)
        );
        assert_eq!(
            classify(StatusCode::UNAUTHORIZED, &tagged("INVALID_TOKEN")),
            ErrorClass::SessionInvalid(AuthFailure::InvalidToken)
        );
    }

    #[test]
    fn untagged_unauthorized_is_other() {
        assert_eq!(
            classify(StatusCode::UNAUTHORIZED, &ErrorBody::default()),
            ErrorClass::Other
        );
        assert_eq!(
            classify(StatusCode::UNAUTHORIZED, &tagged("WRONG_PASSWORD")),
            ErrorClass::Other
        );
    }

    #[test]
    fn token_tags_only_matter_on_unauthorized() {
        assert_eq!(
            classify(StatusCode::FORBIDDEN, &tagged("TOKEN_EXPIRED")),
            ErrorClass::Forbidden
        );
        assert_eq!(
            classify(StatusCode::BAD_REQUEST, &tagged("TOKEN_EXPIRED")),
            ErrorClass::Other
        );
    }

    #[test]
    fn server_statuses_are_faults() {
        for status in [
            StatusCode::INTERNAL_SERVER_ERROR,
            StatusCode::BAD_GATEWAY,
            StatusCode::SERVICE_UNAVAILABLE,
        ] {
            assert_eq!(classify(status, &ErrorBody::default()), ErrorClass::ServerFault);
        }
        assert_eq!(
            classify(StatusCode::NOT_FOUND, &ErrorBody::default()),
            ErrorClass::Other
        );
    }

    #[test]
    fn server_message_skips_blank_values() {
        let err = ApiError::Status {
            path: "/partner/vendors".into(),
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: ErrorBody {
                error: None,
                message: Some("  ".into()),
            },
            raw: String::new(),
        };
        assert!(err.server_message().is_none());
        assert_eq!(err.path(), "/partner/vendors");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
