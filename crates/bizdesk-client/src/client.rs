//! Shared API client and request pipeline.
//!
//! # Design
//! - Create exactly one client per application and clone it freely; clones
//!   share the HTTP pool, session store and event channel.
//! - The base URL is used verbatim. An empty or malformed value surfaces as
//!   [`ApiError::Transport`] on the first call rather than at construction.
//! - Every call runs the same pipeline: authorize, send, read, classify,
//!   inspect, decode. [`ApiClient::execute`] stops before decoding.

use std::sync::Arc;

use bizdesk_api_models::ErrorBody;
use bizdesk_config::ClientConfig;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::events::{SessionEvent, SessionEvents};
use crate::interceptors::{ResponseInspector, authorize};
use crate::session::{Session, SessionStore};

/// Authenticated REST client bound to one backend.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<Inner>,
}

struct Inner {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn SessionStore>,
    events: SessionEvents,
    inspector: ResponseInspector,
}

impl ApiClient {
    /// Build a client with its own HTTP pool.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Setup`] if the HTTP stack cannot be initialised.
    pub fn new(config: ClientConfig, store: Arc<dyn SessionStore>) -> ApiResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|source| ApiError::Setup { source })?;
        Ok(Self::with_http(config, store, http))
    }

    /// Build a client around a preconfigured HTTP pool (default headers, proxies).
    ///
    /// `config.timeout` is not applied here; configure it on `http`.
    #[must_use]
    pub fn with_http(
        config: ClientConfig,
        store: Arc<dyn SessionStore>,
        http: reqwest::Client,
    ) -> Self {
        let events = SessionEvents::new();
        let inspector = ResponseInspector::new(Arc::clone(&store), events.clone());
        debug!(
            api_url = %config.api_url,
            app = config.app.as_str(),
            mode = config.mode.as_str(),
            "api client constructed"
        );
        Self {
            inner: Arc::new(Inner {
                http,
                config,
                store,
                events,
                inspector,
            }),
        }
    }

    /// Settings the client was built with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Credential view over the client's session store.
    #[must_use]
    pub fn session(&self) -> Session<'_> {
        Session::new(self.inner.store.as_ref())
    }

    /// Subscribe to session lifecycle events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Absolute URL for a backend path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.config.api_url.trim_end_matches('/'), path)
    }

    /// Start a request with credentials already attached.
    #[must_use]
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.inner.http.request(method, self.url(path));
        authorize(builder, self.inner.config.mode, self.inner.store.as_ref())
    }

    /// Send a prepared request through the failure inspector and decode the payload.
    ///
    /// An empty success body decodes as JSON `null`.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] produced by transport, status, or decoding.
    pub async fn send<T>(&self, path: &str, builder: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let result = Self::dispatch(path, builder).await;
        if let Err(err) = &result {
            self.inner.inspector.inspect(err);
        }
        result
    }

    /// Send a prepared request through the failure inspector, ignoring the
    /// success body. Returns the success status.
    ///
    /// # Errors
    ///
    /// Returns the [`ApiError`] produced by transport or status.
    pub async fn execute(&self, path: &str, builder: RequestBuilder) -> ApiResult<StatusCode> {
        let result = Self::fetch(path, builder).await.map(|(status, _)| status);
        if let Err(err) = &result {
            self.inner.inspector.inspect(err);
        }
        result
    }

    /// `GET path` with no query string.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.send(path, self.request(Method::GET, path)).await
    }

    /// `GET path?query`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn get_with<T, Q>(&self, path: &str, query: &Q) -> ApiResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::GET, path).query(query))
            .await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn post<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::POST, path).json(body))
            .await
    }

    /// `PATCH path` with a JSON body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> ApiResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(path, self.request(Method::PATCH, path).json(body))
            .await
    }

    /// `PATCH path` without a body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn patch_empty<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.send(path, self.request(Method::PATCH, path)).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::send`].
    pub async fn delete<T>(&self, path: &str) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        self.send(path, self.request(Method::DELETE, path)).await
    }

    async fn dispatch<T>(path: &str, builder: RequestBuilder) -> ApiResult<T>
    where
        T: DeserializeOwned,
    {
        let (_, body) = Self::fetch(path, builder).await?;
        decode(path, &body)
    }

    async fn fetch(
        path: &str,
        builder: RequestBuilder,
    ) -> ApiResult<(StatusCode, Vec<u8>)> {
        let transport = |source| ApiError::Transport {
            path: path.to_string(),
            source,
        };
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport)?;
        debug!(path, status = status.as_u16(), bytes = bytes.len(), "response received");

        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status,
                body: serde_json::from_slice::<ErrorBody>(&bytes).unwrap_or_default(),
                raw: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        Ok((status, bytes.to_vec()))
    }
}

fn decode<T>(path: &str, bytes: &[u8]) -> ApiResult<T>
where
    T: DeserializeOwned,
{
    let payload: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) {
        b"null"
    } else {
        bytes
    };
    serde_json::from_slice(payload).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}
