//! HTTP client for the Home Assistant REST API.
//!
//! Every call is a single attempt with a fixed timeout. There is no retry and
//! no caching; failures are returned to the caller as [`UpstreamError`].

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use crate::error::{Result, UpstreamError};
use crate::service::ServiceCall;
use crate::settings::Settings;

/// Timeout applied to every upstream request.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Path of the Home Assistant API root, used as a connectivity check.
pub const API_ROOT_PATH: &str = "/api/";

/// A successful (2xx) reply from Home Assistant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamReply {
    /// Status code.
    pub status: u16,
    /// Raw response body, unparsed.
    pub body: String,
}

impl UpstreamReply {
    /// Parse the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the parse error if the body is not valid JSON.
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}

/// Interface to Home Assistant used by the gateway.
///
/// This trait abstracts the HTTP client, allowing for mock implementations
/// in tests.
#[async_trait]
pub trait HomeAssistant: Send + Sync {
    /// Perform one request against `path` (which must start with `/`).
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError::Status`] on a non-2xx reply and
    /// [`UpstreamError::Transport`] if no reply was obtained.
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<UpstreamReply>;

    /// `GET /api/`.
    ///
    /// # Errors
    ///
    /// See [`HomeAssistant::call`].
    async fn api_root(&self) -> Result<UpstreamReply> {
        self.call(Method::GET, API_ROOT_PATH, None).await
    }

    /// `POST /api/services/<domain>/<service>`.
    ///
    /// # Errors
    ///
    /// See [`HomeAssistant::call`].
    async fn call_service(&self, call: &ServiceCall) -> Result<UpstreamReply> {
        let body = call.body();
        self.call(Method::POST, &call.path(), Some(&body)).await
    }
}

/// reqwest-backed [`HomeAssistant`] client.
#[derive(Debug, Clone)]
pub struct HttpHomeAssistant {
    client: reqwest::Client,
    settings: Settings,
}

impl HttpHomeAssistant {
    /// Create a client with the standard [`UPSTREAM_TIMEOUT`].
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self::with_timeout(settings, UPSTREAM_TIMEOUT)
    }

    /// Create a client with a custom timeout.
    ///
    /// Redirects are not followed; a 3xx reply is returned as
    /// [`UpstreamError::Status`].
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created.
    #[must_use]
    pub fn with_timeout(settings: Settings, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .expect("Failed to create HTTP client");

        Self { client, settings }
    }

    /// Create a client with a custom reqwest client.
    #[must_use]
    pub fn with_client(client: reqwest::Client, settings: Settings) -> Self {
        Self { client, settings }
    }

    /// The settings this client was built with.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[async_trait]
impl HomeAssistant for HttpHomeAssistant {
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<UpstreamReply> {
        let url = self.settings.url(path);
        let started = Instant::now();

        let mut request = self
            .client
            .request(method.clone(), &url)
            .bearer_auth(self.settings.token());
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let err = UpstreamError::transport(&e);
            tracing::error!(%method, path, error = %err, "Upstream request failed");
            err
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| {
            let err = UpstreamError::transport(&e);
            tracing::error!(%method, path, error = %err, "Failed to read upstream response");
            err
        })?;

        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        if status.is_success() {
            tracing::debug!(
                %method,
                path,
                status = status.as_u16(),
                elapsed_ms,
                "Upstream call succeeded"
            );
            Ok(UpstreamReply {
                status: status.as_u16(),
                body: text,
            })
        } else {
            tracing::warn!(
                %method,
                path,
                status = status.as_u16(),
                elapsed_ms,
                "Upstream returned error status"
            );
            Err(UpstreamError::Status {
                status: status.as_u16(),
                body: text,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_creation() {
        let settings = Settings::new("http://localhost:8123", "token").unwrap();
        let client = HttpHomeAssistant::new(settings);
        assert_eq!(client.settings().base_url(), "http://localhost:8123");
    }

    #[test]
    fn reply_json() {
        let reply = UpstreamReply {
            status: 200,
            body: r#"{"message":"API running."}"#.to_string(),
        };
        assert_eq!(reply.json().unwrap()["message"], "API running.");

        let raw = UpstreamReply {
            status: 200,
            body: "not json".to_string(),
        };
        assert!(raw.json().is_err());
    }
}
