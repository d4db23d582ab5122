//! Client for the sketch-to-image generation server.
//!
//! The server exposes two routes:
//!
//! - `POST /generate` with `{"sketch": "<base64 PNG>"}`, answering
//!   `{"generated_image": "<base64 PNG>"}` or `{"error": "<message>"}`.
//! - `GET /health`, answering `{"status": "ok", ...}`.
//!
//! Each call is a single attempt; there is no retry.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sketch_core::GeneratedImage;
use thiserror::Error;
use url::Url;

/// Default generation server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Errors that can occur when talking to the generation server.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The configured base URL is invalid.
    #[error("invalid generation server URL: {0}")]
    InvalidUrl(String),
    /// Transport failed (unreachable host, connection reset, timeout).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// The server answered with a non-2xx status.
    #[error("server error {status}: {body}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },
    /// The server reported a logical error in a 2xx response.
    #[error("{0}")]
    Application(String),
    /// A 2xx response did not have the expected shape.
    #[error("unexpected response: {0}")]
    Protocol(String),
}

/// Configuration for [`GenerationClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. `http://localhost:5001`.
    pub base_url: String,
    /// Request timeout. `None` keeps the HTTP client default.
    pub timeout: Option<Duration>,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            user_agent: format!("sketch2img/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointing at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Something that turns a sketch PNG into a generated image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Submit one sketch and wait for the generated image.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is unusable.
    async fn generate(&self, sketch_png: &[u8]) -> Result<GeneratedImage, ClientError>;
}

/// Health report from `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    /// `"ok"` when the server is ready.
    pub status: String,
    /// Generator model name.
    #[serde(default)]
    pub model: Option<String>,
    /// Model input channels.
    #[serde(default)]
    pub n_channels: Option<u32>,
    /// Model output channels.
    #[serde(default)]
    pub n_classes: Option<u32>,
}

impl HealthStatus {
    /// Whether the server reports itself ready.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    sketch: &'a str,
}

/// HTTP client for the generation server.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: Client,
    base_url: Url,
}

impl GenerationClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if the URL is malformed or not HTTP(S).
    /// Returns [`ClientError::Network`] if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url =
            Url::parse(&config.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "unsupported scheme: {}",
                base_url.scheme()
            )));
        }

        let mut builder = Client::builder()
            .user_agent(config.user_agent.clone())
            // Disable proxy detection to avoid macOS system-configuration panic
            .no_proxy();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    /// The configured base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a route below the base URL, keeping any base path prefix.
    fn endpoint(&self, route: &str) -> Url {
        let mut url = self.base_url.clone();
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{prefix}/{route}"));
        url
    }

    /// Submit a sketch PNG for generation.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Network`] on transport failure.
    /// - [`ClientError::Server`] on a non-2xx status.
    /// - [`ClientError::Application`] if the body carries an `error` field.
    /// - [`ClientError::Protocol`] if the body has no `generated_image`.
    pub async fn generate_image(&self, sketch_png: &[u8]) -> Result<GeneratedImage, ClientError> {
        let sketch = base64::engine::general_purpose::STANDARD.encode(sketch_png);
        let url = self.endpoint("generate");
        tracing::info!("Submitting sketch ({} bytes) to {url}", sketch_png.len());

        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&GenerateRequest { sketch: &sketch })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::warn!("Generation server returned {status}");
            return Err(ClientError::Server {
                status: status.as_u16(),
                body,
            });
        }

        Self::parse_generate_body(&body)
    }

    /// Interpret a 2xx body. A non-null `error` wins over everything else,
    /// whatever shape the rest of the body has.
    fn parse_generate_body(body: &str) -> Result<GeneratedImage, ClientError> {
        let parsed: Value = serde_json::from_str(body)
            .map_err(|e| ClientError::Protocol(format!("invalid JSON body: {e}")))?;

        match parsed.get("error") {
            None | Some(Value::Null) => {}
            Some(Value::String(message)) => return Err(ClientError::Application(message.clone())),
            Some(other) => return Err(ClientError::Application(other.to_string())),
        }

        match parsed.get("generated_image") {
            Some(Value::String(image)) => Ok(GeneratedImage::from_base64(image)),
            None | Some(Value::Null) => Err(ClientError::Protocol("no image in response".to_string())),
            Some(other) => Err(ClientError::Protocol(format!(
                "generated_image is not a string: {other}"
            ))),
        }
    }

    /// Probe the server health route.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the status is non-2xx, or the
    /// body is not a health report.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self
            .http
            .get(self.endpoint("health"))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ClientError::Server {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body)
            .map_err(|e| ClientError::Protocol(format!("invalid health report: {e}")))
    }
}

#[async_trait]
impl ImageGenerator for GenerationClient {
    async fn generate(&self, sketch_png: &[u8]) -> Result<GeneratedImage, ClientError> {
        self.generate_image(sketch_png).await
    }
}
