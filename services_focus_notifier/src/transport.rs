//! Outbound notification transport

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Default peer endpoint for focus notifications
pub const DEFAULT_NOTIFY_ENDPOINT: &str = "http://127.0.0.1:7912/whatsinput";

/// Content type of every notification body
pub const NOTIFY_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Notification error types
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP notification failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Notification transport failed: {0}")]
    Transport(String),
}

/// Notification settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Full URL the notifications are posted to
    pub endpoint: String,
    /// Request timeout; `None` keeps the transport default
    pub timeout_ms: Option<u64>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_NOTIFY_ENDPOINT.to_string(),
            timeout_ms: None,
        }
    }
}

/// Delivers one notification body to the peer
///
/// Returns the peer's status code. Any status counts as delivered; the
/// caller decides what, if anything, to make of it.
#[async_trait]
pub trait NotifyTransport: Send + Sync {
    async fn post(&self, body: String) -> Result<u16, NotifyError>;
}

/// HTTP transport posting plain-text bodies
#[derive(Debug, Clone)]
pub struct HttpNotifyTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpNotifyTransport {
    /// Builds a transport from settings
    pub fn new(config: &NotifyConfig) -> Result<Self, NotifyError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = config.timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Returns the endpoint notifications are posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl NotifyTransport for HttpNotifyTransport {
    async fn post(&self, body: String) -> Result<u16, NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, NOTIFY_CONTENT_TYPE)
            .body(body)
            .send()
            .await?;
        Ok(response.status().as_u16())
    }
}
