//! Resilient HTTP client
//!
//! Wraps a [`Transport`] with a per-attempt timeout and a bounded, fixed-delay
//! retry loop. Only timeouts, transport failures and 5xx responses are
//! retried; 4xx responses surface immediately.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::BackendConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(serde_json::Value),
    /// One file part plus plain text parts
    Multipart {
        file_field: String,
        file_name: String,
        file_bytes: Vec<u8>,
        text_fields: Vec<(String, String)>,
    },
}

/// A call against the backend, relative to its base URL
#[derive(Debug, Clone)]
pub struct BackendRequest {
    pub method: Method,
    pub path: String,
    pub body: RequestBody,
}

impl BackendRequest {
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::Get,
            path: path.to_string(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_json<T: Serialize>(path: &str, body: &T) -> Result<Self, NetworkError> {
        let value = serde_json::to_value(body)
            .map_err(|e| NetworkError::Transport(format!("Failed to encode request: {}", e)))?;
        Ok(Self {
            method: Method::Post,
            path: path.to_string(),
            body: RequestBody::Json(value),
        })
    }
}

#[derive(Debug, Clone)]
pub struct BackendResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl BackendResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Message for a failed response: the body's `error` string when present,
    /// otherwise the status line.
    pub fn error_message(&self) -> String {
        serde_json::from_slice::<serde_json::Value>(&self.body)
            .ok()
            .and_then(|body| {
                body.get("error")
                    .and_then(|error| error.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| format!("HTTP error {}: {}", self.status, self.status_text))
    }
}

/// Terminal failure of a backend call
#[derive(Debug, Clone, Error, PartialEq)]
pub enum NetworkError {
    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("{message}")]
    Client { status: u16, message: String },

    #[error("Network error: {0}")]
    Transport(String),
}

impl NetworkError {
    pub fn from_response(response: &BackendResponse) -> Self {
        let message = response.error_message();
        if response.status >= 500 {
            NetworkError::Server {
                status: response.status,
                message,
            }
        } else {
            NetworkError::Client {
                status: response.status,
                message,
            }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Server { status, .. } | NetworkError::Client { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn is_retryable(&self) -> bool {
        !matches!(self, NetworkError::Client { .. })
    }

    /// Operator-facing text for a failure during `operation`
    /// (e.g. "creating customer in RFMS").
    pub fn user_message(&self, operation: &str) -> String {
        match self {
            NetworkError::Timeout => format!(
                "Request timed out while {}. Please check your connection and try again.",
                operation
            ),
            NetworkError::Client { status: 401 | 403, .. } => {
                format!("Authentication failed while {}. Please log in again.", operation)
            }
            NetworkError::Client { status: 404, .. } => {
                format!("Resource not found while {}.", operation)
            }
            NetworkError::Server { .. } => {
                format!("Server error while {}. Please try again later.", operation)
            }
            other => other.to_string(),
        }
    }
}

/// Sends one request. Implementations must not retry on their own.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &BackendRequest) -> Result<BackendResponse, NetworkError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    /// Retries after the first attempt
    pub max_retries: u32,
    pub delay: Duration,
}

impl From<&BackendConfig> for RetryPolicy {
    fn from(config: &BackendConfig) -> Self {
        Self {
            timeout: config.timeout(),
            max_retries: config.retry_attempts,
            delay: config.retry_delay(),
        }
    }
}

pub struct ResilientClient {
    transport: Arc<dyn Transport>,
    policy: RetryPolicy,
}

impl ResilientClient {
    pub fn new(transport: Arc<dyn Transport>, policy: RetryPolicy) -> Self {
        Self { transport, policy }
    }

    /// Perform `request`, retrying retryable failures up to the policy ceiling.
    /// Returns a 2xx response or the last error unchanged.
    pub async fn call(&self, request: &BackendRequest) -> Result<BackendResponse, NetworkError> {
        let span = tracing::info_span!(
            "backend_call",
            request_id = %Uuid::new_v4(),
            path = %request.path
        );
        self.call_with_retries(request).instrument(span).await
    }

    async fn call_with_retries(
        &self,
        request: &BackendRequest,
    ) -> Result<BackendResponse, NetworkError> {
        let mut retries = 0u32;

        loop {
            match self.attempt(request).await {
                Ok(response) => {
                    tracing::debug!(status = response.status, retries, "Backend call succeeded");
                    return Ok(response);
                }
                Err(err) if err.is_retryable() && retries < self.policy.max_retries => {
                    retries += 1;
                    tracing::warn!(
                        error = %err,
                        "Retrying request ({}/{})",
                        retries,
                        self.policy.max_retries
                    );
                    tokio::time::sleep(self.policy.delay).await;
                }
                Err(err) => {
                    tracing::error!(status = ?err.status(), error = %err, "Backend call failed");
                    return Err(err);
                }
            }
        }
    }

    async fn attempt(&self, request: &BackendRequest) -> Result<BackendResponse, NetworkError> {
        let response = tokio::time::timeout(self.policy.timeout, self.transport.send(request))
            .await
            .map_err(|_| NetworkError::Timeout)??;

        if response.is_success() {
            Ok(response)
        } else {
            Err(NetworkError::from_response(&response))
        }
    }
}
