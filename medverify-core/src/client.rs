//! HTTP client for the Med-Verify verification service
//!
//! Provides a `VerificationBackend` trait with one production implementation:
//! - **HttpVerificationClient** — `POST {input}` to the check endpoint and
//!   decode the verdict JSON
//!
//! The coordinator only sees the trait, so tests can script a backend without
//! a socket.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::RetryIf;

use crate::config::ServiceConfig;
use crate::models::{VerificationRequest, VerificationResult};

// ============================================================================
// VerificationBackend trait
// ============================================================================

/// Abstraction over whatever answers a verification request.
#[async_trait]
pub trait VerificationBackend: Send + Sync {
    /// Run one verification round trip.
    async fn check(&self, request: &VerificationRequest) -> Result<VerificationResult, ClientError>;

    /// Backend name for logging.
    fn name(&self) -> &str;
}

// ============================================================================
// Error types
// ============================================================================

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Service error ({code}): {message}")]
    Status { code: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl ClientError {
    /// Transport failures and 5xx answers may succeed on a second try;
    /// 4xx and undecodable bodies will not.
    fn is_transient(&self) -> bool {
        match self {
            ClientError::Http(_) => true,
            ClientError::Status { code, .. } => *code >= 500,
            ClientError::Decode(_) | ClientError::InvalidEndpoint { .. } => false,
        }
    }
}

/// Error body shape of the service: `{"error": "...", "details": "..."}`.
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: Option<String>,
    details: Option<String>,
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ServiceErrorBody>(body) {
        Ok(ServiceErrorBody {
            error: Some(error),
            details: Some(details),
        }) => format!("{}: {}", error, details),
        Ok(ServiceErrorBody {
            error: Some(error),
            details: None,
        }) => error,
        _ => body.to_string(),
    }
}

// ============================================================================
// HttpVerificationClient
// ============================================================================

#[derive(Debug, Clone)]
pub struct HttpVerificationClient {
    client: Client,
    endpoint: String,
    root_url: Url,
    max_retries: usize,
    retry_delay_ms: u64,
}

impl HttpVerificationClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ClientError> {
        let root_url = config.root_url()?;
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: config.endpoint.clone(),
            root_url,
            max_retries: config.max_retries,
            retry_delay_ms: config.retry_delay_ms,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn root_url(&self) -> &Url {
        &self.root_url
    }

    /// Verify with the configured retry policy. With `max_retries = 0` this
    /// sends exactly one request.
    pub async fn check_with_retry(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, ClientError> {
        let retry_strategy = ExponentialBackoff::from_millis(self.retry_delay_ms)
            .max_delay(Duration::from_secs(10))
            .map(jitter)
            .take(self.max_retries);

        let result = RetryIf::start(
            retry_strategy,
            || self.check_once(request),
            |e: &ClientError| e.is_transient(),
        )
        .await;

        if let Err(e) = &result {
            tracing::debug!(
                endpoint = %self.endpoint,
                retries = self.max_retries,
                error = %e,
                "Verification request failed"
            );
        }
        result
    }

    async fn check_once(
        &self,
        request: &VerificationRequest,
    ) -> Result<VerificationResult, ClientError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(&body);
            tracing::warn!(code = status.as_u16(), message = %message, "Verification service error");
            return Err(ClientError::Status {
                code: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// `GET /` on the service root; returns the greeting text.
    pub async fn ping(&self) -> Result<String, ClientError> {
        let response = self.client.get(self.root_url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                code: status.as_u16(),
                message: error_message(&body),
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl VerificationBackend for HttpVerificationClient {
    async fn check(&self, request: &VerificationRequest) -> Result<VerificationResult, ClientError> {
        self.check_with_retry(request).await
    }

    fn name(&self) -> &str {
        "http"
    }
}

// ============================================================================
// TESTS
// ============================================================================
