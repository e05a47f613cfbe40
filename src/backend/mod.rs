//! HTTP client for the hosted backend: auth provider, relational query
//! surface and serverless functions.
//!
//! Every call is a single request. There is no retry and no timeout beyond
//! what the underlying [`reqwest::Client`] imposes.

mod auth;
mod functions;
mod rest;

use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::config::BackendConfig;

pub use auth::{AuthSession, BackendUser, SignUpOutcome};

/// Errors from the backend layer. The `Api` message is the backend's own
/// text and is shown to users as-is.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Backend request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("Unexpected backend response: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            BackendError::Request(err) => err.status().map(|s| s.as_u16()),
            BackendError::Decode(_) => None,
        }
    }
}

#[derive(Clone)]
pub struct BackendClient {
    client: reqwest::Client,
    base_url: String,
    anon_key: String,
}

impl BackendClient {
    pub fn new(config: &BackendConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &BackendConfig) -> Self {
        Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            anon_key: config.anon_key.clone(),
        }
    }

    /// Builds a request carrying the public key, authorized either as the
    /// signed-in user or anonymously.
    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .header("apikey", &self.anon_key)
            .bearer_auth(token.unwrap_or(&self.anon_key))
    }

    async fn ensure_success(response: Response) -> Result<Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = match extract_error_message(&body) {
            Some(message) => message,
            None => status
                .canonical_reason()
                .unwrap_or("Unknown server error")
                .to_string(),
        };
        tracing::debug!(status = status.as_u16(), %message, "backend call rejected");
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, BackendError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return serde_json::from_str("null").map_err(|e| BackendError::Decode(e.to_string()));
        }
        serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

/// Pulls the human-readable message out of an error body. Auth, query and
/// function endpoints each use a different field name.
pub fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };

    for key in ["error_description", "msg", "message", "error"] {
        match value.get(key) {
            Some(serde_json::Value::String(text)) if !text.is_empty() => {
                return Some(text.clone());
            }
            Some(serde_json::Value::Object(inner)) => {
                if let Some(serde_json::Value::String(text)) = inner.get("message") {
                    return Some(text.clone());
                }
            }
            _ => {}
        }
    }

    Some(trimmed.to_string())
}
