//! HTTP client for the signup endpoint
//!
//! Posts the form as JSON and classifies the response into a success body,
//! a server rejection, or a transport/decoding failure.

use super::error::SignupError;
use super::traits::SignupApi;
use crate::config::TuiConfig;
use crate::state::FormData;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

/// Client for communicating with the signup endpoint
pub struct SignupClient {
    /// The HTTP client
    client: Client,
    /// Full URL of the signup endpoint
    signup_url: String,
}

impl SignupClient {
    /// Create a new signup client from configuration
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self::with_client(client, config.signup_url()))
    }

    /// Create a signup client with a custom HTTP client
    pub fn with_client(client: Client, signup_url: String) -> Self {
        Self { client, signup_url }
    }
}

#[async_trait]
impl SignupApi for SignupClient {
    async fn signup(&self, request: FormData) -> Result<Value, SignupError> {
        tracing::debug!(url = %self.signup_url, ?request, "Sending signup request");

        let response = self
            .client
            .post(&self.signup_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| SignupError::Transport(e.to_string()))?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| SignupError::Decode(e.to_string()))?;

        if status.is_success() {
            return Ok(body);
        }

        let message = body.get("message").and_then(message_text);

        Err(SignupError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// Text for a `message` value, `None` for null, false, zero or an empty string
fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
