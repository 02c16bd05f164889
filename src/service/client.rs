//! HTTP client for the prediction service
//!
//! Posts the validated payload as JSON and folds every possible reply,
//! including transport failures, into a [`SubmitResult`].

use super::PredictionService;
use crate::config::{TuiConfig, SERVICE_URL_ENV};
use crate::state::forms::ValidatedPayload;
use crate::state::{interpret, ErrorInfo, SubmitResult};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;

/// Path of the prediction endpoint relative to the base URL
const PREDICT_PATH: &str = "/api/predict-rating/";

/// Client for the remote prediction endpoint
pub struct HttpPredictionClient {
    http: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpPredictionClient {
    /// Create a client for the service at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint_url(base_url),
            timeout,
        })
    }

    /// Create a client from user configuration
    pub fn from_config(config: &TuiConfig) -> Result<Self> {
        Self::from_config_and_env(config, std::env::var(SERVICE_URL_ENV).ok())
    }

    fn from_config_and_env(config: &TuiConfig, from_env: Option<String>) -> Result<Self> {
        Self::new(
            &config.resolve_service_url(from_env),
            config.request_timeout(),
        )
    }

    fn describe_transport_error(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            format!("Request timed out after {}s", self.timeout.as_secs_f32())
        } else if err.is_connect() {
            format!("Could not connect to {}", self.endpoint)
        } else {
            format!("Request failed: {err}")
        }
    }
}

#[async_trait]
impl PredictionService for HttpPredictionClient {
    async fn predict(&self, payload: &ValidatedPayload) -> SubmitResult {
        tracing::debug!(endpoint = %self.endpoint, "sending prediction request");

        let response = self
            .http
            .post(&self.endpoint)
            .json(payload)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "prediction request failed");
                ErrorInfo::network(self.describe_transport_error(&e))
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to read prediction response");
            ErrorInfo::network(self.describe_transport_error(&e))
        })?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "prediction response received");
        parse_response(status, &body)
    }

    fn endpoint(&self) -> String {
        self.endpoint.clone()
    }
}

/// Join the base URL and the endpoint path without doubling slashes
fn endpoint_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), PREDICT_PATH)
}

/// Turn a raw HTTP reply into a classification or a normalized error
fn parse_response(status: StatusCode, body: &[u8]) -> SubmitResult {
    let value: Value = serde_json::from_slice(body).map_err(|e| {
        ErrorInfo::parse(format!(
            "Response (HTTP {}) is not valid JSON: {e}",
            status.as_u16()
        ))
    })?;

    let Value::Object(mut fields) = value else {
        return Err(ErrorInfo::parse("Response is not a JSON object"));
    };

    match fields.remove("error") {
        None | Some(Value::Null) => {}
        Some(Value::String(message)) => return Err(ErrorInfo::service(message)),
        Some(other) => return Err(ErrorInfo::service(other.to_string())),
    }

    if let Some(raw) = fields.get("predicted_rating") {
        return interpret(raw);
    }

    if status.is_success() {
        Err(ErrorInfo::parse(
            "Response has neither `predicted_rating` nor `error`",
        ))
    } else {
        Err(ErrorInfo::service(format!(
            "Prediction service returned HTTP {}",
            status.as_u16()
        )))
    }
}
