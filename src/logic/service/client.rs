//! Prediction Service Client
//!
//! HTTP client for communicating with the rent prediction service.

use std::time::Duration;

use serde::Deserialize;

use super::RentApi;
use crate::config::ClientConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::logic::catalog::{self, NeighborhoodSample};
use crate::logic::features::FeatureVector;
use crate::logic::prediction::PredictionResult;

/// Prediction service client
#[derive(Debug, Clone)]
pub struct RentClient {
    config: ClientConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

/// Error body of a non-2xx response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

impl RentClient {
    /// Create new client
    pub fn new(config: ClientConfig) -> ServiceResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(ServiceError::from_reqwest)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url, path)
    }

    /// Send a request and hand back the body of a 2xx response.
    ///
    /// Non-2xx responses become `ServiceError::Status`, carrying the body's
    /// `error` string when there is one.
    async fn send(&self, request: reqwest::RequestBuilder) -> ServiceResult<Vec<u8>> {
        let response = request.send().await.map_err(ServiceError::from_reqwest)?;
        let status = response.status();

        if status.is_success() {
            let body = response.bytes().await.map_err(ServiceError::from_reqwest)?;
            Ok(body.to_vec())
        } else {
            let body = response.text().await.unwrap_or_default();
            let message = server_message(&body);
            log::debug!("Service answered {} with body: {}", status, body);
            Err(ServiceError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

impl RentApi for RentClient {
    async fn predict(&self, vector: &FeatureVector) -> ServiceResult<PredictionResult> {
        let request = self.http_client.post(self.url("/predict")).json(vector);
        let body = self.send(request).await?;
        PredictionResult::from_slice(&body)
    }

    async fn neighborhoods(&self) -> ServiceResult<Vec<NeighborhoodSample>> {
        let request = self.http_client.get(self.url("/neighborhoods"));
        let body = self.send(request).await?;
        let value = serde_json::from_slice(&body).unwrap_or_else(|e| {
            log::warn!("Neighborhoods response is not JSON ({}), treating as empty", e);
            serde_json::Value::Null
        });
        Ok(catalog::parse_neighborhoods(&value))
    }

    async fn health(&self) -> ServiceResult<HealthResponse> {
        let request = self.http_client.get(self.url("/health"));
        let body = self.send(request).await?;
        serde_json::from_slice(&body).map_err(|e| ServiceError::Malformed(e.to_string()))
    }
}

/// Non-empty `error` string from an error body
fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error)
        .filter(|message| !message.trim().is_empty())
}
