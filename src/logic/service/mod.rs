//! Service Module - Prediction service access
//!
//! This module handles:
//! - The `RentApi` seam the session and catalog are driven through
//! - The reqwest-backed `RentClient` speaking the service's HTTP contract

pub mod client;

pub use client::{HealthResponse, RentClient};

use std::future::Future;

use crate::error::{ServiceError, ServiceResult};
use crate::logic::catalog::NeighborhoodSample;
use crate::logic::features::FeatureVector;
use crate::logic::prediction::PredictionResult;

/// Operations the prediction service offers
pub trait RentApi {
    /// `POST /predict`
    fn predict(
        &self,
        vector: &FeatureVector,
    ) -> impl Future<Output = ServiceResult<PredictionResult>> + Send;

    /// `GET /neighborhoods`
    fn neighborhoods(&self) -> impl Future<Output = ServiceResult<Vec<NeighborhoodSample>>> + Send;

    /// `GET /health`
    fn health(&self) -> impl Future<Output = ServiceResult<HealthResponse>> + Send {
        async { Err(ServiceError::Network("health check not supported".to_string())) }
    }
}
