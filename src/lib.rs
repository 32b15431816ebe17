//! RentWise client
//!
//! Collects property-search preferences, normalizes them into a feature
//! vector, submits it to a remote rent prediction service and exposes the
//! estimate and comparable neighborhoods for display.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     RENTWISE CLIENT                      │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────────┐   snapshot   ┌────────────────────┐    │
//! │  │ FeatureForm  │ ───────────▶ │ PredictionSession  │    │
//! │  │ Model        │              │ (state machine)    │    │
//! │  └──────────────┘              └─────────┬──────────┘    │
//! │  ┌──────────────┐                        │               │
//! │  │ Neighborhood │◀───── RentApi ─────────┤               │
//! │  │ Catalog      │       (reqwest)        ▼               │
//! │  └──────────────┘              POST /predict             │
//! │                                GET  /neighborhoods       │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod logic;

#[cfg(test)]
pub(crate) mod testing;

pub use config::ClientConfig;
pub use error::{FormError, ServiceError, ServiceResult};
