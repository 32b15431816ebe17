//! Logic Module - Core pipeline
//!
//! - `features/` - form input normalization into the feature vector
//! - `prediction/` - submission state machine and response validation
//! - `catalog` - best-effort sample neighborhood list
//! - `service/` - HTTP access to the prediction service

pub mod features;
pub mod prediction;
pub mod catalog;
pub mod service;
