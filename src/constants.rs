//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! To change the default prediction service, only edit this file.

/// Default prediction service URL
///
/// This is the fallback URL when no environment variable is set.
/// The reference service listens on port 5001.
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Request timeout bounds (seconds)
pub const MIN_TIMEOUT_SECS: u64 = 1;
pub const MAX_TIMEOUT_SECS: u64 = 120;

/// How many catalog samples are shown by default
pub const DEFAULT_SAMPLE_LIMIT: usize = 5;

/// Message shown when the service gives us nothing better
pub const GENERIC_PREDICT_ERROR: &str = "Failed to predict rent. Please try again.";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "RentWise";

// ============================================
// Environment variable names
// ============================================

pub const ENV_API_URL: &str = "RENTWISE_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "RENTWISE_TIMEOUT_SECS";
pub const ENV_SAMPLE_LIMIT: &str = "RENTWISE_SAMPLE_LIMIT";
