//! Prediction Module - `POST /predict` request/response pipeline
//!
//! - `types` - response entities and their validation
//! - `session` - submission state machine with last-submitted-wins ordering

pub mod types;
pub mod session;


pub use session::{Dispatch, PredictionSession, RequestToken, SessionHandle, SessionState};
pub use types::{ConfidenceInterval, FeatureSummary, NeighborhoodMatch, PredictionResult};
