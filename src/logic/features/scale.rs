//! Inverted safety scale.
//!
//! The user edits a safety rating (higher is safer); the service expects a
//! crime rate (higher is worse). `displayed = 11 - stored` in both directions.

use super::layout::round_to;

pub const SAFETY_PIVOT: f64 = 11.0;

/// Displayed safety rating -> transmitted crime rate
pub fn to_stored(displayed: f64) -> f64 {
    round_to(SAFETY_PIVOT - displayed, 1)
}

/// Transmitted crime rate -> displayed safety rating
pub fn to_displayed(stored: f64) -> f64 {
    round_to(SAFETY_PIVOT - stored, 1)
}
