//! Prediction response types.
//!
//! Parsing is lenient about optional parts and strict about the one required
//! field: a body without a positive `predicted_rent` is malformed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ServiceError, ServiceResult};
use crate::logic::features::scale;

/// Slack when comparing bounds to a rent the service rounds to paise
const ROUNDING_TOLERANCE: f64 = 0.005;

/// Lower/upper bound around the prediction (95% by convention)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Non-negative, finite, and enclosing `predicted` up to its rounding
    pub fn is_consistent_with(&self, predicted: f64) -> bool {
        self.lower.is_finite()
            && self.upper.is_finite()
            && self.lower >= 0.0
            && self.lower <= predicted + ROUNDING_TOLERANCE
            && predicted <= self.upper + ROUNDING_TOLERANCE
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Feature columns the service reports for a neighborhood or echoes back.
/// Every column is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    #[serde(default)]
    pub distance_to_downtown: Option<f64>,
    #[serde(default)]
    pub transit_score: Option<f64>,
    #[serde(default)]
    pub crime_rate: Option<f64>,
    #[serde(default)]
    pub amenities_count: Option<f64>,
    #[serde(default)]
    pub family_type: Option<String>,
    #[serde(default)]
    pub people_count: Option<f64>,
    #[serde(default)]
    pub rooms_required: Option<f64>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub has_children: Option<bool>,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub parking_required: Option<bool>,
    #[serde(default)]
    pub furnished_type: Option<String>,
}

impl FeatureSummary {
    /// Safety rating for display, when the crime rate is known
    pub fn safety(&self) -> Option<f64> {
        self.crime_rate.map(scale::to_displayed)
    }
}

/// A comparable neighborhood returned with a prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodMatch {
    pub neighborhood: String,
    pub rent: f64,
    #[serde(default)]
    pub features: FeatureSummary,
}

/// A successful prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_rent: f64,
    pub confidence_interval: Option<ConfidenceInterval>,
    pub similar_neighborhoods: Vec<NeighborhoodMatch>,
    /// Features the service says it used
    pub input_features: Option<FeatureSummary>,
}

impl PredictionResult {
    /// Result with just the required field
    pub fn new(predicted_rent: f64) -> Self {
        Self {
            predicted_rent,
            confidence_interval: None,
            similar_neighborhoods: Vec::new(),
            input_features: None,
        }
    }

    /// Parse a 2xx response body
    pub fn from_slice(body: &[u8]) -> ServiceResult<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ServiceError::Malformed(e.to_string()))?;
        Self::from_json(&value)
    }

    /// Validate and map a decoded response body
    pub fn from_json(body: &Value) -> ServiceResult<Self> {
        let predicted_rent = body
            .get("predicted_rent")
            .and_then(Value::as_f64)
            .filter(|rent| rent.is_finite() && *rent > 0.0)
            .ok_or_else(|| {
                ServiceError::Malformed("missing or non-positive predicted_rent".to_string())
            })?;

        let confidence_interval = present(body, "confidence_interval")
            .and_then(|raw| serde_json::from_value::<ConfidenceInterval>(raw.clone()).ok())
            .filter(|interval| {
                let ok = interval.is_consistent_with(predicted_rent);
                if !ok {
                    log::warn!(
                        "Dropping inconsistent confidence interval [{}, {}] for {}",
                        interval.lower,
                        interval.upper,
                        predicted_rent
                    );
                }
                ok
            });

        let similar_neighborhoods = match present(body, "similar_neighborhoods").and_then(Value::as_array) {
            Some(items) => {
                let parsed: Vec<NeighborhoodMatch> = items
                    .iter()
                    .filter_map(|item| serde_json::from_value(item.clone()).ok())
                    .collect();
                if parsed.len() < items.len() {
                    log::warn!(
                        "Skipped {} malformed similar neighborhoods",
                        items.len() - parsed.len()
                    );
                }
                parsed
            }
            None => Vec::new(),
        };

        let input_features = present(body, "input_features")
            .and_then(|raw| serde_json::from_value::<FeatureSummary>(raw.clone()).ok());

        Ok(Self {
            predicted_rent,
            confidence_interval,
            similar_neighborhoods,
            input_features,
        })
    }
}

/// Field value unless absent or JSON null
fn present<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    body.get(key).filter(|value| !value.is_null())
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Bool(flag)) => Some(flag),
        Some(Value::Number(n)) => n.as_f64().map(|n| n != 0.0),
        _ => None,
    })
}
