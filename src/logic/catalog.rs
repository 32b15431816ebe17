//! Neighborhood Catalog
//!
//! Best-effort reference list of sample neighborhoods, fetched once at
//! startup. A failed fetch keeps whatever was held before and is only logged.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ServiceResult;
use crate::logic::features::scale;
use crate::logic::service::RentApi;

/// One row of `GET /neighborhoods`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeighborhoodSample {
    pub name: String,
    pub distance_to_downtown: f64,
    pub transit_score: f64,
    pub average_rent: f64,

    // Descriptive columns, not always sent
    #[serde(default)]
    pub crime_rate: Option<f64>,
    #[serde(default)]
    pub amenities_count: Option<f64>,
    #[serde(default)]
    pub family_type: Option<String>,
    #[serde(default)]
    pub furnished_type: Option<String>,
}

impl NeighborhoodSample {
    pub fn safety(&self) -> Option<f64> {
        self.crime_rate.map(scale::to_displayed)
    }
}

/// Decode a `/neighborhoods` body.
///
/// A missing or non-array `neighborhoods` field is an empty list; rows that
/// do not decode are skipped.
pub fn parse_neighborhoods(body: &Value) -> Vec<NeighborhoodSample> {
    let Some(items) = body.get("neighborhoods").and_then(Value::as_array) else {
        log::debug!("No neighborhoods array in catalog response");
        return Vec::new();
    };

    let samples: Vec<NeighborhoodSample> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();

    if samples.len() < items.len() {
        log::warn!("Skipped {} malformed neighborhood rows", items.len() - samples.len());
    }
    samples
}

#[derive(Debug, Default)]
pub struct NeighborhoodCatalog {
    samples: Vec<NeighborhoodSample>,
    refreshed_at: Option<DateTime<Utc>>,
}

pub type SharedCatalog = Arc<RwLock<NeighborhoodCatalog>>;

impl NeighborhoodCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[NeighborhoodSample] {
        &self.samples
    }

    /// First `limit` samples, for display
    pub fn preview(&self, limit: usize) -> &[NeighborhoodSample] {
        &self.samples[..limit.min(self.samples.len())]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.refreshed_at
    }

    /// Apply a fetch outcome. Returns whether the held list was replaced.
    pub fn apply(&mut self, outcome: ServiceResult<Vec<NeighborhoodSample>>) -> bool {
        match outcome {
            Ok(samples) => {
                log::info!("Loaded {} sample neighborhoods", samples.len());
                self.samples = samples;
                self.refreshed_at = Some(Utc::now());
                true
            }
            Err(e) => {
                log::warn!("Could not fetch neighborhoods: {}", e);
                false
            }
        }
    }

    pub async fn refresh<A: RentApi>(&mut self, api: &A) -> bool {
        let outcome = api.neighborhoods().await;
        self.apply(outcome)
    }
}

/// Refresh a shared catalog without holding its lock across the fetch
pub async fn refresh_shared<A: RentApi>(catalog: &SharedCatalog, api: &A) -> bool {
    let outcome = api.neighborhoods().await;
    catalog.write().apply(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ServiceError;
    use serde_json::json;

    fn sample(name: &str) -> NeighborhoodSample {
        NeighborhoodSample {
            name: name.to_string(),
            distance_to_downtown: 3.5,
            transit_score: 80.0,
            average_rent: 42000.0,
            crime_rate: None,
            amenities_count: None,
            family_type: None,
            furnished_type: None,
        }
    }

    #[test]
    fn test_parse_rows() {
        let body = json!({
            "neighborhoods": [
                {
                    "name": "Bandra West",
                    "distance_to_downtown": 12.0,
                    "transit_score": 85,
                    "crime_rate": 3.5,
                    "amenities_count": 60,
                    "family_type": "Family",
                    "people_count": 4,
                    "has_children": true,
                    "average_rent": 85000
                },
                { "name": "Broken" },
                { "name": "Powai", "distance_to_downtown": 20.5, "transit_score": 60, "average_rent": 52000 }
            ]
        });

        let samples = parse_neighborhoods(&body);
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].name, "Bandra West");
        assert_eq!(samples[0].safety(), Some(7.5));
        assert_eq!(samples[1].crime_rate, None);
    }

    #[test]
    fn test_missing_or_malformed_field_is_empty() {
        assert!(parse_neighborhoods(&json!({})).is_empty());
        assert!(parse_neighborhoods(&json!({ "neighborhoods": "n/a" })).is_empty());
        assert!(parse_neighborhoods(&json!({ "neighborhoods": null })).is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_list() {
        let mut catalog = NeighborhoodCatalog::new();
        assert!(catalog.is_empty());

        assert!(catalog.apply(Ok(vec![sample("Koramangala"), sample("HSR Layout")])));
        assert_eq!(catalog.len(), 2);
        assert!(catalog.refreshed_at().is_some());

        assert!(!catalog.apply(Err(ServiceError::Status { status: 500, message: None })));
        assert_eq!(catalog.len(), 2);

        assert!(catalog.apply(Ok(vec![sample("Baner")])));
        assert_eq!(catalog.samples(), &[sample("Baner")]);
    }

    #[test]
    fn test_preview() {
        let mut catalog = NeighborhoodCatalog::new();
        assert!(catalog.preview(5).is_empty());

        catalog.apply(Ok((0..8).map(|i| sample(&format!("N{i}"))).collect()));
        assert_eq!(catalog.preview(5).len(), 5);
        assert_eq!(catalog.preview(5)[4].name, "N4");
        assert_eq!(catalog.preview(20).len(), 8);
    }
}
