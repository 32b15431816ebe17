//! Feature Layout - Centralized Field Definition
//!
//! **This file controls the request schema.**
//!
//! Every field the prediction service accepts is listed here, in wire order,
//! together with the domain its values are clamped into. The form model and
//! the feature vector both read their bounds from this table and nowhere else.

use std::fmt;
use std::str::FromStr;

use crate::error::FormError;

// ============================================================================
// FIELD DOMAINS
// ============================================================================

/// Numeric domain of a slider-backed field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldDomain {
    pub min: f64,
    pub max: f64,
    /// Decimal places kept after quantization (step = 10^-decimals)
    pub decimals: u32,
    pub default: f64,
}

impl FieldDomain {
    /// Slider step size
    pub fn step(&self) -> f64 {
        1.0 / 10f64.powi(self.decimals as i32)
    }

    /// Clamp into `[min, max]` and quantize to the step.
    ///
    /// Callers must reject NaN before getting here.
    pub fn clamp(&self, value: f64) -> f64 {
        round_to(value.clamp(self.min, self.max), self.decimals).clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Round half away from zero to a fixed number of decimals
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

pub const DISTANCE: FieldDomain = FieldDomain { min: 0.0, max: 45.0, decimals: 1, default: 5.0 };
pub const TRANSIT_SCORE: FieldDomain = FieldDomain { min: 0.0, max: 100.0, decimals: 0, default: 70.0 };
/// Stored (transmitted) crime rate
pub const CRIME_RATE: FieldDomain = FieldDomain { min: 1.0, max: 10.0, decimals: 1, default: 5.0 };
/// Displayed safety rating, the inverse of [`CRIME_RATE`]
pub const SAFETY: FieldDomain = FieldDomain { min: 1.0, max: 10.0, decimals: 1, default: 6.0 };
pub const AMENITIES: FieldDomain = FieldDomain { min: 0.0, max: 70.0, decimals: 0, default: 25.0 };
pub const PEOPLE_COUNT: FieldDomain = FieldDomain { min: 1.0, max: 8.0, decimals: 0, default: 3.0 };
pub const ROOMS_REQUIRED: FieldDomain = FieldDomain { min: 1.0, max: 5.0, decimals: 0, default: 2.0 };

// ============================================================================
// FIELDS
// ============================================================================

/// How a field's raw input is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Real,
    Integer,
    Flag,
    Choice,
}

/// A user-editable feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Distance,
    TransitScore,
    CrimeRate,
    Amenities,
    FamilyType,
    PeopleCount,
    RoomsRequired,
    HasChildren,
    ParkingRequired,
    FurnishedType,
}

/// Fields in the exact order they appear on the wire
pub const FEATURE_LAYOUT: [Field; 10] = [
    Field::Distance,
    Field::TransitScore,
    Field::CrimeRate,
    Field::Amenities,
    Field::FamilyType,
    Field::PeopleCount,
    Field::RoomsRequired,
    Field::HasChildren,
    Field::ParkingRequired,
    Field::FurnishedType,
];

impl Field {
    /// Wire name of the field
    pub fn name(&self) -> &'static str {
        match self {
            Field::Distance => "distance",
            Field::TransitScore => "transit_score",
            Field::CrimeRate => "crime_rate",
            Field::Amenities => "amenities",
            Field::FamilyType => "family_type",
            Field::PeopleCount => "people_count",
            Field::RoomsRequired => "rooms_required",
            Field::HasChildren => "has_children",
            Field::ParkingRequired => "parking_required",
            Field::FurnishedType => "furnished_type",
        }
    }

    /// Human label, as shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::Distance => "Distance to City Center (km)",
            Field::TransitScore => "Metro/Transport Connectivity Score",
            Field::CrimeRate => "Safety Rating (1-10, higher is safer)",
            Field::Amenities => "Local Amenities (Restaurants, ATMs, Hospitals)",
            Field::FamilyType => "Family Type",
            Field::PeopleCount => "People",
            Field::RoomsRequired => "Rooms Required",
            Field::HasChildren => "Children",
            Field::ParkingRequired => "Parking Required",
            Field::FurnishedType => "Furnishing",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Field::Distance | Field::CrimeRate => FieldKind::Real,
            Field::TransitScore | Field::Amenities | Field::PeopleCount | Field::RoomsRequired => {
                FieldKind::Integer
            }
            Field::HasChildren | Field::ParkingRequired => FieldKind::Flag,
            Field::FamilyType | Field::FurnishedType => FieldKind::Choice,
        }
    }

    /// Domain of the value the user edits.
    ///
    /// For `crime_rate` this is the displayed safety scale, not the stored one.
    pub fn domain(&self) -> Option<FieldDomain> {
        match self {
            Field::Distance => Some(DISTANCE),
            Field::TransitScore => Some(TRANSIT_SCORE),
            Field::CrimeRate => Some(SAFETY),
            Field::Amenities => Some(AMENITIES),
            Field::PeopleCount => Some(PEOPLE_COUNT),
            Field::RoomsRequired => Some(ROOMS_REQUIRED),
            Field::FamilyType | Field::FurnishedType | Field::HasChildren | Field::ParkingRequired => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        if key == "safety" {
            return Ok(Field::CrimeRate);
        }
        FEATURE_LAYOUT
            .iter()
            .copied()
            .find(|field| field.name() == key)
            .ok_or_else(|| FormError::UnknownField(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_bounds() {
        assert_eq!(DISTANCE.clamp(-3.0), 0.0);
        assert_eq!(DISTANCE.clamp(120.0), 45.0);
        assert_eq!(TRANSIT_SCORE.clamp(f64::INFINITY), 100.0);
        assert_eq!(PEOPLE_COUNT.clamp(f64::NEG_INFINITY), 1.0);
    }

    #[test]
    fn test_clamp_quantizes_to_step() {
        assert_eq!(DISTANCE.clamp(7.26), 7.3);
        assert_eq!(TRANSIT_SCORE.clamp(69.6), 70.0);
        assert_eq!(ROOMS_REQUIRED.clamp(4.49), 4.0);
        assert_eq!(DISTANCE.step(), 0.1);
        assert_eq!(AMENITIES.step(), 1.0);
    }

    #[test]
    fn test_defaults_inside_domains() {
        for field in FEATURE_LAYOUT {
            if let Some(domain) = field.domain() {
                assert!(domain.contains(domain.default), "{field} default out of range");
            }
        }
        assert!(CRIME_RATE.contains(CRIME_RATE.default));
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("distance".parse::<Field>(), Ok(Field::Distance));
        assert_eq!("Transit-Score".parse::<Field>(), Ok(Field::TransitScore));
        assert_eq!("safety".parse::<Field>(), Ok(Field::CrimeRate));
        assert_eq!("crime_rate".parse::<Field>(), Ok(Field::CrimeRate));
        assert_eq!(
            "bathrooms".parse::<Field>(),
            Err(FormError::UnknownField("bathrooms".to_string()))
        );
    }

    #[test]
    fn test_layout_names_unique() {
        let mut names: Vec<_> = FEATURE_LAYOUT.iter().map(Field::name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), FEATURE_LAYOUT.len());
    }
}
