//! Feature Vector - the prediction request payload
//!
//! Field names and order follow `layout.rs`. Values are expected to sit
//! inside their domains; `FeatureFormModel` guarantees that for snapshots and
//! [`FeatureVector::clamped`] restores it for vectors built by hand.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::layout::{
    Field, AMENITIES, CRIME_RATE, DISTANCE, FEATURE_LAYOUT, PEOPLE_COUNT, ROOMS_REQUIRED,
    TRANSIT_SCORE,
};
use super::scale;
use crate::error::FormError;

// ============================================================================
// CATEGORICAL FEATURES
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FamilyType {
    Single,
    Couple,
    #[default]
    Family,
    Bachelors,
}

impl FamilyType {
    pub const ALL: [FamilyType; 4] = [
        FamilyType::Single,
        FamilyType::Couple,
        FamilyType::Family,
        FamilyType::Bachelors,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FamilyType::Single => "Single",
            FamilyType::Couple => "Couple",
            FamilyType::Family => "Family",
            FamilyType::Bachelors => "Bachelors",
        }
    }
}

impl FromStr for FamilyType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s.trim())
            .ok_or_else(|| FormError::UnknownVariant {
                field: Field::FamilyType.name(),
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FurnishedType {
    Unfurnished,
    #[default]
    #[serde(rename = "Semi-Furnished")]
    SemiFurnished,
    #[serde(rename = "Fully-Furnished")]
    FullyFurnished,
}

impl FurnishedType {
    pub const ALL: [FurnishedType; 3] = [
        FurnishedType::Unfurnished,
        FurnishedType::SemiFurnished,
        FurnishedType::FullyFurnished,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FurnishedType::Unfurnished => "Unfurnished",
            FurnishedType::SemiFurnished => "Semi-Furnished",
            FurnishedType::FullyFurnished => "Fully-Furnished",
        }
    }
}

impl FromStr for FurnishedType {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s.trim())
            .ok_or_else(|| FormError::UnknownVariant {
                field: Field::FurnishedType.name(),
                value: s.to_string(),
            })
    }
}

// ============================================================================
// FIELD VALUES
// ============================================================================

/// A single feature value, typed by its field kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Real(f64),
    Integer(i64),
    Flag(bool),
    Family(FamilyType),
    Furnished(FurnishedType),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Real(v) => Some(*v),
            FieldValue::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Real(v) => write!(f, "{:.1}", v),
            FieldValue::Integer(v) => write!(f, "{}", v),
            FieldValue::Flag(true) => f.write_str("yes"),
            FieldValue::Flag(false) => f.write_str("no"),
            FieldValue::Family(v) => f.write_str(v.as_str()),
            FieldValue::Furnished(v) => f.write_str(v.as_str()),
        }
    }
}

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Canonical request payload for `POST /predict`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Distance to the city center in km
    pub distance: f64,
    pub transit_score: u8,
    /// Stored crime rate; the user sees `11 - crime_rate`
    pub crime_rate: f64,
    pub amenities: u8,
    pub family_type: FamilyType,
    pub people_count: u8,
    pub rooms_required: u8,
    #[serde(with = "flag")]
    pub has_children: bool,
    #[serde(with = "flag")]
    pub parking_required: bool,
    pub furnished_type: FurnishedType,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            distance: DISTANCE.default,
            transit_score: TRANSIT_SCORE.default as u8,
            crime_rate: CRIME_RATE.default,
            amenities: AMENITIES.default as u8,
            family_type: FamilyType::default(),
            people_count: PEOPLE_COUNT.default as u8,
            rooms_required: ROOMS_REQUIRED.default as u8,
            has_children: false,
            parking_required: true,
            furnished_type: FurnishedType::default(),
        }
    }
}

impl FeatureVector {
    /// Stored value of a field (crime rate is NOT inverted here)
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::Distance => FieldValue::Real(self.distance),
            Field::TransitScore => FieldValue::Integer(self.transit_score.into()),
            Field::CrimeRate => FieldValue::Real(self.crime_rate),
            Field::Amenities => FieldValue::Integer(self.amenities.into()),
            Field::FamilyType => FieldValue::Family(self.family_type),
            Field::PeopleCount => FieldValue::Integer(self.people_count.into()),
            Field::RoomsRequired => FieldValue::Integer(self.rooms_required.into()),
            Field::HasChildren => FieldValue::Flag(self.has_children),
            Field::ParkingRequired => FieldValue::Flag(self.parking_required),
            Field::FurnishedType => FieldValue::Furnished(self.furnished_type),
        }
    }

    /// Displayed safety rating for the stored crime rate
    pub fn safety(&self) -> f64 {
        scale::to_displayed(self.crime_rate)
    }

    /// Copy with every numeric field pulled back into its domain.
    /// A NaN real falls back to the field default.
    pub fn clamped(&self) -> Self {
        let real = |value: f64, domain: super::layout::FieldDomain| {
            if value.is_nan() {
                domain.default
            } else {
                domain.clamp(value)
            }
        };

        Self {
            distance: real(self.distance, DISTANCE),
            transit_score: TRANSIT_SCORE.clamp(self.transit_score.into()) as u8,
            crime_rate: real(self.crime_rate, CRIME_RATE),
            amenities: AMENITIES.clamp(self.amenities.into()) as u8,
            people_count: PEOPLE_COUNT.clamp(self.people_count.into()) as u8,
            rooms_required: ROOMS_REQUIRED.clamp(self.rooms_required.into()) as u8,
            ..self.clone()
        }
    }

    /// Check every numeric field against its domain
    pub fn is_within_domain(&self) -> bool {
        DISTANCE.contains(self.distance)
            && TRANSIT_SCORE.contains(self.transit_score.into())
            && CRIME_RATE.contains(self.crime_rate)
            && AMENITIES.contains(self.amenities.into())
            && PEOPLE_COUNT.contains(self.people_count.into())
            && ROOMS_REQUIRED.contains(self.rooms_required.into())
    }

    /// Compact `name=value` rendering in wire order, for logs
    pub fn to_log_entry(&self) -> String {
        FEATURE_LAYOUT
            .iter()
            .map(|field| format!("{}={}", field.name(), self.value(*field)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Booleans travel as `0`/`1`.
mod flag {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Bool(bool),
            Int(u64),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Bool(value) => Ok(value),
            Raw::Int(0) => Ok(false),
            Raw::Int(1) => Ok(true),
            Raw::Int(other) => Err(D::Error::custom(format!("expected 0 or 1, got {}", other))),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
