//! Feature Form Model
//!
//! Single owner of the user's current feature values. All writes go through
//! [`FeatureFormModel::set`], which clamps numbers into their domain and
//! applies the inverted safety scale, so the held vector is always valid.

use super::layout::{
    Field, AMENITIES, DISTANCE, PEOPLE_COUNT, ROOMS_REQUIRED, SAFETY, TRANSIT_SCORE,
};
use super::scale;
use super::vector::{FeatureVector, FieldValue};
use crate::error::FormError;

/// Raw input as it arrives from a UI event
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Number(f64),
    Flag(bool),
    Text(String),
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        RawValue::Number(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        RawValue::Number(value as f64)
    }
}

impl From<i32> for RawValue {
    fn from(value: i32) -> Self {
        RawValue::Number(value.into())
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        RawValue::Flag(value)
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        RawValue::Text(value)
    }
}

impl RawValue {
    fn to_number(&self, field: Field) -> Result<f64, FormError> {
        let number = match self {
            RawValue::Number(n) => *n,
            RawValue::Text(text) => text.trim().parse::<f64>().map_err(|_| FormError::NotANumber {
                field: field.name(),
                value: text.clone(),
            })?,
            RawValue::Flag(_) => {
                return Err(FormError::TypeMismatch {
                    field: field.name(),
                    expected: "a number",
                })
            }
        };

        if number.is_nan() {
            return Err(FormError::NotANumber {
                field: field.name(),
                value: "NaN".to_string(),
            });
        }
        Ok(number)
    }

    fn to_flag(&self, field: Field) -> Result<bool, FormError> {
        match self {
            RawValue::Flag(flag) => Ok(*flag),
            RawValue::Number(n) if n.is_nan() => Err(FormError::NotANumber {
                field: field.name(),
                value: "NaN".to_string(),
            }),
            RawValue::Number(n) => Ok(*n != 0.0),
            RawValue::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => Ok(true),
                "0" | "false" | "no" | "off" => Ok(false),
                _ => Err(FormError::UnknownVariant {
                    field: field.name(),
                    value: text.clone(),
                }),
            },
        }
    }

    fn to_text(&self, field: Field) -> Result<&str, FormError> {
        match self {
            RawValue::Text(text) => Ok(text),
            _ => Err(FormError::TypeMismatch {
                field: field.name(),
                expected: "one of its listed options",
            }),
        }
    }
}

/// Mutable form state behind a narrow write surface
#[derive(Debug, Clone, Default)]
pub struct FeatureFormModel {
    vector: FeatureVector,
}

impl FeatureFormModel {
    /// Form holding the default feature vector
    pub fn new() -> Self {
        Self::default()
    }

    /// Update one field.
    ///
    /// Out-of-range numbers are clamped, never rejected. Values that cannot
    /// be interpreted for the field return an error and leave the form as
    /// it was.
    pub fn set(&mut self, field: Field, raw: impl Into<RawValue>) -> Result<(), FormError> {
        let raw = raw.into();

        match field {
            Field::Distance => self.vector.distance = DISTANCE.clamp(raw.to_number(field)?),
            Field::TransitScore => {
                self.vector.transit_score = TRANSIT_SCORE.clamp(raw.to_number(field)?) as u8
            }
            Field::CrimeRate => {
                self.vector.crime_rate = scale::to_stored(SAFETY.clamp(raw.to_number(field)?))
            }
            Field::Amenities => self.vector.amenities = AMENITIES.clamp(raw.to_number(field)?) as u8,
            Field::PeopleCount => {
                self.vector.people_count = PEOPLE_COUNT.clamp(raw.to_number(field)?) as u8
            }
            Field::RoomsRequired => {
                self.vector.rooms_required = ROOMS_REQUIRED.clamp(raw.to_number(field)?) as u8
            }
            Field::HasChildren => self.vector.has_children = raw.to_flag(field)?,
            Field::ParkingRequired => self.vector.parking_required = raw.to_flag(field)?,
            Field::FamilyType => self.vector.family_type = raw.to_text(field)?.parse()?,
            Field::FurnishedType => self.vector.furnished_type = raw.to_text(field)?.parse()?,
        }

        log::debug!("Form field {} set to {}", field, self.get(field));
        Ok(())
    }

    /// Update a field addressed by its wire name (or `safety`)
    pub fn set_by_name(&mut self, name: &str, raw: impl Into<RawValue>) -> Result<(), FormError> {
        let field: Field = name.parse()?;
        self.set(field, raw)
    }

    /// Current value as the user sees it (safety, not crime rate)
    pub fn get(&self, field: Field) -> FieldValue {
        match field {
            Field::CrimeRate => FieldValue::Real(self.safety()),
            other => self.vector.value(other),
        }
    }

    /// Displayed safety rating
    pub fn safety(&self) -> f64 {
        self.vector.safety()
    }

    /// Independent copy of the current values
    pub fn snapshot(&self) -> FeatureVector {
        self.vector.clone()
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        self.vector = FeatureVector::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::features::vector::{FamilyType, FurnishedType};

    #[test]
    fn test_numeric_set_and_clamp() {
        let mut form = FeatureFormModel::new();

        form.set(Field::Distance, 12.34).unwrap();
        assert_eq!(form.get(Field::Distance), FieldValue::Real(12.3));

        form.set(Field::Distance, -1.0).unwrap();
        assert_eq!(form.get(Field::Distance), FieldValue::Real(0.0));

        form.set(Field::TransitScore, 140).unwrap();
        assert_eq!(form.get(Field::TransitScore), FieldValue::Integer(100));

        form.set(Field::PeopleCount, 0).unwrap();
        assert_eq!(form.get(Field::PeopleCount), FieldValue::Integer(1));
    }

    #[test]
    fn test_text_is_parsed_like_slider_events() {
        let mut form = FeatureFormModel::new();
        form.set(Field::Amenities, " 42 ").unwrap();
        assert_eq!(form.snapshot().amenities, 42);

        let err = form.set(Field::Amenities, "lots").unwrap_err();
        assert!(matches!(err, FormError::NotANumber { field: "amenities", .. }));
        assert_eq!(form.snapshot().amenities, 42);
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut form = FeatureFormModel::new();
        assert!(form.set(Field::Distance, f64::NAN).is_err());
        assert_eq!(form.snapshot().distance, 5.0);
    }

    #[test]
    fn test_safety_is_inverted() {
        let mut form = FeatureFormModel::new();
        assert_eq!(form.safety(), 6.0);

        form.set(Field::CrimeRate, 8.5).unwrap();
        assert_eq!(form.get(Field::CrimeRate), FieldValue::Real(8.5));
        assert_eq!(form.snapshot().crime_rate, 2.5);

        form.set(Field::CrimeRate, 0.2).unwrap();
        assert_eq!(form.safety(), 1.0);
        assert_eq!(form.snapshot().crime_rate, 10.0);
    }

    #[test]
    fn test_flags() {
        let mut form = FeatureFormModel::new();
        form.set(Field::HasChildren, true).unwrap();
        form.set(Field::ParkingRequired, "0").unwrap();

        let snapshot = form.snapshot();
        assert!(snapshot.has_children);
        assert!(!snapshot.parking_required);

        assert!(form.set(Field::HasChildren, "maybe").is_err());
        assert!(form.snapshot().has_children);
    }

    #[test]
    fn test_enum_literals_only() {
        let mut form = FeatureFormModel::new();
        form.set(Field::FamilyType, "Couple").unwrap();
        form.set(Field::FurnishedType, "Unfurnished").unwrap();
        assert_eq!(form.snapshot().family_type, FamilyType::Couple);
        assert_eq!(form.snapshot().furnished_type, FurnishedType::Unfurnished);

        let err = form.set(Field::FamilyType, "Executive").unwrap_err();
        assert_eq!(
            err,
            FormError::UnknownVariant {
                field: "family_type",
                value: "Executive".to_string()
            }
        );
        assert_eq!(form.snapshot().family_type, FamilyType::Couple);

        assert!(form.set(Field::FurnishedType, 2).is_err());
        assert_eq!(form.snapshot().furnished_type, FurnishedType::Unfurnished);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut form = FeatureFormModel::new();
        let before = form.snapshot();

        form.set(Field::RoomsRequired, 4).unwrap();
        assert_eq!(before.rooms_required, 2);
        assert_eq!(form.snapshot().rooms_required, 4);
    }

    #[test]
    fn test_set_by_name_and_reset() {
        let mut form = FeatureFormModel::new();
        form.set_by_name("safety", 9.0).unwrap();
        form.set_by_name("transit_score", "12").unwrap();
        assert_eq!(form.snapshot().crime_rate, 2.0);

        assert_eq!(
            form.set_by_name("garden", 1),
            Err(FormError::UnknownField("garden".to_string()))
        );

        form.reset();
        assert_eq!(form.snapshot(), FeatureVector::default());
    }
}
