//! Features Module - User input normalization
//!
//! Turns raw form input into the canonical feature vector sent to the
//! prediction service.
//!
//! - `layout` - field table: names, order, domains
//! - `scale` - inverted safety/crime-rate transform
//! - `vector` - the request payload and its categorical types
//! - `form` - the exclusively-owned, clamping form model

pub mod layout;
pub mod scale;
pub mod vector;
pub mod form;


// Re-export common types
pub use layout::{Field, FieldDomain, FieldKind, FEATURE_LAYOUT};
pub use vector::{FamilyType, FeatureVector, FieldValue, FurnishedType};
pub use form::{FeatureFormModel, RawValue};
