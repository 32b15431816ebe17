//! Plain-text projection of form, session and catalog state.
//!
//! Stateless: everything here reads the public read contract and returns a
//! string for the console to print.

use std::fmt::Write;

use crate::logic::catalog::NeighborhoodSample;
use crate::logic::features::{FeatureFormModel, Field, FEATURE_LAYOUT};
use crate::logic::prediction::{NeighborhoodMatch, PredictionSession, SessionState};

/// Whole-rupee amount with en-IN digit grouping, e.g. `₹1,25,000`
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹—".to_string();
    }

    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let sign = if rounded < 0 { "-" } else { "" };

    if digits.len() <= 3 {
        return format!("{sign}₹{digits}");
    }

    // last three digits, then groups of two
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{sign}₹{},{tail}", groups.join(","))
}

fn range_hint(field: Field) -> String {
    match field.domain() {
        Some(domain) => format!("[{} - {}]", domain.min, domain.max),
        None => match field {
            Field::FamilyType => "[Single | Couple | Family | Bachelors]".to_string(),
            Field::FurnishedType => "[Unfurnished | Semi-Furnished | Fully-Furnished]".to_string(),
            _ => "[yes | no]".to_string(),
        },
    }
}

pub fn render_form(form: &FeatureFormModel) -> String {
    let mut out = String::from("Property Details\n");
    for field in FEATURE_LAYOUT {
        let value = match field {
            Field::Distance => format!("{} km", form.get(field)),
            Field::TransitScore => format!("{}/100", form.get(field)),
            Field::CrimeRate => format!("{:.1}/10", form.safety()),
            _ => form.get(field).to_string(),
        };
        let _ = writeln!(
            out,
            "  {:<16} {:<48} {:<16} {}",
            field.name(),
            field.label(),
            value,
            range_hint(field)
        );
    }
    out
}

fn render_match(item: &NeighborhoodMatch) -> String {
    let mut line = format!("  - {} ({})", item.neighborhood, format_inr(item.rent));
    let features = &item.features;
    let mut details = Vec::new();

    if let Some(distance) = features.distance_to_downtown {
        details.push(format!("{}km from center", distance));
    }
    if let Some(transit) = features.transit_score {
        details.push(format!("Metro: {}/100", transit));
    }
    if let Some(safety) = features.safety() {
        details.push(format!("Safety: {:.1}/10", safety));
    }
    if let Some(amenities) = features.amenities_count {
        details.push(format!("Amenities: {}", amenities));
    }

    if !details.is_empty() {
        let _ = write!(line, "\n      {}", details.join(" | "));
    }
    line
}

pub fn render_session(session: &PredictionSession) -> String {
    match session.state() {
        SessionState::Idle => "No prediction yet. Type `predict` to submit.".to_string(),
        SessionState::Submitting { .. } => "Predicting...".to_string(),
        SessionState::Failed(message) => format!("Error: {}", message),
        SessionState::Success(result) => {
            let mut out = format!(
                "Rent Prediction: {}\nEstimated monthly rent (including maintenance)",
                format_inr(result.predicted_rent)
            );

            if let Some(interval) = &result.confidence_interval {
                let _ = write!(
                    out,
                    "\n95% Confidence Range: {} - {}",
                    format_inr(interval.lower),
                    format_inr(interval.upper)
                );
            }

            if !result.similar_neighborhoods.is_empty() {
                out.push_str("\n\nSimilar Neighborhoods");
                for item in &result.similar_neighborhoods {
                    out.push('\n');
                    out.push_str(&render_match(item));
                }
            }
            out
        }
    }
}

pub fn render_samples(samples: &[NeighborhoodSample]) -> String {
    if samples.is_empty() {
        return "No sample neighborhoods available.".to_string();
    }

    let mut out = String::from("Sample Neighborhoods");
    for sample in samples {
        let _ = write!(
            out,
            "\n  - {:<24} {}km • Metro: {}/100   {}",
            sample.name,
            sample.distance_to_downtown,
            sample.transit_score,
            format_inr(sample.average_rent)
        );
    }
    out
}
