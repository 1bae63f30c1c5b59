use thiserror::Error;

use crate::calculator::constants::MAX_COMPOSITION_TOTAL;
use crate::models::RawMeasurement;

/// One problem with a food's as-fed inputs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("Both the calories (kcal) and the 'per weight of food (g)' values need to be provided.")]
    MissingCalories,

    #[error("If salt is given, the 'per grams' value needs to be provided.")]
    SaltWithoutReference,

    #[error("If sugar is given, the 'per grams' value needs to be provided.")]
    SugarWithoutReference,

    #[error("A value for {0} needs to be provided.")]
    MissingValue(&'static str),

    #[error("The value for {0} cannot be negative.")]
    Negative(&'static str),

    #[error("The value for {0} is not a number.")]
    NotFinite(&'static str),

    #[error("Moisture must be below 100%; nothing would remain as dry matter.")]
    MoistureAtCapacity,

    #[error(
        "The crude values for protein, fibre, fat, ash, sodium, phosphorus and moisture total {0:.2}%, in excess of 100%."
    )]
    CompositionExceeds(f64),
}

/// A food's inputs failed one or more checks; nothing was calculated.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", render_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

fn render_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Check that a food's inputs are complete and consistent.
///
/// Every failed check is reported, not just the first.
pub fn enforce_required(raw: &RawMeasurement) -> Result<(), ValidationError> {
    let mut issues = Vec::new();

    let fields = [
        ("moisture", Some(raw.moisture)),
        ("protein", Some(raw.protein)),
        ("fat", Some(raw.fat)),
        ("carbohydrate", raw.carbs),
        ("fibre", Some(raw.fibre)),
        ("ash", Some(raw.ash)),
        ("phosphorus", Some(raw.phosphorus)),
        ("sodium", Some(raw.sodium)),
        ("chloride", Some(raw.chloride)),
        ("salt", raw.salt),
        ("salt weight", raw.salt_reference_weight),
        ("sugar", raw.sugar),
        ("sugar weight", raw.sugar_reference_weight),
        ("calories", Some(raw.kcal)),
        ("calorie weight", Some(raw.kcal_reference_weight)),
    ];
    for (label, value) in fields {
        match value {
            Some(v) if !v.is_finite() => issues.push(ValidationIssue::NotFinite(label)),
            Some(v) if v < 0.0 => issues.push(ValidationIssue::Negative(label)),
            _ => {}
        }
    }

    if !(raw.kcal > 0.0 && raw.kcal_reference_weight > 0.0) {
        issues.push(ValidationIssue::MissingCalories);
    }
    if is_given(raw.salt) && !is_given(raw.salt_reference_weight) {
        issues.push(ValidationIssue::SaltWithoutReference);
    }
    if is_given(raw.sugar) && !is_given(raw.sugar_reference_weight) {
        issues.push(ValidationIssue::SugarWithoutReference);
    }

    let required = [
        ("protein", raw.protein),
        ("fibre", raw.fibre),
        ("fat", raw.fat),
        ("ash", raw.ash),
        ("sodium", raw.sodium),
        ("phosphorus", raw.phosphorus),
        ("moisture", raw.moisture),
    ];
    for (label, value) in required {
        if value == 0.0 {
            issues.push(ValidationIssue::MissingValue(label));
        }
    }

    if raw.moisture >= 100.0 {
        issues.push(ValidationIssue::MoistureAtCapacity);
    }

    let total = raw.composition_total();
    if total > MAX_COMPOSITION_TOTAL {
        issues.push(ValidationIssue::CompositionExceeds(total));
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { issues })
    }
}

/// Whether an optional input was actually filled in.
fn is_given(value: Option<f64>) -> bool {
    value.is_some_and(|v| v != 0.0)
}
