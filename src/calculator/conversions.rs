use tracing::{debug, warn};

use crate::calculator::constants::*;
use crate::calculator::validation::{ValidationError, enforce_required};
use crate::models::{DryMatterResult, RawMeasurement};

/// Rescale an as-fed percentage to dry matter basis.
///
/// Formula: crude / (100 - moisture) * 100
#[inline]
pub fn convert_uniform(crude: f64, moisture: f64) -> f64 {
    (crude / (100.0 - moisture)) * 100.0
}

/// Dry-matter carbohydrate.
///
/// A supplied crude value is converted like any other nutrient. Otherwise
/// carbohydrate is whatever dry matter remains after fat, protein, fibre and
/// ash, and never negative.
pub fn dry_matter_carbs(
    crude_carbs: Option<f64>,
    dm_fat: f64,
    dm_protein: f64,
    dm_fibre: f64,
    dm_ash: f64,
    moisture: f64,
) -> f64 {
    if let Some(carbs) = crude_carbs.filter(|&c| c != 0.0) {
        return convert_uniform(carbs, moisture);
    }

    let non_carbs = dm_fat + dm_protein + dm_fibre + dm_ash;
    if non_carbs <= 100.0 {
        100.0 - non_carbs
    } else {
        0.0
    }
}

/// As-fed percentage contributed by added salt for one of its components.
fn salt_contribution(salt: Option<f64>, salt_reference_weight: Option<f64>, fraction: f64) -> f64 {
    match (salt, salt_reference_weight) {
        (Some(salt), Some(weight)) if weight != 0.0 => (salt * fraction) / weight * 100.0,
        _ => 0.0,
    }
}

/// Dry-matter sodium (%), including any added salt.
pub fn dry_matter_sodium(
    crude_sodium: f64,
    salt: Option<f64>,
    salt_reference_weight: Option<f64>,
    moisture: f64,
) -> f64 {
    let added = salt_contribution(salt, salt_reference_weight, SALT_SODIUM_FRACTION);
    convert_uniform(crude_sodium + added, moisture)
}

/// Dry-matter chloride (%), including any added salt.
pub fn dry_matter_chloride(
    crude_chloride: f64,
    salt: Option<f64>,
    salt_reference_weight: Option<f64>,
    moisture: f64,
) -> f64 {
    let added = salt_contribution(salt, salt_reference_weight, SALT_CHLORIDE_FRACTION);
    convert_uniform(crude_chloride + added, moisture)
}

/// Dry-matter added sugar (%).
///
/// Without a positive sugar weight and reference weight, added sugar is
/// taken to be absent.
pub fn dry_matter_sugar(sugar: Option<f64>, sugar_reference_weight: Option<f64>, moisture: f64) -> f64 {
    match (sugar, sugar_reference_weight) {
        (Some(sugar), Some(weight)) if sugar > 0.0 && weight > 0.0 => {
            convert_uniform(sugar / weight * 100.0, moisture)
        }
        _ => 0.0,
    }
}

/// Dry mass (g) of `reference_weight` grams of food as fed.
#[inline]
pub fn dry_matter_reference_weight(reference_weight: f64, moisture: f64) -> f64 {
    reference_weight * ((100.0 - moisture) / 100.0)
}

/// Energy per gram of dry matter (kcal/g).
///
/// Moisture carries no calories, so all of `kcal` sits in the dry fraction
/// of the reference weight.
#[inline]
pub fn kcal_per_dry_matter_gram(kcal: f64, kcal_reference_weight: f64, moisture: f64) -> f64 {
    kcal / dry_matter_reference_weight(kcal_reference_weight, moisture)
}

/// Validate a food's as-fed analysis and convert it to dry matter basis.
///
/// Values are rounded to [`RESULT_DECIMALS`] places; the carbohydrate
/// remainder is taken from the rounded components.
pub fn convert(raw: &RawMeasurement) -> Result<DryMatterResult, ValidationError> {
    if let Err(e) = enforce_required(raw) {
        warn!(food = raw.display_name(), issues = e.issues.len(), "rejected as-fed inputs");
        return Err(e);
    }

    let moisture = raw.moisture;
    let fat = round_result(convert_uniform(raw.fat, moisture));
    let protein = round_result(convert_uniform(raw.protein, moisture));
    let fibre = round_result(convert_uniform(raw.fibre, moisture));
    let ash = round_result(convert_uniform(raw.ash, moisture));
    let carbs = round_result(dry_matter_carbs(raw.carbs, fat, protein, fibre, ash, moisture));

    let result = DryMatterResult {
        name: raw.display_name().to_string(),
        protein,
        fat,
        carbs,
        fibre,
        ash,
        phosphorus: round_result(convert_uniform(raw.phosphorus, moisture)),
        sodium: round_result(dry_matter_sodium(
            raw.sodium,
            raw.salt,
            raw.salt_reference_weight,
            moisture,
        )),
        chloride: round_result(dry_matter_chloride(
            raw.chloride,
            raw.salt,
            raw.salt_reference_weight,
            moisture,
        )),
        sugar: round_result(dry_matter_sugar(raw.sugar, raw.sugar_reference_weight, moisture)),
        kcal_per_gram: round_result(kcal_per_dry_matter_gram(
            raw.kcal,
            raw.kcal_reference_weight,
            moisture,
        )),
        reference_weight: round_result(dry_matter_reference_weight(
            raw.kcal_reference_weight,
            moisture,
        )),
    };

    debug!(food = %result.name, ?result, "converted to dry matter");
    Ok(result)
}
