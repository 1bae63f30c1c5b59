use assert_float_eq::assert_float_absolute_eq;
use proptest::prelude::*;

use dogs_dinner_rs::calculator::{
    ValidationIssue, convert, convert_uniform, dry_matter_chloride, dry_matter_reference_weight,
    dry_matter_sodium, kcal_per_dry_matter_gram,
};
use dogs_dinner_rs::models::{Nutrient, RawMeasurement};

fn wet_food() -> RawMeasurement {
    RawMeasurement {
        name: "Wet Food".to_string(),
        moisture: 77.0,
        protein: 6.3,
        fat: 2.0,
        fibre: 0.4,
        ash: 1.5,
        phosphorus: 0.2,
        sodium: 0.06,
        chloride: 0.4,
        kcal: 90.0,
        kcal_reference_weight: 100.0,
        ..Default::default()
    }
}

#[test]
fn test_wet_food_dry_matter_values() {
    let dm = convert(&wet_food()).unwrap();

    assert_float_absolute_eq!(dm.fat, 8.696, 1e-9);
    assert_float_absolute_eq!(dm.protein, 27.391, 1e-9);
    assert_float_absolute_eq!(dm.fibre, 1.739, 1e-9);
    assert_float_absolute_eq!(dm.ash, 6.522, 1e-9);
    assert_float_absolute_eq!(dm.phosphorus, 0.87, 1e-9);
    assert_float_absolute_eq!(dm.sodium, 0.261, 1e-9);
    assert_float_absolute_eq!(dm.sugar, 0.0, 1e-9);
}

#[test]
fn test_carbs_are_remainder_of_rounded_components() {
    let dm = convert(&wet_food()).unwrap();
    let total = dm.fat + dm.protein + dm.fibre + dm.ash + dm.carbs;
    assert_float_absolute_eq!(total, 100.0, 1e-6);
    assert_float_absolute_eq!(dm.carbs, 55.652, 1e-9);
}

#[test]
fn test_given_carbs_are_converted_directly() {
    let mut food = wet_food();
    food.carbs = Some(11.5);
    let dm = convert(&food).unwrap();
    assert_float_absolute_eq!(dm.carbs, 50.0, 1e-9);
}

#[test]
fn test_energy_density() {
    assert_float_absolute_eq!(dry_matter_reference_weight(100.0, 77.0), 23.0, 1e-9);
    assert_float_absolute_eq!(kcal_per_dry_matter_gram(90.0, 100.0, 77.0), 3.913, 1e-3);

    let dm = convert(&wet_food()).unwrap();
    assert_float_absolute_eq!(dm.reference_weight, 23.0, 1e-9);
    assert_float_absolute_eq!(dm.kcal_per_gram, 3.913, 1e-9);
}

#[test]
fn test_salt_without_reference_adds_nothing() {
    let plain = dry_matter_sodium(0.06, None, None, 77.0);
    assert_float_absolute_eq!(dry_matter_sodium(0.06, Some(5.0), Some(0.0), 77.0), plain, 1e-12);
    assert_float_absolute_eq!(
        dry_matter_chloride(0.4, Some(5.0), Some(0.0), 77.0),
        dry_matter_chloride(0.4, None, None, 77.0),
        1e-12
    );
}

#[test]
fn test_salt_without_reference_is_rejected_by_convert() {
    let mut food = wet_food();
    food.salt = Some(5.0);
    let err = convert(&food).unwrap_err();
    assert!(err.issues.contains(&ValidationIssue::SaltWithoutReference));
}

#[test]
fn test_salt_splits_into_sodium_and_chloride() {
    // 1g salt per 100g as fed: 0.4% sodium and 0.6% chloride, at 0% moisture.
    assert_float_absolute_eq!(dry_matter_sodium(0.0, Some(1.0), Some(100.0), 0.0), 0.4, 1e-12);
    assert_float_absolute_eq!(dry_matter_chloride(0.0, Some(1.0), Some(100.0), 0.0), 0.6, 1e-12);
}

#[test]
fn test_sugar_needs_both_values() {
    let mut food = wet_food();
    food.sugar = Some(2.3);
    food.sugar_reference_weight = Some(100.0);
    let dm = convert(&food).unwrap();
    assert_float_absolute_eq!(dm.sugar, 10.0, 1e-9);
}

#[test]
fn test_zero_moisture_is_identity() {
    assert_float_absolute_eq!(convert_uniform(25.0, 0.0), 25.0, 1e-12);
    assert_float_absolute_eq!(kcal_per_dry_matter_gram(380.0, 100.0, 0.0), 3.8, 1e-12);
}

#[test]
fn test_unstated_moisture_is_rejected() {
    let mut food = wet_food();
    food.moisture = 0.0;
    let err = convert(&food).unwrap_err();
    assert_eq!(err.issues, vec![ValidationIssue::MissingValue("moisture")]);
}

#[test]
fn test_unnamed_food() {
    let mut food = wet_food();
    food.name = "   ".to_string();
    assert_eq!(convert(&food).unwrap().name, "This food");
}

#[test]
fn test_conversion_is_deterministic() {
    let food = wet_food();
    assert_eq!(convert(&food).unwrap(), convert(&food).unwrap());
}

#[test]
fn test_invalid_food_reports_every_issue() {
    let food = RawMeasurement {
        moisture: 100.0,
        fat: -1.0,
        ..Default::default()
    };
    let err = convert(&food).unwrap_err();
    assert!(err.issues.contains(&ValidationIssue::MissingCalories));
    assert!(err.issues.contains(&ValidationIssue::MoistureAtCapacity));
    assert!(err.issues.len() >= 3);
}

#[test]
fn test_value_lookup_matches_fields() {
    let dm = convert(&wet_food()).unwrap();
    assert_eq!(dm.value(Nutrient::Phosphorus), dm.phosphorus);
    assert_eq!(dm.value(Nutrient::Carbs), dm.carbs);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Removing water never lowers a nutrient's share.
    #[test]
    fn dry_matter_never_below_as_fed(crude in 0.0f64..50.0, moisture in 0.0f64..99.0) {
        let dm = convert_uniform(crude, moisture);
        prop_assert!(dm >= crude - 1e-9, "dm {} below crude {}", dm, crude);
    }

    /// A larger crude value always gives a larger dry-matter value.
    #[test]
    fn dry_matter_rises_with_crude_value(
        v1 in 0.0f64..50.0,
        extra in 0.001f64..50.0,
        moisture in 0.0f64..99.0,
    ) {
        let v2 = v1 + extra;
        prop_assert!(
            convert_uniform(v1, moisture) < convert_uniform(v2, moisture),
            "dm({}) not below dm({}) at moisture {}",
            v1,
            v2,
            moisture
        );
    }

    /// More moisture concentrates the same crude value further.
    #[test]
    fn dry_matter_rises_with_moisture(
        crude in 0.1f64..50.0,
        m1 in 0.0f64..98.0,
        extra in 0.1f64..1.0,
    ) {
        let m2 = m1 + extra;
        prop_assert!(convert_uniform(crude, m2) > convert_uniform(crude, m1));
    }

    /// Derived carbohydrate is never negative.
    #[test]
    fn derived_carbs_non_negative(
        protein in 0.1f64..35.0,
        fat in 0.1f64..30.0,
        fibre in 0.1f64..10.0,
        ash in 0.1f64..10.0,
        moisture in 0.1f64..10.0,
    ) {
        let food = RawMeasurement {
            protein,
            fat,
            fibre,
            ash,
            moisture,
            phosphorus: 0.8,
            sodium: 0.3,
            kcal: 350.0,
            kcal_reference_weight: 100.0,
            ..Default::default()
        };
        let dm = convert(&food).unwrap();
        prop_assert!(dm.carbs >= 0.0);
    }
}
