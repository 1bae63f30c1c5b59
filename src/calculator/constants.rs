use crate::models::{Condition, Nutrient};
use crate::params::Bounds;

// ─────────────────────────────────────────────────────────────────────────────
// Conversion constants
// ─────────────────────────────────────────────────────────────────────────────

/// Fraction of added salt that is sodium, by weight (EU reference).
pub const SALT_SODIUM_FRACTION: f64 = 0.4;

/// Fraction of added salt that is chloride, by weight (EU reference).
pub const SALT_CHLORIDE_FRACTION: f64 = 0.6;

/// Decimal places kept on converted values.
pub const RESULT_DECIMALS: u32 = 3;

/// Decimal places kept on the renal sodium ratio (g/kcal) in reports.
pub const SODIUM_RATIO_DECIMALS: u32 = 6;

/// Proportional deviation reported when the base of the ratio is zero.
pub const ZERO_BASE_DELTA_PC: f64 = 100.0;

/// Upper limit on the as-fed composition total (%).
pub const MAX_COMPOSITION_TOTAL: f64 = 100.0;

// ─────────────────────────────────────────────────────────────────────────────
// Default thresholds
// Largely after All About Dog Food and PetMD guidance.
// ─────────────────────────────────────────────────────────────────────────────

/// Pancreatitis: dry-matter fat (%).
pub const PANC_FAT: Bounds = Bounds::new(Some(5.0), Some(10.0));

/// Pancreatitis: dry-matter protein (%).
pub const PANC_PROTEIN: Bounds = Bounds::new(Some(20.0), Some(30.0));

/// Pancreatitis: dry-matter carbohydrate (%), upper limit only.
pub const PANC_CARBS: Bounds = Bounds::new(None, Some(60.0));

/// Pancreatitis: added sugar should be absent.
pub const PANC_SUGAR: Bounds = Bounds::new(Some(0.0), Some(0.0));

/// Renal: dry-matter protein (%). High lowered from 30 as sources differ.
pub const RENAL_PROTEIN: Bounds = Bounds::new(Some(15.0), Some(20.0));

/// Renal: sodium per kilocalorie (g/kcal).
pub const RENAL_SODIUM: Bounds = Bounds::new(Some(0.0004), Some(0.0012));

/// Renal: dry-matter phosphorus (%).
pub const RENAL_PHOSPHORUS: Bounds = Bounds::new(Some(0.2), Some(0.8));

/// Built-in threshold for a nutrient under a condition.
pub fn default_bounds(nutrient: Nutrient, condition: Condition) -> Bounds {
    match (condition, nutrient) {
        (Condition::Pancreatitis, Nutrient::Fat) => PANC_FAT,
        (Condition::Pancreatitis, Nutrient::Protein) => PANC_PROTEIN,
        (Condition::Pancreatitis, Nutrient::Carbs) => PANC_CARBS,
        (Condition::Pancreatitis, Nutrient::Sugar) => PANC_SUGAR,
        (Condition::Renal, Nutrient::Protein) => RENAL_PROTEIN,
        (Condition::Renal, Nutrient::Sodium) => RENAL_SODIUM,
        (Condition::Renal, Nutrient::Phosphorus) => RENAL_PHOSPHORUS,
        _ => Bounds::UNCONSTRAINED,
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

/// Round to the precision kept on converted values.
pub fn round_result(value: f64) -> f64 {
    round_to(value, RESULT_DECIMALS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salt_fractions_sum_to_one() {
        assert!((SALT_SODIUM_FRACTION + SALT_CHLORIDE_FRACTION - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unlisted_pairs_are_unconstrained() {
        assert!(default_bounds(Nutrient::Fibre, Condition::Pancreatitis).is_unconstrained());
        assert!(default_bounds(Nutrient::Chloride, Condition::Renal).is_unconstrained());
        assert!(default_bounds(Nutrient::Ash, Condition::Renal).is_unconstrained());
        assert!(default_bounds(Nutrient::Fat, Condition::Renal).is_unconstrained());
    }

    #[test]
    fn test_round_result() {
        assert_eq!(round_result(8.695652), 8.696);
        assert_eq!(round_result(0.869565), 0.87);
        assert_eq!(round_result(23.0), 23.0);
    }

    #[test]
    fn test_round_to_rounds_not_truncates() {
        assert_eq!(round_to(0.000667007, SODIUM_RATIO_DECIMALS), 0.000667);
        assert_eq!(round_to(0.0006676, SODIUM_RATIO_DECIMALS), 0.000668);
    }
}
