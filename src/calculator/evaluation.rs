use tracing::debug;

use crate::calculator::constants::ZERO_BASE_DELTA_PC;
use crate::models::{
    Condition, ConditionReport, Deviation, DryMatterResult, Nutrient, SuitabilityReport,
    SuitabilityVerdict,
};
use crate::params::{ParameterStore, ThresholdRule};

/// Outcome of comparing one value with a range, before it is dressed up as
/// a verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeOutcome {
    pub reason: Option<Deviation>,
    pub delta: Option<f64>,
    pub delta_pc: Option<f64>,
}

impl RangeOutcome {
    pub fn pass(&self) -> bool {
        self.reason.is_none()
    }
}

/// Compare `value` with an inclusive `[low, high]` range.
///
/// An unset side is not checked. `delta_pc` is proportional: the distance
/// over the value when too low, over the bound when too high, or 100 when
/// that base is zero.
pub fn range_test(value: f64, low: Option<f64>, high: Option<f64>) -> RangeOutcome {
    if let Some(low) = low.filter(|&low| value < low) {
        let delta = low - value;
        return RangeOutcome {
            reason: Some(Deviation::Low),
            delta: Some(delta),
            delta_pc: Some(proportional(delta, value)),
        };
    }

    if let Some(high) = high.filter(|&high| value > high) {
        let delta = value - high;
        return RangeOutcome {
            reason: Some(Deviation::High),
            delta: Some(delta),
            delta_pc: Some(proportional(delta, high)),
        };
    }

    RangeOutcome {
        reason: None,
        delta: None,
        delta_pc: None,
    }
}

fn proportional(delta: f64, base: f64) -> f64 {
    if base != 0.0 {
        delta / base * 100.0
    } else {
        ZERO_BASE_DELTA_PC
    }
}

/// Sodium per kilocalorie (g/kcal), the basis of the renal sodium test.
pub fn sodium_g_per_kcal(dry_matter: &DryMatterResult) -> f64 {
    if dry_matter.sodium == 0.0 || dry_matter.kcal_per_gram == 0.0 {
        return 0.0;
    }
    let grams_per_kcal = 1.0 / dry_matter.kcal_per_gram;
    grams_per_kcal * (dry_matter.sodium / 100.0)
}

/// The value a nutrient is judged on under a condition.
///
/// Renal sodium is judged per kilocalorie; everything else on its
/// dry-matter percentage.
pub fn judged_value(dry_matter: &DryMatterResult, nutrient: Nutrient, condition: Condition) -> f64 {
    match (condition, nutrient) {
        (Condition::Renal, Nutrient::Sodium) => sodium_g_per_kcal(dry_matter),
        _ => dry_matter.value(nutrient),
    }
}

/// Judge one nutrient against its rule.
///
/// Returns `None` when the rule has no bounds; the nutrient is simply not
/// tested.
pub fn evaluate_nutrient(
    dry_matter: &DryMatterResult,
    nutrient: Nutrient,
    condition: Condition,
    rule: &ThresholdRule,
) -> Option<SuitabilityVerdict> {
    if !rule.is_configured() {
        return None;
    }

    let value = judged_value(dry_matter, nutrient, condition);
    let outcome = range_test(value, rule.low, rule.high);

    debug!(
        nutrient = nutrient.key(),
        condition = condition.key(),
        value,
        pass = outcome.pass(),
        "tested nutrient"
    );

    Some(SuitabilityVerdict {
        nutrient,
        condition,
        value,
        unit: nutrient.measure_unit(condition).to_string(),
        pass: outcome.pass(),
        reason: outcome.reason,
        delta: outcome.delta,
        delta_pc: outcome.delta_pc,
        default_param_changed: rule.default_changed,
        defaults: rule.defaults(),
    })
}

/// Test every configured nutrient under one condition.
pub fn evaluate_condition(
    dry_matter: &DryMatterResult,
    params: &ParameterStore,
    condition: Condition,
) -> ConditionReport {
    let verdicts = condition
        .evaluation_order()
        .into_iter()
        .filter_map(|n| evaluate_nutrient(dry_matter, n, condition, params.get(n, condition)))
        .collect();

    ConditionReport {
        condition,
        verdicts,
    }
}

/// Judge a converted food against both conditions.
pub fn evaluate(dry_matter: &DryMatterResult, params: &ParameterStore) -> SuitabilityReport {
    let report = SuitabilityReport {
        pancreatitis: evaluate_condition(dry_matter, params, Condition::Pancreatitis),
        renal: evaluate_condition(dry_matter, params, Condition::Renal),
    };

    debug!(
        food = %dry_matter.name,
        pancreatitis = report.pancreatitis.is_suitable(),
        renal = report.renal.is_suitable(),
        "evaluated suitability"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BoundEdit;

    fn sample_result() -> DryMatterResult {
        DryMatterResult {
            name: "Sample".to_string(),
            protein: 27.391,
            fat: 8.696,
            carbs: 55.652,
            fibre: 1.739,
            ash: 6.522,
            phosphorus: 0.87,
            sodium: 0.261,
            chloride: 1.739,
            sugar: 0.0,
            kcal_per_gram: 3.913,
            reference_weight: 23.0,
        }
    }

    #[test]
    fn test_range_inclusive_bounds_pass() {
        assert!(range_test(5.0, Some(5.0), Some(10.0)).pass());
        assert!(range_test(10.0, Some(5.0), Some(10.0)).pass());
    }

    #[test]
    fn test_range_low() {
        let outcome = range_test(4.0, Some(5.0), Some(10.0));
        assert_eq!(outcome.reason, Some(Deviation::Low));
        assert!((outcome.delta.unwrap() - 1.0).abs() < 1e-9);
        assert!((outcome.delta_pc.unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_low_zero_value() {
        let outcome = range_test(0.0, Some(5.0), None);
        assert_eq!(outcome.delta_pc, Some(100.0));
    }

    #[test]
    fn test_range_high() {
        let outcome = range_test(15.0, Some(5.0), Some(12.0));
        assert_eq!(outcome.reason, Some(Deviation::High));
        assert!((outcome.delta.unwrap() - 3.0).abs() < 1e-9);
        assert!((outcome.delta_pc.unwrap() - 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_range_high_zero_bound() {
        let outcome = range_test(0.5, Some(0.0), Some(0.0));
        assert_eq!(outcome.reason, Some(Deviation::High));
        assert_eq!(outcome.delta_pc, Some(100.0));
    }

    #[test]
    fn test_range_one_sided() {
        assert!(range_test(-100.0, None, Some(60.0)).pass());
        assert!(!range_test(61.0, None, Some(60.0)).pass());
        assert!(range_test(1e9, Some(1.0), None).pass());
    }

    #[test]
    fn test_sodium_ratio() {
        let ratio = sodium_g_per_kcal(&sample_result());
        assert!((ratio - 0.000667).abs() < 1e-6);

        let mut no_sodium = sample_result();
        no_sodium.sodium = 0.0;
        assert_eq!(sodium_g_per_kcal(&no_sodium), 0.0);
    }

    #[test]
    fn test_default_test_sets() {
        let report = evaluate(&sample_result(), &ParameterStore::new());
        let panc: Vec<Nutrient> = report.pancreatitis.verdicts.iter().map(|v| v.nutrient).collect();
        let renal: Vec<Nutrient> = report.renal.verdicts.iter().map(|v| v.nutrient).collect();
        assert_eq!(
            panc,
            vec![Nutrient::Fat, Nutrient::Protein, Nutrient::Carbs, Nutrient::Sugar]
        );
        assert_eq!(
            renal,
            vec![Nutrient::Phosphorus, Nutrient::Protein, Nutrient::Sodium]
        );
    }

    #[test]
    fn test_unconfigured_nutrient_is_skipped() {
        let mut params = ParameterStore::new();
        params.set(
            Nutrient::Fat,
            Condition::Pancreatitis,
            BoundEdit::Clear,
            BoundEdit::Clear,
        );
        let report = evaluate_condition(&sample_result(), &params, Condition::Pancreatitis);
        assert!(report.verdicts.iter().all(|v| v.nutrient != Nutrient::Fat));
    }

    #[test]
    fn test_newly_configured_nutrient_is_tested() {
        let mut params = ParameterStore::new();
        params.set(
            Nutrient::Ash,
            Condition::Renal,
            BoundEdit::Keep,
            BoundEdit::Set(5.0),
        );
        let report = evaluate_condition(&sample_result(), &params, Condition::Renal);
        let ash = report
            .verdicts
            .iter()
            .find(|v| v.nutrient == Nutrient::Ash)
            .unwrap();
        assert!(!ash.pass);
        assert!(ash.default_param_changed);
        assert_eq!(ash.unit, "%");
    }

    #[test]
    fn test_pancreatitis_sodium_judged_as_percentage() {
        let mut params = ParameterStore::new();
        params.set(
            Nutrient::Sodium,
            Condition::Pancreatitis,
            BoundEdit::Set(0.1),
            BoundEdit::Set(0.5),
        );
        let report = evaluate_condition(&sample_result(), &params, Condition::Pancreatitis);
        let sodium = report
            .verdicts
            .iter()
            .find(|v| v.nutrient == Nutrient::Sodium)
            .unwrap();
        assert_eq!(sodium.unit, Nutrient::Sodium.measure_unit(Condition::Pancreatitis));
        assert_eq!(sodium.unit, "%");
        assert_eq!(sodium.value, 0.261);
        assert!(sodium.pass);
    }

    #[test]
    fn test_all_unconfigured_is_vacuously_suitable() {
        let mut params = ParameterStore::new();
        for nutrient in Nutrient::ALL {
            params.set(nutrient, Condition::Renal, BoundEdit::Clear, BoundEdit::Clear);
        }
        let report = evaluate_condition(&sample_result(), &params, Condition::Renal);
        assert!(report.is_vacuous());
        assert!(report.is_suitable());
    }
}
