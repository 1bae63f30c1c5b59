use crate::calculator::ValidationError;
use crate::models::{Condition, ConditionReport, DryMatterResult, Nutrient, SuitabilityReport};
use crate::params::ParameterStore;

/// Explains what the "% too high/low" figure means.
pub const PROPORTIONAL_NOTE: &str = "Percentages are proportional differences: \"25% too high\" \
     means the food holds 1.25 times the recommended amount, not 25 percentage points more.";

/// Display the dry matter basis values of a food.
pub fn display_dry_matter(result: &DryMatterResult) {
    println!();
    println!("=== Dry Matter Basis: {} ===", result.name);
    println!();
    println!("Calories per dry matter gram: {:.2} kcal", result.kcal_per_gram);
    println!();

    let width = Nutrient::ALL
        .iter()
        .map(|n| n.desc().len())
        .max()
        .unwrap_or(10);

    for nutrient in display_order() {
        println!(
            "  {:<width$}  {:>8.2} %",
            nutrient.desc(),
            result.value(nutrient),
            width = width
        );
    }
    println!();
}

fn display_order() -> [Nutrient; Nutrient::COUNT] {
    [
        Nutrient::Fat,
        Nutrient::Protein,
        Nutrient::Carbs,
        Nutrient::Fibre,
        Nutrient::Ash,
        Nutrient::Phosphorus,
        Nutrient::Sodium,
        Nutrient::Chloride,
        Nutrient::Sugar,
    ]
}

/// Display the suitability verdicts for both conditions.
pub fn display_report(food_name: &str, report: &SuitabilityReport) {
    println!("=== Diet Suitability ===");
    for condition in Condition::ALL {
        println!();
        display_condition(food_name, report.for_condition(condition));
    }
    println!();
}

fn display_condition(food_name: &str, report: &ConditionReport) {
    let condition = report.condition;
    println!("--- {} ---", condition.diet_name());

    if report.is_suitable() {
        println!(
            "{} is suitable for a {} diet.",
            food_name,
            condition.key()
        );
        if report.is_vacuous() {
            println!("(No thresholds are configured for this diet, so nothing was tested.)");
        }
        let changed = report.changed_defaults();
        if !changed.is_empty() {
            let names: Vec<&str> = changed.iter().map(|n| n.desc()).collect();
            println!(
                "Warning: the default calculation parameters have been changed for: {}",
                names.join(", ")
            );
        }
        return;
    }

    println!(
        "{} is unsuitable for dogs with {}.",
        food_name,
        condition.patient_phrase()
    );
    for verdict in report.failures() {
        if let Some(line) = verdict.describe() {
            let changed = if verdict.default_param_changed {
                " (non-default threshold)"
            } else {
                ""
            };
            println!("  {}{}", line, changed);
        }
    }
    println!("  {}", PROPORTIONAL_NOTE);
}

/// Display every configured threshold, per condition.
pub fn display_parameters(store: &ParameterStore) {
    for condition in Condition::ALL {
        println!();
        println!("=== {} ===", condition.diet_name());
        println!();
        println!(
            "  {:<14} {:>10} {:>10}  {:<7}",
            "Nutrient", "Min", "Max", "Unit"
        );

        let rows = store.configured(condition);
        if rows.is_empty() {
            println!("  (none)");
            continue;
        }

        for (nutrient, rule) in rows {
            let marker = if rule.default_changed { "  *changed" } else { "" };
            println!(
                "  {:<14} {:>10} {:>10}  {:<7}{}",
                nutrient.desc(),
                fmt_bound(rule.low),
                fmt_bound(rule.high),
                nutrient.measure_unit(condition),
                marker
            );
        }
    }
    println!();
}

/// A bound for display; an unset bound is "-".
pub(crate) fn fmt_bound(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Why a food's inputs were rejected, one diagnostic per line.
pub fn format_validation_error(food_name: &str, err: &ValidationError) -> String {
    let mut out = format!("{}: cannot calculate until these are corrected:", food_name);
    for issue in &err.issues {
        out.push_str("\n  - ");
        out.push_str(&issue.to_string());
    }
    out
}

/// Display why a food's inputs were rejected.
pub fn display_validation_error(food_name: &str, err: &ValidationError) {
    println!("{}", format_validation_error(food_name, err));
}

/// One row of a multi-food comparison.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub dry_matter: DryMatterResult,
    pub report: SuitabilityReport,
}

/// Display several foods side by side.
pub fn display_comparison(rows: &[ComparisonRow]) {
    if rows.is_empty() {
        println!("No foods to compare.");
        return;
    }

    let width = rows
        .iter()
        .map(|r| r.dry_matter.name.len())
        .max()
        .unwrap_or(10)
        .max(4);

    println!();
    println!("=== Dry Matter Comparison ===");
    println!();
    println!(
        "{:<width$}  {:>7} {:>7} {:>7} {:>7} {:>7} {:>7} {:>8}  {:<12} {:<12}",
        "Food",
        "Fat",
        "Protein",
        "Carbs",
        "Fibre",
        "Phos",
        "Sodium",
        "kcal/g",
        "Pancreatitis",
        "Renal",
        width = width
    );

    for row in rows {
        let dm = &row.dry_matter;
        println!(
            "{:<width$}  {:>7.2} {:>7.2} {:>7.2} {:>7.2} {:>7.3} {:>7.3} {:>8.3}  {:<12} {:<12}",
            dm.name,
            dm.fat,
            dm.protein,
            dm.carbs,
            dm.fibre,
            dm.phosphorus,
            dm.sodium,
            dm.kcal_per_gram,
            suitability_label(&row.report.pancreatitis),
            suitability_label(&row.report.renal),
            width = width
        );
    }
    println!();
}

/// "suitable" / "unsuitable" label for a condition report.
pub fn suitability_label(report: &ConditionReport) -> &'static str {
    if report.is_suitable() {
        "suitable"
    } else {
        "unsuitable"
    }
}
