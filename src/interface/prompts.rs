use dialoguer::{Confirm, Input, Select};

use crate::error::{DinnerError, Result};
use crate::interface::render::fmt_bound;
use crate::models::{Condition, Nutrient, RawMeasurement};
use crate::params::{BoundEdit, ParameterStore};

/// Prompt for a non-negative number, re-asking until one is given.
pub fn prompt_number(prompt: &str, default: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .validate_with(|s: &String| -> std::result::Result<(), String> {
            match s.trim().parse::<f64>() {
                Ok(v) if v.is_finite() && v >= 0.0 => Ok(()),
                _ => Err("Enter a number of zero or more".to_string()),
            }
        })
        .interact_text()?;

    input
        .trim()
        .parse()
        .map_err(|_| DinnerError::InvalidInput(format!("Invalid number: {}", input)))
}

/// Prompt for an optional quantity; zero means "not given".
fn prompt_optional(prompt: &str) -> Result<Option<f64>> {
    let value = prompt_number(prompt, 0.0)?;
    Ok((value != 0.0).then_some(value))
}

/// Parse a threshold bound; blank means unconstrained.
fn parse_bound(input: &str) -> std::result::Result<Option<f64>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
        _ => Err("Enter a number of zero or more, or leave blank".to_string()),
    }
}

/// Prompt for a bound that may be left blank (unconstrained).
fn prompt_bound(prompt: &str, current: Option<f64>) -> Result<Option<f64>> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .with_initial_text(current.map(|v| v.to_string()).unwrap_or_default())
        .allow_empty(true)
        .validate_with(|s: &String| parse_bound(s).map(|_| ()))
        .interact_text()?;

    parse_bound(&input).map_err(DinnerError::InvalidInput)
}

/// Collect a food's "as fed" analysis from the label.
///
/// Carbohydrate is not asked for; it is derived from the remainder.
pub fn prompt_measurement() -> Result<RawMeasurement> {
    let name: String = Input::new()
        .with_prompt("Food name")
        .allow_empty(true)
        .interact_text()?;

    let kcal = prompt_number("Calories (kcal)", 0.0)?;
    let kcal_reference_weight = prompt_number("  per weight of food (g)", 0.0)?;
    let moisture = prompt_number(
        "Moisture content (%) [dry foods not listing it are around 10%]",
        0.0,
    )?;
    let fat = prompt_number("Crude fat (%)", 0.0)?;
    let protein = prompt_number("Crude protein (%)", 0.0)?;
    let fibre = prompt_number("Crude fibre (%)", 0.0)?;
    let ash = prompt_number("Ash (%)", 0.0)?;
    let phosphorus = prompt_number("Phosphorus (%)", 0.0)?;
    let sodium = prompt_number("Sodium (%)", 0.0)?;
    let chloride = prompt_number("Chloride (%)", 0.0)?;

    let salt = prompt_optional("Added salt (g) [40% sodium, 60% chloride]")?;
    let salt_reference_weight = match salt {
        Some(_) => prompt_optional("  per weight of food (g)")?,
        None => None,
    };

    let sugar = prompt_optional("Added sugars (g)")?;
    let sugar_reference_weight = match sugar {
        Some(_) => prompt_optional("  per weight of food (g)")?,
        None => None,
    };

    Ok(RawMeasurement {
        name,
        moisture,
        protein,
        fat,
        carbs: None,
        fibre,
        ash,
        phosphorus,
        sodium,
        chloride,
        salt,
        salt_reference_weight,
        sugar,
        sugar_reference_weight,
        kcal,
        kcal_reference_weight,
    })
}

/// Walk the configured thresholds for a condition and let the user edit them.
///
/// Returns the number of rules that changed.
pub fn prompt_threshold_edits(store: &mut ParameterStore, condition: Condition) -> Result<usize> {
    let rows: Vec<Nutrient> = store
        .configured(condition)
        .into_iter()
        .map(|(n, _)| n)
        .collect();

    if rows.is_empty() {
        println!("No thresholds configured for the {}.", condition.diet_name());
        return Ok(0);
    }

    let mut changed = 0;
    loop {
        let mut options: Vec<String> = rows
            .iter()
            .map(|&n| {
                let rule = store.get(n, condition);
                format!(
                    "{:<14} {} - {} {}",
                    n.desc(),
                    fmt_bound(rule.low),
                    fmt_bound(rule.high),
                    n.measure_unit(condition)
                )
            })
            .collect();
        options.push("Done".to_string());

        let selection = Select::new()
            .with_prompt(format!("Edit {} thresholds", condition.diet_name()))
            .items(&options)
            .default(0)
            .interact()?;

        let Some(&nutrient) = rows.get(selection) else {
            break;
        };

        let rule = store.get(nutrient, condition);
        let low = prompt_bound("Minimum dry matter (blank for none)", rule.low)?;
        let high = prompt_bound("Maximum dry matter (blank for none)", rule.high)?;

        match store.try_set(nutrient, condition, to_edit(low), to_edit(high)) {
            Ok(true) => changed += 1,
            Ok(false) => {}
            Err(e) => println!("{}; left unchanged.", e),
        }
    }

    Ok(changed)
}

fn to_edit(value: Option<f64>) -> BoundEdit {
    value.map_or(BoundEdit::Clear, BoundEdit::Set)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
