use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use dogs_dinner_rs::calculator::{convert, evaluate};
use dogs_dinner_rs::cli::{Cli, Command, ParamsAction};
use dogs_dinner_rs::error::{DinnerError, Result};
use dogs_dinner_rs::interface::{
    ComparisonRow, display_comparison, display_dry_matter, display_parameters, display_report,
    display_validation_error, load_food, load_foods, prompt_measurement,
    prompt_threshold_edits, prompt_yes_no, write_csv, write_report_json,
};
use dogs_dinner_rs::models::{Condition, Nutrient, RawMeasurement};
use dogs_dinner_rs::params::{BoundEdit, load_store, save_store};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => {}
        // Already shown as a list of diagnostics.
        Err(DinnerError::Validation(_)) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("dogs_dinner_rs={}", level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let params_path = cli.params;

    match cli.command.unwrap_or_default() {
        Command::Evaluate {
            food,
            example,
            csv,
            json,
        } => cmd_evaluate(&params_path, food, example, csv, json),
        Command::Compare { foods, csv, json } => cmd_compare(&params_path, &foods, csv, json),
        Command::Params { action } => cmd_params(&params_path, action.unwrap_or_default()),
    }
}

/// Convert one food and report its suitability for both diets.
fn cmd_evaluate(
    params_path: &Path,
    food: Option<PathBuf>,
    example: bool,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let store = load_store(params_path)?;

    let raw = match (food, example) {
        (_, true) => RawMeasurement::example(),
        (Some(path), false) => load_food(path)?,
        (None, false) => {
            println!("Enter the \"as fed\" values from the food's label.");
            println!("A value you don't know can be left as 0.");
            println!();
            prompt_measurement()?
        }
    };

    let dry_matter = match convert(&raw) {
        Ok(dm) => dm,
        Err(e) => {
            display_validation_error(raw.display_name(), &e);
            return Err(e.into());
        }
    };

    let report = evaluate(&dry_matter, &store);
    display_dry_matter(&dry_matter);
    display_report(raw.display_name(), &report);

    export(&[ComparisonRow { dry_matter, report }], csv, json)
}

/// Convert and judge every food in a list, skipping any that can't be converted.
fn cmd_compare(
    params_path: &Path,
    foods_path: &Path,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    let store = load_store(params_path)?;
    let foods = load_foods(foods_path)?;
    info!(count = foods.len(), "loaded foods");

    let mut rows = Vec::with_capacity(foods.len());
    for raw in &foods {
        match convert(raw) {
            Ok(dry_matter) => {
                let report = evaluate(&dry_matter, &store);
                rows.push(ComparisonRow { dry_matter, report });
            }
            Err(e) => {
                warn!(food = raw.display_name(), "skipping food with invalid inputs");
                display_validation_error(raw.display_name(), &e);
            }
        }
    }

    display_comparison(&rows);
    if rows.len() < foods.len() {
        println!("{} of {} foods skipped.", foods.len() - rows.len(), foods.len());
    }

    export(&rows, csv, json)
}

fn export(rows: &[ComparisonRow], csv: Option<PathBuf>, json: Option<PathBuf>) -> Result<()> {
    if let Some(path) = csv {
        write_csv(rows, &path)?;
        println!("Wrote CSV to {}", path.display());
    }
    if let Some(path) = json {
        write_report_json(rows, &path)?;
        println!("Wrote JSON to {}", path.display());
    }
    Ok(())
}

/// Show, change or reset the suitability thresholds.
fn cmd_params(params_path: &Path, action: ParamsAction) -> Result<()> {
    let mut store = load_store(params_path)?;

    match action {
        ParamsAction::Show => {
            display_parameters(&store);
            if store.has_changes() {
                println!("* differs from the default value");
            }
        }
        ParamsAction::Set {
            nutrient,
            condition,
            low,
            high,
            clear_low,
            clear_high,
        } => {
            let nutrient: Nutrient = nutrient.parse()?;
            let condition: Condition = condition.parse()?;
            let low_edit = bound_edit(low, clear_low);
            let high_edit = bound_edit(high, clear_high);

            if store.try_set(nutrient, condition, low_edit, high_edit)? {
                save_store(params_path, &store)?;
                println!("Updated {} for the {}.", nutrient, condition.diet_name());
            } else {
                println!("Nothing changed.");
            }
        }
        ParamsAction::Edit { condition } => {
            let conditions = match condition {
                Some(name) => vec![name.parse::<Condition>()?],
                None => Condition::ALL.to_vec(),
            };

            let mut changed = 0;
            for condition in conditions {
                changed += prompt_threshold_edits(&mut store, condition)?;
            }

            if changed == 0 {
                println!("Nothing changed.");
            } else if prompt_yes_no("Save the changed parameters?", true)? {
                save_store(params_path, &store)?;
                println!("Parameters saved.");
            }
        }
        ParamsAction::Reset => {
            store.reset_all();
            save_store(params_path, &store)?;
            println!("All parameters restored to their defaults.");
        }
    }

    Ok(())
}

fn bound_edit(value: Option<f64>, clear: bool) -> BoundEdit {
    match (value, clear) {
        (_, true) => BoundEdit::Clear,
        (Some(v), false) => BoundEdit::Set(v),
        (None, false) => BoundEdit::Keep,
    }
}
