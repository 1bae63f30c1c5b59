use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

/// Dog's Dinner: dry matter basis calculator for renal and pancreatitis diets.
#[derive(Parser, Debug)]
#[command(name = "dogs_dinner")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the parameter overrides JSON file.
    #[arg(
        short,
        long,
        global = true,
        env = "DOGS_DINNER_PARAMS",
        default_value = "dogs_dinner_params.json"
    )]
    pub params: PathBuf,

    /// Log more detail (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert one food to dry matter basis and judge its suitability.
    Evaluate {
        /// JSON file holding the food's "as fed" analysis. Prompts if omitted.
        #[arg(long, conflicts_with = "example")]
        food: Option<PathBuf>,

        /// Use the built-in example food.
        #[arg(long)]
        example: bool,

        /// Write the results to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the full results to a JSON file.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Compare several foods from a JSON list.
    Compare {
        /// JSON file holding a list of foods.
        foods: PathBuf,

        /// Write the comparison to a CSV file.
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Write the full results to a JSON file.
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// View or change the calculation parameters.
    Params {
        #[command(subcommand)]
        action: Option<ParamsAction>,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Evaluate {
            food: None,
            example: false,
            csv: None,
            json: None,
        }
    }
}

#[derive(Subcommand, Debug, Default)]
pub enum ParamsAction {
    /// Show the thresholds in force.
    #[default]
    Show,

    /// Change one threshold.
    Set {
        /// Nutrient name, e.g. "fat" or "phosphorus".
        nutrient: String,

        /// Condition: "pancreatitis" or "renal".
        condition: String,

        /// New minimum dry matter value.
        #[arg(long, conflicts_with = "clear_low")]
        low: Option<f64>,

        /// New maximum dry matter value.
        #[arg(long, conflicts_with = "clear_high")]
        high: Option<f64>,

        /// Remove the minimum.
        #[arg(long)]
        clear_low: bool,

        /// Remove the maximum.
        #[arg(long)]
        clear_high: bool,
    },

    /// Edit thresholds interactively.
    Edit {
        /// Only edit this condition's thresholds.
        condition: Option<String>,
    },

    /// Restore every threshold to its default.
    Reset,
}
