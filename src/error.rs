use thiserror::Error;

use crate::calculator::ValidationError;
use crate::models::Nutrient;

#[derive(Debug, Error)]
pub enum DinnerError {
    #[error("Unknown nutrient: {input}{}", suggestion_hint(.suggestion))]
    UnknownNutrient {
        input: String,
        suggestion: Option<Nutrient>,
    },

    #[error("Unknown condition: {0} (expected 'pancreatitis' or 'renal')")]
    UnknownCondition(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn suggestion_hint(suggestion: &Option<Nutrient>) -> String {
    suggestion
        .map(|n| format!(" (did you mean '{}'?)", n.key()))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, DinnerError>;
