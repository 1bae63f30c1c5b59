use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::error::{DinnerError, Result};
use crate::models::RawMeasurement;

/// A food file holds either one food or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum FoodFile {
    Many(Vec<RawMeasurement>),
    One(RawMeasurement),
}

/// Load every food from a JSON file.
pub fn load_foods<P: AsRef<Path>>(path: P) -> Result<Vec<RawMeasurement>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let foods = match serde_json::from_str(&content)? {
        FoodFile::Many(foods) => foods,
        FoodFile::One(food) => vec![food],
    };
    info!(path = %path.display(), foods = foods.len(), "loaded foods");
    Ok(foods)
}

/// Load exactly one food from a JSON file.
pub fn load_food<P: AsRef<Path>>(path: P) -> Result<RawMeasurement> {
    let mut foods = load_foods(path)?;
    if foods.len() != 1 {
        return Err(DinnerError::InvalidInput(format!(
            "expected one food, found {}; use 'compare' for several",
            foods.len()
        )));
    }
    Ok(foods.remove(0))
}
