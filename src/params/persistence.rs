use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DinnerError, Result};
use crate::models::{Condition, Nutrient};
use crate::params::store::{Bounds, ParameterStore};

/// One saved rule as it appears in the overrides file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedThreshold {
    pub nutrient: Nutrient,
    pub condition: Condition,
    pub low: Option<f64>,
    pub high: Option<f64>,
    #[serde(default)]
    pub default_changed: bool,
}

/// Load a parameter store from a JSON overrides file.
///
/// A missing file yields the built-in defaults. Rules absent from the file
/// keep their defaults; later entries for the same rule win.
pub fn load_store<P: AsRef<Path>>(path: P) -> Result<ParameterStore> {
    let path = path.as_ref();
    let mut store = ParameterStore::new();

    if !path.exists() {
        info!(path = %path.display(), "no parameter file, using defaults");
        return Ok(store);
    }

    let content = fs::read_to_string(path)?;
    let saved: Vec<SavedThreshold> = serde_json::from_str(&content)?;
    for entry in &saved {
        let bounds = Bounds::new(entry.low, entry.high);
        bounds.check().map_err(|reason| {
            DinnerError::InvalidInput(format!(
                "{}: {} ({}): {}",
                path.display(),
                entry.nutrient,
                entry.condition,
                reason
            ))
        })?;
        store.restore(entry.nutrient, entry.condition, bounds, entry.default_changed);
    }

    info!(path = %path.display(), entries = saved.len(), "loaded parameters");
    Ok(store)
}

/// Save the current value of every rule to a JSON overrides file.
pub fn save_store<P: AsRef<Path>>(path: P, store: &ParameterStore) -> Result<()> {
    let path = path.as_ref();
    let saved: Vec<SavedThreshold> = store
        .thresholds()
        .flat_map(|t| {
            Condition::ALL.into_iter().map(move |condition| {
                let rule = t.rule(condition);
                SavedThreshold {
                    nutrient: t.nutrient,
                    condition,
                    low: rule.low,
                    high: rule.high,
                    default_changed: rule.default_changed,
                }
            })
        })
        .collect();

    let json = serde_json::to_string_pretty(&saved)?;
    fs::write(path, json)?;
    info!(path = %path.display(), "saved parameters");
    Ok(())
}
