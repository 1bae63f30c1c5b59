use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Condition, Nutrient};
use crate::params::Bounds;

/// Which side of the configured range a value fell on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deviation {
    Low,
    High,
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Deviation::Low => f.write_str("low"),
            Deviation::High => f.write_str("high"),
        }
    }
}

/// Outcome of testing one nutrient under one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityVerdict {
    pub nutrient: Nutrient,
    pub condition: Condition,

    /// The value that was tested, in `unit`.
    pub value: f64,
    pub unit: String,

    pub pass: bool,

    /// `None` when the test passed.
    pub reason: Option<Deviation>,

    /// Absolute distance from the violated bound.
    pub delta: Option<f64>,

    /// Proportional deviation in percent: "25% too high" means the value is
    /// 1.25 times the bound, not the bound plus 25 percentage points.
    pub delta_pc: Option<f64>,

    /// Whether the bounds used differ from the built-in defaults.
    pub default_param_changed: bool,
    pub defaults: Bounds,
}

impl SuitabilityVerdict {
    /// Human-readable deviation, e.g. "Fat is 12.5% too high".
    ///
    /// Returns `None` for passing verdicts.
    pub fn describe(&self) -> Option<String> {
        let reason = self.reason?;
        let pc = self.delta_pc.unwrap_or(100.0);
        let amount = if pc <= 100.0 {
            format!("{}", (pc * 100.0).round() / 100.0)
        } else {
            "over 100".to_string()
        };
        Some(format!("{} is {}% too {}", self.nutrient, amount, reason))
    }
}

/// All verdicts for one condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionReport {
    pub condition: Condition,
    pub verdicts: Vec<SuitabilityVerdict>,
}

impl ConditionReport {
    /// Suitable iff every tested nutrient passed.
    ///
    /// A condition with no tests at all is vacuously suitable.
    pub fn is_suitable(&self) -> bool {
        self.verdicts.iter().all(|v| v.pass)
    }

    pub fn failures(&self) -> impl Iterator<Item = &SuitabilityVerdict> {
        self.verdicts.iter().filter(|v| !v.pass)
    }

    /// Nutrients whose results rest on non-default thresholds.
    pub fn changed_defaults(&self) -> Vec<Nutrient> {
        self.verdicts
            .iter()
            .filter(|v| v.default_param_changed)
            .map(|v| v.nutrient)
            .collect()
    }

    /// Whether no nutrient was tested; the verdict carries no information.
    pub fn is_vacuous(&self) -> bool {
        self.verdicts.is_empty()
    }
}

/// Verdicts for both conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuitabilityReport {
    pub pancreatitis: ConditionReport,
    pub renal: ConditionReport,
}

impl SuitabilityReport {
    pub fn for_condition(&self, condition: Condition) -> &ConditionReport {
        match condition {
            Condition::Pancreatitis => &self.pancreatitis,
            Condition::Renal => &self.renal,
        }
    }
}
