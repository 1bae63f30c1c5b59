use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::calculator::constants::default_bounds;
use crate::error::{DinnerError, Result};
use crate::models::{Condition, Nutrient};

/// A low/high range. `None` on either side means "no constraint".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub low: Option<f64>,
    pub high: Option<f64>,
}

impl Bounds {
    pub const UNCONSTRAINED: Bounds = Bounds::new(None, None);

    pub const fn new(low: Option<f64>, high: Option<f64>) -> Self {
        Self { low, high }
    }

    /// Whether neither side is set.
    pub fn is_unconstrained(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    /// Check that each set side is a finite number of zero or more and that
    /// the minimum does not exceed the maximum.
    pub fn check(&self) -> std::result::Result<(), String> {
        for (side, value) in [("minimum", self.low), ("maximum", self.high)] {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(format!("{} must be a number of zero or more, not {}", side, v));
                }
            }
        }
        if let (Some(low), Some(high)) = (self.low, self.high) {
            if low > high {
                return Err(format!("minimum {} exceeds maximum {}", low, high));
            }
        }
        Ok(())
    }
}

/// How one side of a range should change in [`ParameterStore::set`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoundEdit {
    #[default]
    Keep,
    Set(f64),
    Clear,
}

impl BoundEdit {
    /// The value a bound takes after this edit.
    pub fn apply_to(self, current: Option<f64>) -> Option<f64> {
        match self {
            BoundEdit::Keep => current,
            BoundEdit::Set(value) => Some(value),
            BoundEdit::Clear => None,
        }
    }
}

impl From<Option<f64>> for BoundEdit {
    /// `None` leaves the bound untouched.
    fn from(value: Option<f64>) -> Self {
        value.map_or(BoundEdit::Keep, BoundEdit::Set)
    }
}

/// Threshold for one nutrient under one condition.
#[derive(Debug, Clone, PartialEq)]
pub struct ThresholdRule {
    pub low: Option<f64>,
    pub high: Option<f64>,
    pub default_changed: bool,
    defaults: Bounds,
}

impl ThresholdRule {
    fn new(defaults: Bounds) -> Self {
        Self {
            low: defaults.low,
            high: defaults.high,
            default_changed: false,
            defaults,
        }
    }

    /// The built-in range this rule started from. Never changes.
    pub fn defaults(&self) -> Bounds {
        self.defaults
    }

    /// The range currently in force.
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.low, self.high)
    }

    /// Whether at least one side of the range is set.
    pub fn is_configured(&self) -> bool {
        !self.bounds().is_unconstrained()
    }

    fn reset(&mut self) {
        self.low = self.defaults.low;
        self.high = self.defaults.high;
        self.default_changed = false;
    }
}

/// Both condition rules for one nutrient.
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientThreshold {
    pub nutrient: Nutrient,
    pancreatitis: ThresholdRule,
    renal: ThresholdRule,
}

impl NutrientThreshold {
    fn with_defaults(nutrient: Nutrient) -> Self {
        Self {
            nutrient,
            pancreatitis: ThresholdRule::new(default_bounds(nutrient, Condition::Pancreatitis)),
            renal: ThresholdRule::new(default_bounds(nutrient, Condition::Renal)),
        }
    }

    pub fn rule(&self, condition: Condition) -> &ThresholdRule {
        match condition {
            Condition::Pancreatitis => &self.pancreatitis,
            Condition::Renal => &self.renal,
        }
    }

    fn rule_mut(&mut self, condition: Condition) -> &mut ThresholdRule {
        match condition {
            Condition::Pancreatitis => &mut self.pancreatitis,
            Condition::Renal => &mut self.renal,
        }
    }
}

/// Threshold configuration for every nutrient and condition.
///
/// One store per session; pass it by reference to the evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    /// Indexed by [`Nutrient::index`].
    thresholds: Vec<NutrientThreshold>,
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ParameterStore {
    /// Create a store holding the built-in defaults.
    pub fn new() -> Self {
        Self {
            thresholds: Nutrient::ALL
                .into_iter()
                .map(NutrientThreshold::with_defaults)
                .collect(),
        }
    }

    /// Current rule for a nutrient under a condition.
    pub fn get(&self, nutrient: Nutrient, condition: Condition) -> &ThresholdRule {
        self.thresholds[nutrient.index()].rule(condition)
    }

    /// Overwrite the edited sides of a rule.
    ///
    /// Marks the rule as changed from default when any edited side differs
    /// from the value it replaces. Returns whether anything changed.
    pub fn set(
        &mut self,
        nutrient: Nutrient,
        condition: Condition,
        low: BoundEdit,
        high: BoundEdit,
    ) -> bool {
        let rule = self.thresholds[nutrient.index()].rule_mut(condition);
        let low_changed = apply_edit(&mut rule.low, low);
        let high_changed = apply_edit(&mut rule.high, high);
        let changed = low_changed || high_changed;

        if changed {
            rule.default_changed = true;
            info!(
                nutrient = nutrient.key(),
                condition = condition.key(),
                low = ?rule.low,
                high = ?rule.high,
                "threshold updated"
            );
        }
        changed
    }

    /// Check an edit against the rule it changes, then apply it.
    ///
    /// Rejects non-finite or negative bounds and a minimum above the
    /// maximum, leaving the rule untouched.
    pub fn try_set(
        &mut self,
        nutrient: Nutrient,
        condition: Condition,
        low: BoundEdit,
        high: BoundEdit,
    ) -> Result<bool> {
        let rule = self.get(nutrient, condition);
        let proposed = Bounds::new(low.apply_to(rule.low), high.apply_to(rule.high));
        proposed.check().map_err(|reason| {
            DinnerError::InvalidInput(format!("{} ({}): {}", nutrient, condition, reason))
        })?;
        Ok(self.set(nutrient, condition, low, high))
    }

    /// Restore every rule to its built-in defaults.
    pub fn reset_all(&mut self) {
        for threshold in &mut self.thresholds {
            for condition in Condition::ALL {
                threshold.rule_mut(condition).reset();
            }
        }
        info!("all thresholds restored to defaults");
    }

    /// Reinstate a previously saved rule.
    ///
    /// The rule is flagged as changed when the saved flag says so or when
    /// the bounds differ from the defaults.
    pub fn restore(
        &mut self,
        nutrient: Nutrient,
        condition: Condition,
        bounds: Bounds,
        default_changed: bool,
    ) {
        let rule = self.thresholds[nutrient.index()].rule_mut(condition);
        rule.low = bounds.low;
        rule.high = bounds.high;
        rule.default_changed = default_changed || bounds != rule.defaults;
        debug!(
            nutrient = nutrient.key(),
            condition = condition.key(),
            "threshold restored"
        );
    }

    /// Every nutrient's thresholds, in table order.
    pub fn thresholds(&self) -> impl Iterator<Item = &NutrientThreshold> {
        self.thresholds.iter()
    }

    /// Rules that are configured under `condition`, in table order.
    pub fn configured(&self, condition: Condition) -> Vec<(Nutrient, &ThresholdRule)> {
        self.thresholds
            .iter()
            .map(|t| (t.nutrient, t.rule(condition)))
            .filter(|(_, rule)| rule.is_configured())
            .collect()
    }

    /// Whether any rule differs from its defaults.
    pub fn has_changes(&self) -> bool {
        self.thresholds
            .iter()
            .any(|t| Condition::ALL.iter().any(|&c| t.rule(c).default_changed))
    }
}

fn apply_edit(slot: &mut Option<f64>, edit: BoundEdit) -> bool {
    if edit == BoundEdit::Keep {
        return false;
    }
    let new_value = edit.apply_to(*slot);
    if *slot == new_value {
        return false;
    }
    *slot = new_value;
    true
}
