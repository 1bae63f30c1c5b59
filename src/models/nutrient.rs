use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strsim::jaro_winkler;

use crate::error::DinnerError;

/// A food constituent tracked by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Protein,
    Fat,
    Carbs,
    Fibre,
    Sugar,
    Sodium,
    Chloride,
    Ash,
    Phosphorus,
}

impl Nutrient {
    pub const COUNT: usize = 9;

    /// All nutrients, in table order.
    pub const ALL: [Nutrient; Nutrient::COUNT] = [
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbs,
        Nutrient::Fibre,
        Nutrient::Sugar,
        Nutrient::Sodium,
        Nutrient::Chloride,
        Nutrient::Ash,
        Nutrient::Phosphorus,
    ];

    /// Position in [`Nutrient::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Short machine key, as used in parameter files.
    pub fn key(self) -> &'static str {
        match self {
            Nutrient::Protein => "protein",
            Nutrient::Fat => "fat",
            Nutrient::Carbs => "carbs",
            Nutrient::Fibre => "fibre",
            Nutrient::Sugar => "sugar",
            Nutrient::Sodium => "sodium",
            Nutrient::Chloride => "chloride",
            Nutrient::Ash => "ash",
            Nutrient::Phosphorus => "phosphorus",
        }
    }

    /// Human-readable description.
    pub fn desc(self) -> &'static str {
        match self {
            Nutrient::Protein => "Protein",
            Nutrient::Fat => "Fat",
            Nutrient::Carbs => "Carbohydrates",
            Nutrient::Fibre => "Fibre",
            Nutrient::Sugar => "Added Sugars",
            Nutrient::Sodium => "Sodium",
            Nutrient::Chloride => "Chloride",
            Nutrient::Ash => "Ash",
            Nutrient::Phosphorus => "Phosphorus",
        }
    }

    /// Unit of the value this nutrient is judged on under `condition`.
    ///
    /// Renal sodium is expressed per kilocalorie; everything else is a
    /// dry-matter percentage.
    pub fn measure_unit(self, condition: Condition) -> &'static str {
        match (condition, self) {
            (Condition::Renal, Nutrient::Sodium) => "g/kcal",
            _ => "%",
        }
    }

    /// Closest nutrient name to `input` by Jaro-Winkler similarity, if any
    /// is reasonably close.
    pub fn suggest(input: &str) -> Option<Nutrient> {
        let needle = input.trim().to_lowercase();
        Nutrient::ALL
            .into_iter()
            .map(|n| {
                let by_key = jaro_winkler(n.key(), &needle);
                let by_desc = jaro_winkler(&n.desc().to_lowercase(), &needle);
                (n, by_key.max(by_desc))
            })
            .filter(|(_, score)| *score > 0.7)
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(n, _)| n)
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.desc())
    }
}

impl FromStr for Nutrient {
    type Err = DinnerError;

    /// Matches the key or the description, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Nutrient::ALL
            .into_iter()
            .find(|n| n.key() == needle || n.desc().to_lowercase() == needle)
            .ok_or_else(|| DinnerError::UnknownNutrient {
                input: s.to_string(),
                suggestion: Nutrient::suggest(s),
            })
    }
}

/// A medical condition a diet is judged against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Pancreatitis,
    Renal,
}

impl Condition {
    pub const ALL: [Condition; 2] = [Condition::Pancreatitis, Condition::Renal];

    pub fn key(self) -> &'static str {
        match self {
            Condition::Pancreatitis => "pancreatitis",
            Condition::Renal => "renal",
        }
    }

    /// Heading used when presenting results for this condition.
    pub fn diet_name(self) -> &'static str {
        match self {
            Condition::Pancreatitis => "Pancreatitis Diet",
            Condition::Renal => "Kidney Disease (Renal) Diet",
        }
    }

    /// Phrase completing "unsuitable for dogs with ...".
    pub fn patient_phrase(self) -> &'static str {
        match self {
            Condition::Pancreatitis => "pancreatitis",
            Condition::Renal => "kidney disease",
        }
    }

    /// Order in which nutrients are tested under this condition.
    ///
    /// The nutrients with built-in thresholds come first; the rest follow in
    /// table order and are only tested once a bound is configured for them.
    pub fn evaluation_order(self) -> [Nutrient; Nutrient::COUNT] {
        match self {
            Condition::Pancreatitis => [
                Nutrient::Fat,
                Nutrient::Protein,
                Nutrient::Carbs,
                Nutrient::Sugar,
                Nutrient::Fibre,
                Nutrient::Sodium,
                Nutrient::Chloride,
                Nutrient::Ash,
                Nutrient::Phosphorus,
            ],
            Condition::Renal => [
                Nutrient::Phosphorus,
                Nutrient::Protein,
                Nutrient::Sodium,
                Nutrient::Fat,
                Nutrient::Carbs,
                Nutrient::Fibre,
                Nutrient::Sugar,
                Nutrient::Chloride,
                Nutrient::Ash,
            ],
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Condition {
    type Err = DinnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pancreatitis" | "panc" => Ok(Condition::Pancreatitis),
            "renal" | "kidney" => Ok(Condition::Renal),
            _ => Err(DinnerError::UnknownCondition(s.to_string())),
        }
    }
}
