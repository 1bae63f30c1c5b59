use serde::{Deserialize, Serialize};

/// A single food's "as fed" analysis, as printed on the label.
///
/// Percentages are of the food as fed. A required value of `0.0` counts as
/// missing. Salt, sugar and calories are weights quoted per a reference
/// weight of food, so each carries its own `*_reference_weight`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RawMeasurement {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub moisture: f64,

    #[serde(default)]
    pub protein: f64,

    #[serde(default)]
    pub fat: f64,

    /// Crude carbohydrate. Usually absent from labels, in which case it is
    /// derived from the dry-matter remainder.
    #[serde(default)]
    pub carbs: Option<f64>,

    #[serde(default)]
    pub fibre: f64,

    #[serde(default)]
    pub ash: f64,

    #[serde(default)]
    pub phosphorus: f64,

    #[serde(default)]
    pub sodium: f64,

    #[serde(default)]
    pub chloride: f64,

    /// Added salt (g) per `salt_reference_weight` grams of food.
    #[serde(default)]
    pub salt: Option<f64>,

    #[serde(default)]
    pub salt_reference_weight: Option<f64>,

    /// Added sugar (g) per `sugar_reference_weight` grams of food.
    #[serde(default)]
    pub sugar: Option<f64>,

    #[serde(default)]
    pub sugar_reference_weight: Option<f64>,

    /// Energy (kcal) per `kcal_reference_weight` grams of food.
    #[serde(default)]
    pub kcal: f64,

    #[serde(default)]
    pub kcal_reference_weight: f64,
}

impl RawMeasurement {
    /// A typical wet food, handy for trying the calculator out.
    pub fn example() -> Self {
        Self {
            name: "Example Scrumptious Food".to_string(),
            moisture: 77.0,
            protein: 6.3,
            fat: 2.0,
            carbs: None,
            fibre: 0.4,
            ash: 1.5,
            phosphorus: 0.2,
            sodium: 0.06,
            chloride: 0.4,
            salt: None,
            salt_reference_weight: None,
            sugar: None,
            sugar_reference_weight: None,
            kcal: 90.0,
            kcal_reference_weight: 100.0,
        }
    }

    /// Sum of the crude percentages that must fit within 100% of the food.
    pub fn composition_total(&self) -> f64 {
        self.protein + self.fibre + self.fat + self.ash + self.sodium + self.phosphorus + self.moisture
    }

    /// Name to use in messages; unnamed foods are "This food".
    pub fn display_name(&self) -> &str {
        let trimmed = self.name.trim();
        if trimmed.is_empty() {
            "This food"
        } else {
            trimmed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_composition_total() {
        let food = RawMeasurement::example();
        assert!((food.composition_total() - 87.46).abs() < 1e-9);
    }

    #[test]
    fn test_display_name_falls_back() {
        let mut food = RawMeasurement::example();
        assert_eq!(food.display_name(), "Example Scrumptious Food");
        food.name = "   ".to_string();
        assert_eq!(food.display_name(), "This food");
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let json = r#"{"name": "Kibble", "moisture": 10, "protein": 25, "salt": 1.5}"#;
        let food: RawMeasurement = serde_json::from_str(json).unwrap();
        assert_eq!(food.name, "Kibble");
        assert_eq!(food.fat, 0.0);
        assert_eq!(food.carbs, None);
        assert_eq!(food.salt, Some(1.5));
        assert_eq!(food.salt_reference_weight, None);
    }
}
