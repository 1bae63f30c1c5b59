use serde::{Deserialize, Serialize};

use crate::models::Nutrient;

/// A food's analysis normalized to dry matter basis.
///
/// Nutrient fields are dry-matter percentages. Built fresh by
/// [`crate::calculator::convert`] and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DryMatterResult {
    pub name: String,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fibre: f64,
    pub ash: f64,
    pub phosphorus: f64,
    pub sodium: f64,
    pub chloride: f64,
    pub sugar: f64,

    /// Energy per gram of dry matter (kcal/g).
    pub kcal_per_gram: f64,

    /// Dry mass (g) of the food's calorie reference weight.
    pub reference_weight: f64,
}

impl DryMatterResult {
    /// Dry-matter percentage of a nutrient.
    pub fn value(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fibre => self.fibre,
            Nutrient::Sugar => self.sugar,
            Nutrient::Sodium => self.sodium,
            Nutrient::Chloride => self.chloride,
            Nutrient::Ash => self.ash,
            Nutrient::Phosphorus => self.phosphorus,
        }
    }
}
