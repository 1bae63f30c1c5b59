pub mod constants;
pub mod conversions;
pub mod evaluation;
pub mod validation;

pub use constants::*;
pub use conversions::{
    convert, convert_uniform, dry_matter_carbs, dry_matter_chloride, dry_matter_reference_weight,
    dry_matter_sodium, dry_matter_sugar, kcal_per_dry_matter_gram,
};
pub use evaluation::{
    RangeOutcome, evaluate, evaluate_condition, evaluate_nutrient, judged_value, range_test,
    sodium_g_per_kcal,
};
pub use validation::{ValidationError, ValidationIssue, enforce_required};
