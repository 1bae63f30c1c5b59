mod dry_matter;
mod measurement;
mod nutrient;
mod verdict;

pub use dry_matter::DryMatterResult;
pub use measurement::RawMeasurement;
pub use nutrient::{Condition, Nutrient};
pub use verdict::{ConditionReport, Deviation, SuitabilityReport, SuitabilityVerdict};
