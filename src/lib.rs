pub mod calculator;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod params;

pub use calculator::{convert, evaluate};
pub use error::{DinnerError, Result};
pub use models::{DryMatterResult, RawMeasurement, SuitabilityReport, SuitabilityVerdict};
pub use params::ParameterStore;
