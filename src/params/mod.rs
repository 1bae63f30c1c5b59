mod persistence;
mod store;

pub use persistence::{SavedThreshold, load_store, save_store};
pub use store::{BoundEdit, Bounds, NutrientThreshold, ParameterStore, ThresholdRule};
