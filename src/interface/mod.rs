pub mod export;
pub mod import;
pub mod prompts;
pub mod render;

pub use export::{write_csv, write_report_json};
pub use import::{load_food, load_foods};
pub use prompts::{prompt_measurement, prompt_number, prompt_threshold_edits, prompt_yes_no};
pub use render::{
    ComparisonRow, display_comparison, display_dry_matter, display_parameters, display_report,
    display_validation_error, format_validation_error,
};
