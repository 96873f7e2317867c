pub mod comparison;
pub mod delta;
pub mod error;
pub mod export;
pub mod report;

pub use comparison::{build_model, Comparison, ComparisonRow};
pub use delta::{delta, series_delta, DeltaOutcome, Deltas, KpiDelta};
pub use error::ExportError;
pub use export::{
    comparison_csv_string, read_comparison_csv, save_comparison_csv, write_comparison_csv,
    write_series_csv, CsvRecord,
};
pub use report::ScenarioReport;
