//! Data module - CSV loading, cleaning and filtering

pub mod cleaner;
mod filter;
mod loader;
mod table;

pub use filter::{apply_filter, available_metrics, available_years, FilterSelection, FilteredTable};
pub use loader::{load_table, read_raw_table, LoadOptions, TableCache, DEFAULT_DELIMITER};
pub use table::{CleanTable, LoadReport, MONTH_COLUMN, PERIOD_COLUMN, YEAR_COLUMN};
