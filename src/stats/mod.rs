//! Stats module - Descriptive statistics for the filtered series

mod summary;

pub use summary::{SeriesSummary, SummaryCalculator};
