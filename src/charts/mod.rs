//! Charts module - Trend chart model and rendering

mod plotter;
mod series;

pub use plotter::{ChartPlotter, PALETTE};
pub use series::{month_index, month_label, ChartData, ChartSeries, Presentation};
