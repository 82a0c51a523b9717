//! Dashboard View Module
//! Evaluates one filter selection against the cached table: the table rows to
//! display, the chart (or "no data") and the per-metric summaries.

use crate::charts::Presentation;
use crate::data::{CleanTable, FilterSelection, FilteredTable, PERIOD_COLUMN, YEAR_COLUMN};
use crate::stats::{SeriesSummary, SummaryCalculator};
use crate::DashboardResult;

#[derive(Debug, Clone)]
pub struct DashboardView {
    pub selection: FilterSelection,
    pub filtered: FilteredTable,
    pub presentation: Presentation,
    pub summaries: Vec<SeriesSummary>,
    pub table_header: Vec<String>,
    pub table_rows: Vec<Vec<String>>,
}

impl DashboardView {
    /// Pure function of the table and the selection; the table is never modified.
    pub fn evaluate(table: &CleanTable, selection: &FilterSelection) -> DashboardResult<Self> {
        let filtered = selection.apply(table)?;
        let presentation = Presentation::from_filtered(&filtered)?;
        let summaries = SummaryCalculator::summarize_filtered(&filtered)?;

        let mut table_header = vec![PERIOD_COLUMN.to_string(), YEAR_COLUMN.to_string()];
        table_header.extend(filtered.metrics().iter().cloned());
        let table_rows = format_rows(&filtered)?;

        if presentation.is_no_data() {
            tracing::warn!(
                "No renderable data for {}..={} {:?}",
                selection.year_start,
                selection.year_end,
                selection.metrics
            );
        }

        Ok(Self {
            selection: selection.clone(),
            filtered,
            presentation,
            summaries,
            table_header,
            table_rows,
        })
    }

    pub fn heading(&self) -> String {
        format!(
            "Crimes from {} to {}",
            self.selection.year_start, self.selection.year_end
        )
    }
}

/// Display strings for every filtered row; null cells are empty.
fn format_rows(filtered: &FilteredTable) -> DashboardResult<Vec<Vec<String>>> {
    let periods = filtered.periods()?;
    let years = filtered.years()?;
    let metric_values = filtered
        .metrics()
        .iter()
        .map(|metric| filtered.metric_values(metric))
        .collect::<DashboardResult<Vec<_>>>()?;

    let rows = (0..filtered.height())
        .map(|row| {
            let mut cells = Vec::with_capacity(2 + metric_values.len());
            cells.push(
                periods[row]
                    .map(|p| p.format("%Y-%m-%d").to_string())
                    .unwrap_or_default(),
            );
            cells.push(years[row].map(|y| y.to_string()).unwrap_or_default());
            cells.extend(
                metric_values
                    .iter()
                    .map(|values| values[row].map(|v| format!("{v:.2}")).unwrap_or_default()),
            );
            cells
        })
        .collect();

    Ok(rows)
}

//----------------------------------------------------------------------------//
//                                    Tests                                   //
//----------------------------------------------------------------------------//
