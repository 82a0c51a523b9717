//! Data Filter Module
//! Filter domains and the year/metric projection of the cleaned table.

use crate::data::table::{date_cells, float_cells, int_cells, PERIOD_COLUMN, YEAR_COLUMN};
use crate::data::CleanTable;
use crate::{DashboardError, DashboardResult};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeSet;

/// Distinct non-null years, ascending.
pub fn available_years(table: &CleanTable) -> DashboardResult<BTreeSet<i32>> {
    Ok(table.years()?.into_iter().flatten().collect())
}

/// Metric names in table column order.
pub fn available_metrics(table: &CleanTable) -> &[String] {
    table.metrics()
}

/// The user's current filter choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub year_start: i32,
    pub year_end: i32,
    pub metrics: Vec<String>,
}

impl FilterSelection {
    /// Full year range with the first metric selected.
    ///
    /// `None` when the table has no valid year to build a range from.
    pub fn initial(table: &CleanTable) -> DashboardResult<Option<Self>> {
        let years = available_years(table)?;
        let (Some(&year_start), Some(&year_end)) = (years.first(), years.last()) else {
            return Ok(None);
        };

        Ok(Some(Self {
            year_start,
            year_end,
            metrics: table.metrics().iter().take(1).cloned().collect(),
        }))
    }

    pub fn apply(&self, table: &CleanTable) -> DashboardResult<FilteredTable> {
        apply_filter(table, self.year_start, self.year_end, &self.metrics)
    }
}

/// Rows of one year range, projected to `period`, `ano` and the selected metrics.
#[derive(Debug, Clone)]
pub struct FilteredTable {
    year_start: i32,
    year_end: i32,
    metrics: Vec<String>,
    frame: DataFrame,
}

/// Keep rows with `year_start <= ano <= year_end`.
///
/// Rows with a null year never match. Source row order is preserved and the
/// cleaned table is left untouched. Repeated metrics are selected once.
pub fn apply_filter(
    table: &CleanTable,
    year_start: i32,
    year_end: i32,
    metrics: &[String],
) -> DashboardResult<FilteredTable> {
    let mut selected: Vec<String> = Vec::with_capacity(metrics.len());
    for metric in metrics {
        if !table.metrics().contains(metric) {
            return Err(DashboardError::UnknownMetric(metric.clone()));
        }
        if !selected.contains(metric) {
            selected.push(metric.clone());
        }
    }

    let mut projection = vec![col(PERIOD_COLUMN), col(YEAR_COLUMN)];
    projection.extend(selected.iter().map(|metric| col(metric.as_str())));

    let frame = table
        .frame()
        .clone()
        .lazy()
        .filter(
            col(YEAR_COLUMN)
                .gt_eq(lit(year_start))
                .and(col(YEAR_COLUMN).lt_eq(lit(year_end))),
        )
        .select(projection)
        .collect()?;

    tracing::debug!(
        "fn apply_filter()\nyears: {year_start}..={year_end}\nmetrics: {selected:?}\nrows: {}",
        frame.height()
    );

    Ok(FilteredTable {
        year_start,
        year_end,
        metrics: selected,
        frame,
    })
}

impl FilteredTable {
    pub fn year_range(&self) -> (i32, i32) {
        (self.year_start, self.year_end)
    }

    /// Selected metrics, in selection order.
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn periods(&self) -> DashboardResult<Vec<Option<NaiveDate>>> {
        date_cells(&self.frame, PERIOD_COLUMN)
    }

    pub fn years(&self) -> DashboardResult<Vec<Option<i32>>> {
        int_cells(&self.frame, YEAR_COLUMN)
    }

    pub fn metric_values(&self, metric: &str) -> DashboardResult<Vec<Option<f64>>> {
        if !self.metrics.iter().any(|m| m == metric) {
            return Err(DashboardError::UnknownMetric(metric.to_string()));
        }
        float_cells(&self.frame, metric)
    }

    /// False when there are no rows, no selected metrics, or every selected
    /// metric is entirely null in range.
    pub fn has_renderable_data(&self) -> bool {
        if self.is_empty() {
            return false;
        }

        self.metrics.iter().any(|metric| {
            self.frame
                .column(metric)
                .map(|column| column.null_count() < column.len())
                .unwrap_or(false)
        })
    }
}

//----------------------------------------------------------------------------//
//                                    Tests                                   //
//----------------------------------------------------------------------------//

/// Run tests with:
/// `cargo test -- --show-output tests_filter`
#[cfg(test)]
mod tests_filter {
    use super::*;

    fn table() -> DashboardResult<CleanTable> {
        let raw = df!(
            "ano" => &["2018", "2018", "2019", "2019", "2020", "bad", "2020"],
            "mes" => &["1", "2", "1", "2", "1", "1", "2"],
            "homicidio" => &["1", "2", "3", "4", "5", "6", "7"],
            "furto" => &["10", "", "-", "--", "14", "15", "16"],
            "sem_dados" => &["", "", "", "", "", "", ""]
        )?;
        CleanTable::from_raw(&raw)
    }

    fn names(metrics: &[&str]) -> Vec<String> {
        metrics.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn available_years_are_sorted_and_distinct() -> DashboardResult<()> {
        let years: Vec<i32> = available_years(&table()?)?.into_iter().collect();
        assert_eq!(years, vec![2018, 2019, 2020]);
        Ok(())
    }

    #[test]
    fn available_metrics_follow_column_order() -> DashboardResult<()> {
        let table = table()?;
        assert_eq!(available_metrics(&table), ["homicidio", "furto", "sem_dados"]);
        Ok(())
    }

    #[test]
    fn initial_selection_covers_everything_with_first_metric() -> DashboardResult<()> {
        let selection = FilterSelection::initial(&table()?)?.unwrap();
        assert_eq!(
            selection,
            FilterSelection {
                year_start: 2018,
                year_end: 2020,
                metrics: names(&["homicidio"]),
            }
        );
        Ok(())
    }

    #[test]
    fn single_year_keeps_only_that_year() -> DashboardResult<()> {
        let table = table()?;
        let filtered = apply_filter(&table, 2019, 2019, &names(&["homicidio"]))?;

        assert_eq!(filtered.years()?, vec![Some(2019), Some(2019)]);
        assert_eq!(filtered.metric_values("homicidio")?, vec![Some(3.0), Some(4.0)]);
        Ok(())
    }

    #[test]
    fn row_count_does_not_depend_on_metrics() -> DashboardResult<()> {
        let table = table()?;
        let expected = table
            .years()?
            .iter()
            .flatten()
            .filter(|&&y| (2019..=2020).contains(&y))
            .count();

        for metrics in [vec![], names(&["furto"]), names(&["homicidio", "furto"])] {
            let filtered = apply_filter(&table, 2019, 2020, &metrics)?;
            assert_eq!(filtered.height(), expected);
        }
        Ok(())
    }

    #[test]
    fn projection_is_period_year_then_metrics() -> DashboardResult<()> {
        let table = table()?;
        let filtered = apply_filter(&table, 2018, 2020, &names(&["furto", "homicidio", "furto"]))?;

        let columns: Vec<String> = filtered
            .frame()
            .get_column_names()
            .iter()
            .map(|n| n.to_string())
            .collect();
        assert_eq!(columns, ["period", "ano", "furto", "homicidio"]);
        assert_eq!(filtered.metrics(), ["furto", "homicidio"]);
        Ok(())
    }

    #[test]
    fn filtering_leaves_the_clean_table_untouched() -> DashboardResult<()> {
        let table = table()?;
        let before = table.clone();
        let _ = apply_filter(&table, 2019, 2019, &names(&["furto"]))?;
        assert_eq!(table, before);
        Ok(())
    }

    #[test]
    fn inverted_range_yields_no_rows() -> DashboardResult<()> {
        let filtered = apply_filter(&table()?, 2020, 2018, &names(&["homicidio"]))?;
        assert!(filtered.is_empty());
        assert!(!filtered.has_renderable_data());
        Ok(())
    }

    #[test]
    fn all_null_metric_has_no_renderable_data() -> DashboardResult<()> {
        let table = table()?;

        let only_null = apply_filter(&table, 2018, 2020, &names(&["sem_dados"]))?;
        assert!(!only_null.has_renderable_data());

        // furto is null for every 2019 row
        let null_in_range = apply_filter(&table, 2019, 2019, &names(&["furto"]))?;
        assert_eq!(null_in_range.height(), 2);
        assert!(!null_in_range.has_renderable_data());

        let mixed = apply_filter(&table, 2018, 2020, &names(&["sem_dados", "homicidio"]))?;
        assert!(mixed.has_renderable_data());
        Ok(())
    }

    #[test]
    fn no_selected_metric_has_no_renderable_data() -> DashboardResult<()> {
        let filtered = apply_filter(&table()?, 2018, 2020, &[])?;
        assert!(!filtered.is_empty());
        assert!(!filtered.has_renderable_data());
        Ok(())
    }

    #[test]
    fn unknown_metric_is_an_error() -> DashboardResult<()> {
        let result = apply_filter(&table()?, 2018, 2020, &names(&["period"]));
        assert!(matches!(result, Err(DashboardError::UnknownMetric(name)) if name == "period"));
        Ok(())
    }
}
