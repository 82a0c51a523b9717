//! Clean Table Module
//! The fully type-coerced crime table produced once by the loader.

use crate::data::cleaner::{
    clean_metric_column, clean_month_column, clean_year_column, date_from_days,
    days_since_epoch, period_of,
};
use crate::{DashboardError, DashboardResult};
use chrono::NaiveDate;
use polars::prelude::*;
use rayon::prelude::*;
use std::fmt;

/// Year column of the source file.
pub const YEAR_COLUMN: &str = "ano";
/// Month column of the source file.
pub const MONTH_COLUMN: &str = "mes";
/// Derived first-of-month date.
pub const PERIOD_COLUMN: &str = "period";

/// Cleaned table: `ano` (Int32), `mes` (Int32), `period` (Date) and one
/// Float64 column per metric, in source order.
#[derive(Debug, Clone)]
pub struct CleanTable {
    frame: DataFrame,
    metrics: Vec<String>,
}

/// What the cleaning pass did to the source rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub rows: usize,
    pub metric_columns: usize,
    pub rows_without_period: usize,
    pub null_metric_cells: usize,
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rows, {} metric columns, {} rows without a valid period, {} null metric cells",
            self.rows, self.metric_columns, self.rows_without_period, self.null_metric_cells
        )
    }
}

impl PartialEq for CleanTable {
    fn eq(&self, other: &Self) -> bool {
        self.metrics == other.metrics && self.frame.equals_missing(&other.frame)
    }
}

impl CleanTable {
    /// Clean a raw table whose cells are text.
    ///
    /// Every column other than `ano`, `mes` and `period` becomes a metric.
    /// An existing `period` column is dropped and derived again, which makes
    /// cleaning an already clean table a no-op.
    pub fn from_raw(raw: &DataFrame) -> DashboardResult<Self> {
        let years = clean_year_column(required_column(raw, YEAR_COLUMN)?)?;
        let months = clean_month_column(required_column(raw, MONTH_COLUMN)?)?;

        let periods: Vec<Option<i32>> = years
            .iter()
            .zip(&months)
            .map(|(&year, &month)| period_of(year, month).map(days_since_epoch))
            .collect();

        let metrics: Vec<String> = raw
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .filter(|name| ![YEAR_COLUMN, MONTH_COLUMN, PERIOD_COLUMN].contains(&name.as_str()))
            .collect();

        let metric_columns = metrics
            .par_iter()
            .map(|name| clean_metric_column(raw.column(name)?))
            .collect::<DashboardResult<Vec<Column>>>()?;

        let mut columns = vec![
            Column::new(YEAR_COLUMN.into(), years),
            Column::new(MONTH_COLUMN.into(), months),
            Column::new(PERIOD_COLUMN.into(), periods).cast(&DataType::Date)?,
        ];
        columns.extend(metric_columns);

        let frame = DataFrame::new(columns)?;
        tracing::debug!("fn from_raw()\nclean table:\n{frame}");

        Ok(Self { frame, metrics })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Metric column names in table order.
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn years(&self) -> DashboardResult<Vec<Option<i32>>> {
        int_cells(&self.frame, YEAR_COLUMN)
    }

    pub fn months(&self) -> DashboardResult<Vec<Option<i32>>> {
        int_cells(&self.frame, MONTH_COLUMN)
    }

    pub fn periods(&self) -> DashboardResult<Vec<Option<NaiveDate>>> {
        date_cells(&self.frame, PERIOD_COLUMN)
    }

    pub fn metric_values(&self, metric: &str) -> DashboardResult<Vec<Option<f64>>> {
        if !self.metrics.iter().any(|m| m == metric) {
            return Err(DashboardError::UnknownMetric(metric.to_string()));
        }
        float_cells(&self.frame, metric)
    }

    pub fn report(&self) -> DashboardResult<LoadReport> {
        let rows_without_period = self.frame.column(PERIOD_COLUMN)?.null_count();
        let null_metric_cells = self
            .metrics
            .iter()
            .map(|name| -> DashboardResult<usize> { Ok(self.frame.column(name)?.null_count()) })
            .sum::<DashboardResult<usize>>()?;

        Ok(LoadReport {
            rows: self.height(),
            metric_columns: self.metrics.len(),
            rows_without_period,
            null_metric_cells,
        })
    }
}

fn required_column<'a>(raw: &'a DataFrame, name: &str) -> DashboardResult<&'a Column> {
    raw.column(name)
        .map_err(|_| DashboardError::MissingColumn(name.to_string()))
}

pub(crate) fn int_cells(frame: &DataFrame, name: &str) -> DashboardResult<Vec<Option<i32>>> {
    let column = frame.column(name)?.cast(&DataType::Int32)?;
    Ok(column.as_materialized_series().i32()?.into_iter().collect())
}

pub(crate) fn float_cells(frame: &DataFrame, name: &str) -> DashboardResult<Vec<Option<f64>>> {
    let column = frame.column(name)?.cast(&DataType::Float64)?;
    Ok(column.as_materialized_series().f64()?.into_iter().collect())
}

pub(crate) fn date_cells(frame: &DataFrame, name: &str) -> DashboardResult<Vec<Option<NaiveDate>>> {
    // Date -> Int32 exposes the physical day count.
    let days = int_cells(frame, name)?;
    Ok(days.into_iter().map(|d| d.and_then(date_from_days)).collect())
}

//----------------------------------------------------------------------------//
//                                    Tests                                   //
//----------------------------------------------------------------------------//
